// ==========================================
// 面粉制粉产销计划系统 - API 层
// ==========================================
// 职责: 供UI控制器调用的业务接口
// ==========================================

pub mod error;
pub mod planning_api;
pub mod session;

// 重导出核心类型
pub use error::ApiError;
pub use planning_api::PlanningApi;
pub use session::{BaselineBundle, FetchTicket, InstallOutcome, PlanningSession};
