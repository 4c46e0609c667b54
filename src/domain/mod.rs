// ==========================================
// 面粉制粉产销计划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、后端数据形状
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod alert;
pub mod allocation;
pub mod eligibility;
pub mod kpi;
pub mod metrics;
pub mod mill;
pub mod recipe;
pub mod types;

// 重导出核心类型
pub use alert::{AlertSeverity, PlanningAlert};
pub use allocation::SliderBounds;
pub use eligibility::{EligibilityMatrix, EligibilityRow};
pub use kpi::BaselineKpis;
pub use metrics::DerivedMetrics;
pub use mill::{CapacityRow, Mill};
pub use recipe::{BaselineRecipeRow, Recipe};
pub use types::{Horizon, PeriodTag, RiskLevel};
