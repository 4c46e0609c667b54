// ==========================================
// 面粉制粉产销计划系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (人工最终控制权)
// 范围: 生产计划页的 what-if 模拟核心 + 周期解析;
//       渲染/鉴权/网络传输由外部协作方承担
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 策略调参
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Horizon, PeriodTag, RiskLevel};

// 领域实体
pub use domain::{
    BaselineKpis, BaselineRecipeRow, CapacityRow, DerivedMetrics, EligibilityMatrix,
    EligibilityRow, Mill, PlanningAlert, Recipe, SliderBounds,
};

// 引擎
pub use engine::{AllocationEngine, PeriodResolver, RecipeSlider};

// 配置
pub use config::{HorizonPolicy, PlanningTuning, RiskTuning, SliderPolicy};

// API
pub use api::{ApiError, BaselineBundle, FetchTicket, InstallOutcome, PlanningApi, PlanningSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "面粉制粉产销计划系统";
