// ==========================================
// 面粉制粉产销计划系统 - 引擎层
// ==========================================
// 职责: 周期解析 + 配方模拟的业务规则实现
// 红线: 引擎不做 I/O; 所有信号必须带显式原因 (可解释性)
// ==========================================

pub mod period_resolver;
pub mod whatif;

// 重导出核心引擎
pub use period_resolver::PeriodResolver;
pub use whatif::{AllocationEngine, RecipeSlider};
