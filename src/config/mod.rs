// ==========================================
// 面粉制粉产销计划系统 - 配置层
// ==========================================
// 职责: 策略调参定义 (权重/阈值)
// 说明: 本核心不做持久化,配置以显式参数注入引擎
// ==========================================

pub mod tuning;

// 重导出核心配置类型
pub use tuning::{HorizonPolicy, PlanningTuning, RiskTuning, SliderPolicy};
