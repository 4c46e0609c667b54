// ==========================================
// 面粉制粉产销计划系统 - 派生指标
// ==========================================
// 职责: 每次分配变更后同步重算的指标值对象
// 红线: 永远是 (分配, 基线, 产能, 基线KPI) 的纯函数,不持久化
// ==========================================

use crate::domain::types::RiskLevel;
use serde::{Deserialize, Serialize};

// ==========================================
// DerivedMetrics - 派生指标
// ==========================================
// 失败语义: 所有字段必须是有限数;除零一律回退哨兵值(比率取0,工时取原分子口径)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub period: String,                  // 周期标签 (多周期聚合/图表分桶用)
    pub total_allocated_hours: f64,      // 当前分配工时合计
    pub total_capacity_hours: f64,       // 磨机可用工时合计
    pub overload_hours: f64,             // 超限工时 = max(0, 分配 - 产能)
    pub slack_or_shortfall_hours: f64,   // 富余/缺口 = 产能 - 分配 (负=缺口)
    pub cost_delta_pct: f64,             // 成本偏离 (%, 相对基线)
    pub waste_delta_pct: f64,            // 损耗偏离 (百分点, 相对基线)
    pub risk_score: f64,                 // 综合风险评分 [0,100]
}

impl DerivedMetrics {
    /// 全零指标 (空基线等退化场景的安全缺省)
    pub fn zeroed(period: &str) -> Self {
        DerivedMetrics {
            period: period.to_string(),
            total_allocated_hours: 0.0,
            total_capacity_hours: 0.0,
            overload_hours: 0.0,
            slack_or_shortfall_hours: 0.0,
            cost_delta_pct: 0.0,
            waste_delta_pct: 0.0,
            risk_score: 0.0,
        }
    }

    /// 风险带色 (展示用)
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}
