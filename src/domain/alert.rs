// ==========================================
// 面粉制粉产销计划系统 - 计划告警
// ==========================================
// 职责: 模拟态下的提示性告警 (超限/高风险)
// 红线: 告警必须带显式原因,且仅提示不拦截 (可解释性)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 告警严重度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Medium, // 提示
    High,   // 高
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Medium => write!(f, "medium"),
            AlertSeverity::High => write!(f, "high"),
        }
    }
}

// ==========================================
// PlanningAlert - 计划告警
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningAlert {
    pub alert_type: String,      // 告警类型 (capacity_overload / high_risk)
    pub severity: AlertSeverity, // 严重度
    pub title: String,           // 标题
    pub message: String,         // 说明 (含显式原因)
    pub period: String,          // 周期标签
}
