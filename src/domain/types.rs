// ==========================================
// 面粉制粉产销计划系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 时间粒度 (Horizon)
// ==========================================
// 用途: 周期标签的桶粒度 (周/月/年)
// 序列化格式: lowercase (与数据API一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Week,  // 周: ISO-8601 周编号
    Month, // 月: YYYY-MM
    Year,  // 年: YYYY
}

impl Horizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Week => "week",
            Horizon::Month => "month",
            Horizon::Year => "year",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon::Month
    }
}

impl FromStr for Horizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" | "w" => Ok(Horizon::Week),
            "month" | "monthly" | "m" => Ok(Horizon::Month),
            "year" | "yearly" | "y" => Ok(Horizon::Year),
            other => Err(format!("未知时间粒度: {}", other)),
        }
    }
}

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
// 用途: 驾驶舱风险带色,由 [0,100] 综合风险评分分档
// 红线: 评分是启发式,等级只用于展示,不参与任何约束判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Green,  // 正常
    Yellow, // 关注
    Orange, // 紧张
    Red,    // 超限/高风险
}

impl RiskLevel {
    /// 由综合风险评分分档
    ///
    /// # 分档阈值
    /// - < 25: GREEN
    /// - < 50: YELLOW
    /// - < 75: ORANGE
    /// - >= 75: RED
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            RiskLevel::Green
        } else if score < 50.0 {
            RiskLevel::Yellow
        } else if score < 75.0 {
            RiskLevel::Orange
        } else {
            RiskLevel::Red
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Green => write!(f, "GREEN"),
            RiskLevel::Yellow => write!(f, "YELLOW"),
            RiskLevel::Orange => write!(f, "ORANGE"),
            RiskLevel::Red => write!(f, "RED"),
        }
    }
}

// ==========================================
// 周期标签 (Period Tag)
// ==========================================
// 规范字符串: "YYYY" / "YYYY-MM" / "YYYY-Www"
// 生命周期: 选区变化时计算一次,之后不可变
pub type PeriodTag = String;
