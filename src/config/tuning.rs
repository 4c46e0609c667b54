// ==========================================
// 面粉制粉产销计划系统 - 调参定义
// ==========================================
// 职责: 风险权重/滑杆策略/粒度阈值等可调参数
// 说明: 这些是策略常量而非物理推导值,默认值来自产品标定,
//       以参数形式注入引擎,不做模块级单例
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RiskTuning - 风险评分权重
// ==========================================
// riskScore = clamp(floor, ceiling,
//     基线评分 + 超限压力项 + 成本压力项 + 损耗压力项)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskTuning {
    /// 超限压力权重: (overload / max(1, capacity)) * overload_weight
    #[serde(default = "RiskTuning::default_overload_weight")]
    pub overload_weight: f64,

    /// 成本压力权重: |cost_delta_pct| * cost_weight
    #[serde(default = "RiskTuning::default_cost_weight")]
    pub cost_weight: f64,

    /// 损耗压力权重: |waste_delta_pct| * waste_weight
    #[serde(default = "RiskTuning::default_waste_weight")]
    pub waste_weight: f64,

    /// 评分下界
    #[serde(default)]
    pub risk_floor: f64,

    /// 评分上界
    #[serde(default = "RiskTuning::default_risk_ceiling")]
    pub risk_ceiling: f64,
}

impl RiskTuning {
    fn default_overload_weight() -> f64 {
        80.0
    }

    fn default_cost_weight() -> f64 {
        1.5
    }

    fn default_waste_weight() -> f64 {
        8.0
    }

    fn default_risk_ceiling() -> f64 {
        100.0
    }
}

impl Default for RiskTuning {
    fn default() -> Self {
        RiskTuning {
            overload_weight: Self::default_overload_weight(),
            cost_weight: Self::default_cost_weight(),
            waste_weight: Self::default_waste_weight(),
            risk_floor: 0.0,
            risk_ceiling: Self::default_risk_ceiling(),
        }
    }
}

// ==========================================
// SliderPolicy - 滑杆策略
// ==========================================
// max = max(absolute_min_max, round(基线 * headroom_ratio))
// 步长: 基线 <= fine_threshold 取 fine_step,
//       基线 <= medium_threshold 取 medium_step, 否则 coarse_step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderPolicy {
    #[serde(default = "SliderPolicy::default_absolute_min_max")]
    pub absolute_min_max: f64,

    #[serde(default = "SliderPolicy::default_headroom_ratio")]
    pub headroom_ratio: f64,

    #[serde(default = "SliderPolicy::default_fine_threshold")]
    pub fine_threshold: f64,

    #[serde(default = "SliderPolicy::default_fine_step")]
    pub fine_step: f64,

    #[serde(default = "SliderPolicy::default_medium_threshold")]
    pub medium_threshold: f64,

    #[serde(default = "SliderPolicy::default_medium_step")]
    pub medium_step: f64,

    #[serde(default = "SliderPolicy::default_coarse_step")]
    pub coarse_step: f64,
}

impl SliderPolicy {
    fn default_absolute_min_max() -> f64 {
        1000.0
    }

    fn default_headroom_ratio() -> f64 {
        1.5
    }

    fn default_fine_threshold() -> f64 {
        100.0
    }

    fn default_fine_step() -> f64 {
        1.0
    }

    fn default_medium_threshold() -> f64 {
        500.0
    }

    fn default_medium_step() -> f64 {
        5.0
    }

    fn default_coarse_step() -> f64 {
        10.0
    }

    /// 按基线大小取步长 (基线越大步长越粗)
    pub fn step_for(&self, baseline_hours: f64) -> f64 {
        if baseline_hours <= self.fine_threshold {
            self.fine_step
        } else if baseline_hours <= self.medium_threshold {
            self.medium_step
        } else {
            self.coarse_step
        }
    }
}

impl Default for SliderPolicy {
    fn default() -> Self {
        SliderPolicy {
            absolute_min_max: Self::default_absolute_min_max(),
            headroom_ratio: Self::default_headroom_ratio(),
            fine_threshold: Self::default_fine_threshold(),
            fine_step: Self::default_fine_step(),
            medium_threshold: Self::default_medium_threshold(),
            medium_step: Self::default_medium_step(),
            coarse_step: Self::default_coarse_step(),
        }
    }
}

// ==========================================
// HorizonPolicy - 自定义区间的粒度阈值
// ==========================================
// 跨度 <= week_max_days 用周, <= month_max_days 用月, 否则用年
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonPolicy {
    #[serde(default = "HorizonPolicy::default_week_max_days")]
    pub week_max_days: i64,

    #[serde(default = "HorizonPolicy::default_month_max_days")]
    pub month_max_days: i64,
}

impl HorizonPolicy {
    fn default_week_max_days() -> i64 {
        10
    }

    fn default_month_max_days() -> i64 {
        // 约4个月
        120
    }
}

impl Default for HorizonPolicy {
    fn default() -> Self {
        HorizonPolicy {
            week_max_days: Self::default_week_max_days(),
            month_max_days: Self::default_month_max_days(),
        }
    }
}

// ==========================================
// PlanningTuning - 调参总集
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningTuning {
    #[serde(default)]
    pub risk: RiskTuning,

    #[serde(default)]
    pub slider: SliderPolicy,

    #[serde(default)]
    pub horizon: HorizonPolicy,
}
