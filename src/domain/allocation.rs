// ==========================================
// 面粉制粉产销计划系统 - 分配与滑杆边界
// ==========================================
// 职责: 配方工时滑杆的固定边界 (会话内不变)
// 红线: 边界只由 *基线* 决定,拖动其他滑杆不改变任何边界
// ==========================================

use crate::config::SliderPolicy;
use serde::{Deserialize, Serialize};

// ==========================================
// SliderBounds - 滑杆边界
// ==========================================
// 生命周期: initialize 时按配方基线确定,会话期间固定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderBounds {
    pub min_hours: f64,   // 下界 (恒为 0)
    pub max_hours: f64,   // 上界 = max(下限值, round(基线 * 放大系数))
    pub step_hours: f64,  // 步长 (基线越大步长越粗)
}

impl SliderBounds {
    /// 由配方基线工时与滑杆策略确定固定边界
    pub fn from_baseline(baseline_hours: f64, policy: &SliderPolicy) -> Self {
        let baseline = if baseline_hours.is_finite() {
            baseline_hours.max(0.0)
        } else {
            0.0
        };

        let max_hours = policy
            .absolute_min_max
            .max((baseline * policy.headroom_ratio).round());

        SliderBounds {
            min_hours: 0.0,
            max_hours,
            step_hours: policy.step_for(baseline),
        }
    }

    /// 将输入工时收敛到边界内
    ///
    /// 越界输入静默截断,非有限输入退回下界 (本子系统无失败态)
    pub fn clamp(&self, hours: f64) -> f64 {
        if !hours.is_finite() {
            return self.min_hours;
        }
        hours.clamp(self.min_hours, self.max_hours)
    }
}
