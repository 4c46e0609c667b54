// ==========================================
// 面粉制粉产销计划系统 - 磨机领域模型
// ==========================================
// 职责: 磨机产能数据 (后端行 -> 按磨机聚合)
// 红线: 产能由外部产能口径给定,引擎只读不改
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CapacityRow - 磨机产能行 (后端数据形状)
// ==========================================
// 来源: 数据API /api/capacity/mill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityRow {
    pub mill_id: String,         // 磨机ID
    pub mill_name: String,       // 磨机名称
    pub period: String,          // 周期标签
    pub available_hours: f64,    // 可用工时
    pub scheduled_hours: f64,    // 已排工时 (基线口径)
    pub overload_hours: f64,     // 超限工时 (基线口径)
    pub utilization_pct: f64,    // 利用率 (%)
}

// ==========================================
// Mill - 磨机 (按磨机聚合后的产能快照)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mill {
    pub mill_id: String,         // 磨机ID
    pub mill_name: String,       // 磨机名称
    pub available_hours: f64,    // 本周期可用工时 (多行求和)
}

impl Mill {
    /// 将后端产能行聚合为按磨机的只读快照
    pub fn aggregate(rows: &[CapacityRow]) -> BTreeMap<String, Mill> {
        let mut mills: BTreeMap<String, Mill> = BTreeMap::new();

        for row in rows {
            let hours = if row.available_hours.is_finite() {
                row.available_hours.max(0.0)
            } else {
                0.0
            };

            mills
                .entry(row.mill_id.clone())
                .and_modify(|m| m.available_hours += hours)
                .or_insert_with(|| Mill {
                    mill_id: row.mill_id.clone(),
                    mill_name: row.mill_name.clone(),
                    available_hours: hours,
                });
        }

        mills
    }

    /// 全部磨机的可用工时合计
    pub fn total_available_hours(mills: &BTreeMap<String, Mill>) -> f64 {
        mills.values().map(|m| m.available_hours).sum()
    }
}
