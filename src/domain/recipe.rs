// ==========================================
// 面粉制粉产销计划系统 - 配方领域模型
// ==========================================
// 职责: 配方基线数据 (后端行 -> 按配方聚合)
// 红线: 基线一经载入不可变,引擎只读
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// BaselineRecipeRow - 配方基线行 (后端数据形状)
// ==========================================
// 来源: 数据API /api/planning/recipe
// 说明: 每配方每周期可能有多行,引擎按需聚合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineRecipeRow {
    pub recipe_id: String,      // 配方ID
    pub recipe_name: String,    // 配方名称
    pub period: String,         // 周期标签 (由 PeriodResolver 生成)
    pub scheduled_hours: f64,   // 基线排产工时
    pub cost_per_hour: f64,     // 单位工时成本
    pub avg_waste_pct: f64,     // 平均损耗率 (%)
}

// ==========================================
// Recipe - 配方 (按配方聚合后的基线快照)
// ==========================================
// 用途: 引擎内部的只读基线,工时求和,成本/损耗按工时加权
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_id: String,      // 配方ID
    pub recipe_name: String,    // 配方名称
    pub baseline_hours: f64,    // 基线工时 (多行求和)
    pub cost_per_hour: f64,     // 单位工时成本 (工时加权均值)
    pub avg_waste_pct: f64,     // 平均损耗率 (工时加权均值)
}

impl Recipe {
    /// 将后端基线行聚合为按配方的只读快照
    ///
    /// # 聚合规则
    /// - scheduled_hours: 求和
    /// - cost_per_hour / avg_waste_pct: 按工时加权均值;
    ///   工时合计为 0 时退化为简单均值 (避免除零丢数据)
    ///
    /// # 返回
    /// recipe_id -> Recipe 映射 (BTreeMap 保证迭代顺序确定)
    pub fn aggregate(rows: &[BaselineRecipeRow]) -> BTreeMap<String, Recipe> {
        // 中间累加: (名称, 工时和, 成本*工时, 损耗*工时, 成本和, 损耗和, 行数)
        struct Acc {
            name: String,
            hours: f64,
            cost_weighted: f64,
            waste_weighted: f64,
            cost_sum: f64,
            waste_sum: f64,
            row_count: u32,
        }

        let mut accs: BTreeMap<String, Acc> = BTreeMap::new();

        for row in rows {
            let acc = accs.entry(row.recipe_id.clone()).or_insert_with(|| Acc {
                name: row.recipe_name.clone(),
                hours: 0.0,
                cost_weighted: 0.0,
                waste_weighted: 0.0,
                cost_sum: 0.0,
                waste_sum: 0.0,
                row_count: 0,
            });

            let hours = if row.scheduled_hours.is_finite() {
                row.scheduled_hours.max(0.0)
            } else {
                0.0
            };

            acc.hours += hours;
            acc.cost_weighted += row.cost_per_hour * hours;
            acc.waste_weighted += row.avg_waste_pct * hours;
            acc.cost_sum += row.cost_per_hour;
            acc.waste_sum += row.avg_waste_pct;
            acc.row_count += 1;
        }

        accs.into_iter()
            .map(|(recipe_id, acc)| {
                let (cost, waste) = if acc.hours > 0.0 {
                    (acc.cost_weighted / acc.hours, acc.waste_weighted / acc.hours)
                } else if acc.row_count > 0 {
                    // 工时全为 0: 退化为简单均值
                    let n = acc.row_count as f64;
                    (acc.cost_sum / n, acc.waste_sum / n)
                } else {
                    (0.0, 0.0)
                };

                (
                    recipe_id.clone(),
                    Recipe {
                        recipe_id,
                        recipe_name: acc.name,
                        baseline_hours: acc.hours,
                        cost_per_hour: cost,
                        avg_waste_pct: waste,
                    },
                )
            })
            .collect()
    }
}
