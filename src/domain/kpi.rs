// ==========================================
// 面粉制粉产销计划系统 - 基线KPI汇总
// ==========================================
// 职责: 后端算好的周期基线KPI (引擎以此为增量零点)
// 红线: KPI 的计算在后端,本引擎只消费,不复算
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// BaselineKpis - 基线KPI汇总 (后端数据形状)
// ==========================================
// 来源: 数据API 计划KPI汇总接口
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselineKpis {
    pub planned_recipe_hours: f64,   // 计划配方工时
    pub available_mill_hours: f64,   // 可用磨机工时
    pub slack_shortfall_hours: f64,  // 富余/缺口工时
    pub wheat_cost_index: f64,       // 小麦成本指数
    pub waste_impact_pct: f64,       // 损耗影响 (%)
    pub cost_impact_pct: f64,        // 成本影响 (%)
    pub risk_score: f64,             // 基线风险评分 [0,100]
}
