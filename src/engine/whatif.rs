// ==========================================
// 面粉制粉产销计划系统 - 配方模拟引擎
// ==========================================
// 职责: "配方 -> 磨机产能" what-if 模拟
// 输入: 配方基线 + 磨机产能 + 适用矩阵 + 基线KPI
// 输出: DerivedMetrics (分配合计/超限/富余缺口/成本损耗偏离/风险评分)
// ==========================================
// 红线1: 基线一经载入不可变,引擎只在分配副本上模拟
// 红线2: 分配的键集合 == 基线配方键集合,会话期间不增不减
// 红线3: 重算是同步纯计算,无任何挂起点
// 红线4: 任何派生指标必须是有限数,除零回退哨兵值,不向UI传 NaN/Inf
// ==========================================

use crate::config::{RiskTuning, SliderPolicy};
use crate::domain::alert::{AlertSeverity, PlanningAlert};
use crate::domain::allocation::SliderBounds;
use crate::domain::eligibility::{EligibilityMatrix, EligibilityRow};
use crate::domain::kpi::BaselineKpis;
use crate::domain::metrics::DerivedMetrics;
use crate::domain::mill::{CapacityRow, Mill};
use crate::domain::recipe::{BaselineRecipeRow, Recipe};
use crate::domain::types::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// RecipeSlider - 滑杆视图 (UI渲染用)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSlider {
    pub recipe_id: String,     // 配方ID
    pub recipe_name: String,   // 配方名称
    pub baseline_hours: f64,   // 基线工时
    pub current_hours: f64,    // 当前分配工时
    pub bounds: SliderBounds,  // 固定滑杆边界
}

// ==========================================
// Scenario - 已就绪的周期模拟状态
// ==========================================
// 基线字段在 initialize 之后全部只读; allocation 是唯一可变部分
#[derive(Debug, Clone)]
struct Scenario {
    period: String,
    recipes: BTreeMap<String, Recipe>,
    mills: BTreeMap<String, Mill>,
    capacity_hours: f64,
    eligibility: EligibilityMatrix,
    baseline_kpis: BaselineKpis,
    bounds: BTreeMap<String, SliderBounds>,
    allocation: BTreeMap<String, f64>,
    baseline_metrics: DerivedMetrics,
    current_metrics: DerivedMetrics,
}

// ==========================================
// EngineState - 引擎状态机
// ==========================================
// Uninitialized -> (基线到达) -> Ready
// Ready -> (滑杆变更/重置) -> Ready
// Ready -> (周期切换) -> Uninitialized (整体丢弃重建,用户编辑不跨周期)
#[derive(Debug, Clone)]
enum EngineState {
    Uninitialized,
    Ready(Box<Scenario>),
}

// ==========================================
// AllocationEngine - 配方模拟引擎
// ==========================================
// 定位: 决策支持 (advisory),适用矩阵仅展示参考,不拦截任何调整
pub struct AllocationEngine {
    risk_tuning: RiskTuning,
    slider_policy: SliderPolicy,
    state: EngineState,
}

impl AllocationEngine {
    /// 使用默认调参构造
    pub fn new() -> Self {
        Self::with_tuning(RiskTuning::default(), SliderPolicy::default())
    }

    /// 使用指定调参构造
    pub fn with_tuning(risk_tuning: RiskTuning, slider_policy: SliderPolicy) -> Self {
        Self {
            risk_tuning,
            slider_policy,
            state: EngineState::Uninitialized,
        }
    }

    // ==========================================
    // 生命周期
    // ==========================================

    /// 载入周期基线,进入 Ready 状态
    ///
    /// # 参数
    /// - `period`: 周期标签 (由 PeriodResolver 生成)
    /// - `baseline_rows`: 配方基线行 (每配方可多行,内部聚合)
    /// - `capacity_rows`: 磨机产能行
    /// - `eligibility_rows`: 适用矩阵行 (只读参考)
    /// - `baseline_kpis`: 后端基线KPI (增量零点)
    ///
    /// # 返回
    /// 初始派生指标 (分配 == 基线)
    ///
    /// 空基线同样成功: 指标全零,不报错
    pub fn initialize(
        &mut self,
        period: &str,
        baseline_rows: &[BaselineRecipeRow],
        capacity_rows: &[CapacityRow],
        eligibility_rows: &[EligibilityRow],
        baseline_kpis: BaselineKpis,
    ) -> DerivedMetrics {
        let recipes = Recipe::aggregate(baseline_rows);
        let mills = Mill::aggregate(capacity_rows);
        let capacity_hours = Mill::total_available_hours(&mills);
        let eligibility = EligibilityMatrix::from_rows(eligibility_rows);

        // 滑杆边界由基线一次性确定,会话期间固定
        let bounds: BTreeMap<String, SliderBounds> = recipes
            .iter()
            .map(|(id, r)| {
                (
                    id.clone(),
                    SliderBounds::from_baseline(r.baseline_hours, &self.slider_policy),
                )
            })
            .collect();

        // 分配 = 基线工时的副本
        let allocation: BTreeMap<String, f64> =
            recipes.iter().map(|(id, r)| (id.clone(), r.baseline_hours)).collect();

        let mut scenario = Scenario {
            period: period.to_string(),
            recipes,
            mills,
            capacity_hours,
            eligibility,
            baseline_kpis,
            bounds,
            allocation,
            baseline_metrics: DerivedMetrics::zeroed(period),
            current_metrics: DerivedMetrics::zeroed(period),
        };

        let metrics = Self::compute_metrics(&scenario, &self.risk_tuning);
        scenario.baseline_metrics = metrics.clone();
        scenario.current_metrics = metrics.clone();

        tracing::info!(
            period = %period,
            recipe_count = scenario.recipes.len(),
            mill_count = scenario.mills.len(),
            capacity_hours = scenario.capacity_hours,
            "模拟引擎已载入基线"
        );

        self.state = EngineState::Ready(Box::new(scenario));
        metrics
    }

    /// 丢弃当前周期的全部状态 (周期/日期选区切换时调用)
    pub fn discard(&mut self) {
        if let EngineState::Ready(scenario) = &self.state {
            tracing::debug!(period = %scenario.period, "模拟引擎状态已丢弃");
        }
        self.state = EngineState::Uninitialized;
    }

    /// 引擎是否已就绪
    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    // ==========================================
    // 分配变更
    // ==========================================

    /// 设置某配方的当前工时并同步重算指标
    ///
    /// # 行为
    /// - 输入先收敛到该配方的固定滑杆边界,越界静默截断
    /// - 未知配方ID/非有限工时忽略 (分配键集合不变式),仅记 warn
    /// - 同一 (recipe_id, hours) 重复调用结果幂等
    pub fn set_allocation(&mut self, recipe_id: &str, hours: f64) -> DerivedMetrics {
        let risk_tuning = self.risk_tuning.clone();

        let scenario = match &mut self.state {
            EngineState::Ready(s) => s.as_mut(),
            EngineState::Uninitialized => {
                tracing::warn!(recipe_id = %recipe_id, "引擎未初始化,分配变更被忽略");
                return DerivedMetrics::zeroed("");
            }
        };

        if !hours.is_finite() {
            tracing::warn!(recipe_id = %recipe_id, "非有限工时输入,分配变更被忽略");
            return scenario.current_metrics.clone();
        }

        match (scenario.bounds.get(recipe_id), scenario.allocation.get_mut(recipe_id)) {
            (Some(bounds), Some(slot)) => {
                let clamped = bounds.clamp(hours);
                tracing::debug!(
                    recipe_id = %recipe_id,
                    requested = hours,
                    applied = clamped,
                    "分配变更"
                );
                *slot = clamped;
                scenario.current_metrics = Self::compute_metrics(scenario, &risk_tuning);
            }
            _ => {
                tracing::warn!(recipe_id = %recipe_id, "未知配方ID,分配变更被忽略");
            }
        }

        scenario.current_metrics.clone()
    }

    /// 将单个配方重置回基线工时
    pub fn reset_recipe(&mut self, recipe_id: &str) -> DerivedMetrics {
        let risk_tuning = self.risk_tuning.clone();

        let scenario = match &mut self.state {
            EngineState::Ready(s) => s.as_mut(),
            EngineState::Uninitialized => return DerivedMetrics::zeroed(""),
        };

        match (scenario.recipes.get(recipe_id), scenario.allocation.get_mut(recipe_id)) {
            (Some(recipe), Some(slot)) => {
                *slot = recipe.baseline_hours;
                scenario.current_metrics = Self::compute_metrics(scenario, &risk_tuning);
            }
            _ => {
                tracing::warn!(recipe_id = %recipe_id, "未知配方ID,重置被忽略");
            }
        }

        scenario.current_metrics.clone()
    }

    /// 将全部配方重置回基线工时
    ///
    /// 重置后指标与 initialize 时完全一致 (往返律)
    pub fn reset_all(&mut self) -> DerivedMetrics {
        let scenario = match &mut self.state {
            EngineState::Ready(s) => s.as_mut(),
            EngineState::Uninitialized => return DerivedMetrics::zeroed(""),
        };

        for (recipe_id, slot) in scenario.allocation.iter_mut() {
            if let Some(recipe) = scenario.recipes.get(recipe_id) {
                *slot = recipe.baseline_hours;
            }
        }

        // 直接回到基线快照,保证逐位相等
        scenario.current_metrics = scenario.baseline_metrics.clone();
        scenario.current_metrics.clone()
    }

    // ==========================================
    // 只读查询
    // ==========================================

    /// 当前派生指标 (幂等读)
    pub fn derived_metrics(&self) -> DerivedMetrics {
        match &self.state {
            EngineState::Ready(s) => s.current_metrics.clone(),
            EngineState::Uninitialized => DerivedMetrics::zeroed(""),
        }
    }

    /// initialize 时刻的基线指标快照
    pub fn baseline_metrics(&self) -> DerivedMetrics {
        match &self.state {
            EngineState::Ready(s) => s.baseline_metrics.clone(),
            EngineState::Uninitialized => DerivedMetrics::zeroed(""),
        }
    }

    /// 某配方的固定滑杆边界
    pub fn slider_bounds(&self, recipe_id: &str) -> Option<SliderBounds> {
        match &self.state {
            EngineState::Ready(s) => s.bounds.get(recipe_id).copied(),
            EngineState::Uninitialized => None,
        }
    }

    /// 某配方的当前分配工时
    pub fn allocation_of(&self, recipe_id: &str) -> Option<f64> {
        match &self.state {
            EngineState::Ready(s) => s.allocation.get(recipe_id).copied(),
            EngineState::Uninitialized => None,
        }
    }

    /// 全部滑杆视图 (配方ID顺序确定)
    pub fn sliders(&self) -> Vec<RecipeSlider> {
        let scenario = match &self.state {
            EngineState::Ready(s) => s.as_ref(),
            EngineState::Uninitialized => return Vec::new(),
        };

        scenario
            .recipes
            .values()
            .map(|recipe| {
                let current = scenario
                    .allocation
                    .get(&recipe.recipe_id)
                    .copied()
                    .unwrap_or(recipe.baseline_hours);
                let bounds = scenario
                    .bounds
                    .get(&recipe.recipe_id)
                    .copied()
                    .unwrap_or_else(|| {
                        SliderBounds::from_baseline(recipe.baseline_hours, &self.slider_policy)
                    });

                RecipeSlider {
                    recipe_id: recipe.recipe_id.clone(),
                    recipe_name: recipe.recipe_name.clone(),
                    baseline_hours: recipe.baseline_hours,
                    current_hours: current,
                    bounds,
                }
            })
            .collect()
    }

    /// 适用矩阵 (只读参考,引擎不据此拦截调整)
    pub fn eligibility(&self) -> Option<&EligibilityMatrix> {
        match &self.state {
            EngineState::Ready(s) => Some(&s.eligibility),
            EngineState::Uninitialized => None,
        }
    }

    /// 当前周期标签
    pub fn period(&self) -> Option<&str> {
        match &self.state {
            EngineState::Ready(s) => Some(s.period.as_str()),
            EngineState::Uninitialized => None,
        }
    }

    /// 模拟态下的提示性告警 (超限/高风险,带显式原因)
    pub fn alerts(&self) -> Vec<PlanningAlert> {
        let scenario = match &self.state {
            EngineState::Ready(s) => s.as_ref(),
            EngineState::Uninitialized => return Vec::new(),
        };

        let metrics = &scenario.current_metrics;
        let mut alerts = Vec::new();

        if metrics.overload_hours > 0.0 {
            alerts.push(PlanningAlert {
                alert_type: "capacity_overload".to_string(),
                severity: AlertSeverity::High,
                title: "磨机产能超限".to_string(),
                message: format!(
                    "周期 {} 分配工时 {:.1}h 超出磨机可用产能 {:.1}h,超限 {:.1}h",
                    scenario.period,
                    metrics.total_allocated_hours,
                    metrics.total_capacity_hours,
                    metrics.overload_hours
                ),
                period: scenario.period.clone(),
            });
        }

        let risk_level = metrics.risk_level();
        if risk_level >= RiskLevel::Orange {
            alerts.push(PlanningAlert {
                alert_type: "high_risk".to_string(),
                severity: if risk_level == RiskLevel::Red {
                    AlertSeverity::High
                } else {
                    AlertSeverity::Medium
                },
                title: "方案风险偏高".to_string(),
                message: format!(
                    "周期 {} 综合风险评分 {:.1} ({}),成本偏离 {:.2}%,损耗偏离 {:.2}个百分点",
                    scenario.period,
                    metrics.risk_score,
                    risk_level,
                    metrics.cost_delta_pct,
                    metrics.waste_delta_pct
                ),
                period: scenario.period.clone(),
            });
        }

        alerts
    }

    // ==========================================
    // 指标重算 (纯函数)
    // ==========================================

    /// 由 (分配, 基线, 产能, 基线KPI) 重算派生指标
    fn compute_metrics(scenario: &Scenario, tuning: &RiskTuning) -> DerivedMetrics {
        let capacity = scenario.capacity_hours;

        // 1. 分配工时合计
        let total_allocated: f64 = scenario.allocation.values().sum();

        // 2. 超限工时
        let overload_hours = (total_allocated - capacity).max(0.0);

        // 3. 富余/缺口 (负=缺口)
        let slack_or_shortfall = capacity - total_allocated;

        // 4. 成本偏离 (%)
        let mut baseline_cost = 0.0;
        let mut current_cost = 0.0;
        for (recipe_id, recipe) in &scenario.recipes {
            let allocated = scenario
                .allocation
                .get(recipe_id)
                .copied()
                .unwrap_or(recipe.baseline_hours);
            baseline_cost += recipe.baseline_hours * recipe.cost_per_hour;
            current_cost += allocated * recipe.cost_per_hour;
        }
        let cost_delta_pct = if baseline_cost > 0.0 {
            (current_cost - baseline_cost) / baseline_cost * 100.0
        } else {
            0.0
        };

        // 5. 损耗偏离 (百分点): 加权平均损耗率之差
        let baseline_hours_sum: f64 = scenario.recipes.values().map(|r| r.baseline_hours).sum();
        let baseline_avg_waste = if baseline_hours_sum > 0.0 {
            scenario
                .recipes
                .values()
                .map(|r| r.baseline_hours * r.avg_waste_pct)
                .sum::<f64>()
                / baseline_hours_sum
        } else {
            0.0
        };
        let current_avg_waste = if total_allocated > 0.0 {
            scenario
                .recipes
                .values()
                .map(|r| {
                    let allocated = scenario
                        .allocation
                        .get(&r.recipe_id)
                        .copied()
                        .unwrap_or(r.baseline_hours);
                    allocated * r.avg_waste_pct
                })
                .sum::<f64>()
                / total_allocated
        } else {
            0.0
        };
        let waste_delta_pct = current_avg_waste - baseline_avg_waste;

        // 6. 综合风险评分
        // 低于一个滑杆步长的变化视为"未变",避免UI步进取整的浮点噪声
        // 抬升基线评分造成毛刺
        let unchanged = scenario.recipes.iter().all(|(recipe_id, recipe)| {
            let allocated = scenario
                .allocation
                .get(recipe_id)
                .copied()
                .unwrap_or(recipe.baseline_hours);
            let step = scenario
                .bounds
                .get(recipe_id)
                .map(|b| b.step_hours)
                .unwrap_or(f64::EPSILON);
            (allocated - recipe.baseline_hours).abs() < step
        });

        let base_risk = scenario.baseline_kpis.risk_score;
        let raw_risk = if unchanged {
            base_risk
        } else {
            let overload_pressure = overload_hours / capacity.max(1.0) * tuning.overload_weight;
            let cost_pressure = cost_delta_pct.abs() * tuning.cost_weight;
            let waste_pressure = waste_delta_pct.abs() * tuning.waste_weight;
            base_risk + overload_pressure + cost_pressure + waste_pressure
        };
        let risk_score = finite_or(raw_risk, tuning.risk_floor)
            .clamp(tuning.risk_floor, tuning.risk_ceiling);

        DerivedMetrics {
            period: scenario.period.clone(),
            total_allocated_hours: finite_or(total_allocated, 0.0),
            total_capacity_hours: finite_or(capacity, 0.0),
            overload_hours: finite_or(overload_hours, 0.0),
            slack_or_shortfall_hours: finite_or(slack_or_shortfall, 0.0),
            cost_delta_pct: finite_or(cost_delta_pct, 0.0),
            waste_delta_pct: finite_or(waste_delta_pct, 0.0),
            risk_score,
        }
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 有限数守卫: 非有限值回退哨兵
fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
