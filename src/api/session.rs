// ==========================================
// 面粉制粉产销计划系统 - 计划会话
// ==========================================
// 职责: 一个UI会话的选区状态 + 模拟引擎生命周期
// ==========================================
// 并发口径: 单会话单线程,同步重算,无锁
// 唯一的异步边界是外部的数据拉取; 两个周期的在途拉取
// 以"最后选择胜出"裁决: 显式的拉取代数 (generation) 比较,
// 不依赖网络响应的先后顺序
// ==========================================

use crate::config::PlanningTuning;
use crate::domain::eligibility::EligibilityRow;
use crate::domain::kpi::BaselineKpis;
use crate::domain::metrics::DerivedMetrics;
use crate::domain::mill::CapacityRow;
use crate::domain::recipe::BaselineRecipeRow;
use crate::domain::types::{Horizon, PeriodTag};
use crate::engine::{AllocationEngine, PeriodResolver};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// FetchTicket - 拉取凭据
// ==========================================
// 选区变化时签发,控制器把它随数据拉取带出去,
// 数据回来时凭它安装基线; 代数过期的安装一律丢弃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchTicket {
    pub generation: u64,     // 拉取代数 (单调递增)
    pub period: PeriodTag,   // 选区对应的周期标签
    pub horizon: Horizon,    // 选区对应的粒度
}

// ==========================================
// BaselineBundle - 基线数据包
// ==========================================
// 外部数据拉取落地后的四组只读行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselineBundle {
    pub recipe_rows: Vec<BaselineRecipeRow>,
    pub capacity_rows: Vec<CapacityRow>,
    pub eligibility_rows: Vec<EligibilityRow>,
    pub baseline_kpis: BaselineKpis,
}

// ==========================================
// InstallOutcome - 基线安装结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InstallOutcome {
    /// 安装成功,引擎就绪,附初始指标
    Installed(DerivedMetrics),
    /// 凭据代数过期,结果被丢弃 (最后选择胜出)
    StaleDiscarded { ticket_generation: u64, current_generation: u64 },
}

// ==========================================
// PlanningSession - 计划会话
// ==========================================
// 每个浏览器页签/UI会话独占一个实例
pub struct PlanningSession {
    resolver: PeriodResolver,
    engine: AllocationEngine,
    generation: u64,
    current_period: Option<PeriodTag>,
    current_horizon: Option<Horizon>,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self::with_parts(PeriodResolver::new(), AllocationEngine::new())
    }

    /// 使用调参总集构造 (粒度阈值 + 风险权重 + 滑杆策略)
    pub fn with_tuning(tuning: PlanningTuning) -> Self {
        Self::with_parts(
            PeriodResolver::with_policy(tuning.horizon),
            AllocationEngine::with_tuning(tuning.risk, tuning.slider),
        )
    }

    /// 注入解析器与引擎构造 (测试/调参入口)
    pub fn with_parts(resolver: PeriodResolver, engine: AllocationEngine) -> Self {
        Self {
            resolver,
            engine,
            generation: 0,
            current_period: None,
            current_horizon: None,
        }
    }

    // ==========================================
    // 选区变更
    // ==========================================

    /// 按日期+粒度选择周期
    ///
    /// 递增拉取代数,丢弃旧周期的引擎状态 (用户编辑不跨周期),
    /// 返回控制器随数据拉取携带的凭据
    pub fn select_date(&mut self, date: NaiveDate, horizon: Horizon) -> FetchTicket {
        let period = self.resolver.period_from_date(date, horizon);
        self.begin_selection(period, horizon)
    }

    /// 按自定义日期区间选择周期
    ///
    /// 粒度由区间跨度自动挑选,周期标签取区间起点所在桶
    pub fn select_range(&mut self, from: NaiveDate, to: NaiveDate) -> FetchTicket {
        let horizon = self.resolver.horizon_for_range(from, to);
        let anchor = if from <= to { from } else { to };
        let period = self.resolver.period_from_date(anchor, horizon);
        self.begin_selection(period, horizon)
    }

    fn begin_selection(&mut self, period: PeriodTag, horizon: Horizon) -> FetchTicket {
        self.generation += 1;
        self.engine.discard();
        self.current_period = Some(period.clone());
        self.current_horizon = Some(horizon);

        tracing::info!(
            generation = self.generation,
            period = %period,
            horizon = %horizon,
            "选区变更,旧状态已丢弃"
        );

        FetchTicket {
            generation: self.generation,
            period,
            horizon,
        }
    }

    // ==========================================
    // 基线安装
    // ==========================================

    /// 安装拉取回来的基线数据
    ///
    /// 凭据代数 != 当前代数时丢弃 (对应周期已不是当前选择),
    /// 当前代数则初始化引擎并返回初始指标
    pub fn install_baseline(&mut self, ticket: &FetchTicket, bundle: BaselineBundle) -> InstallOutcome {
        if ticket.generation != self.generation {
            tracing::info!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                period = %ticket.period,
                "过期拉取结果被丢弃 (最后选择胜出)"
            );
            return InstallOutcome::StaleDiscarded {
                ticket_generation: ticket.generation,
                current_generation: self.generation,
            };
        }

        let metrics = self.engine.initialize(
            &ticket.period,
            &bundle.recipe_rows,
            &bundle.capacity_rows,
            &bundle.eligibility_rows,
            bundle.baseline_kpis,
        );

        InstallOutcome::Installed(metrics)
    }

    // ==========================================
    // 访问
    // ==========================================

    pub fn resolver(&self) -> &PeriodResolver {
        &self.resolver
    }

    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AllocationEngine {
        &mut self.engine
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_period(&self) -> Option<&str> {
        self.current_period.as_deref()
    }

    pub fn current_horizon(&self) -> Option<Horizon> {
        self.current_horizon
    }
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self::new()
    }
}
