// ==========================================
// 面粉制粉产销计划系统 - 计划模拟API
// ==========================================
// 职责: UI控制器的业务接口门面 (生产计划页)
// 输入: 选区/滑杆事件; 输出: 派生指标/滑杆视图/告警
// 红线: 滑杆越界静默截断,指标永远可渲染;
//       错误只在控制器调用时序不当时出现
// ==========================================

use crate::api::error::ApiError;
use crate::api::session::{BaselineBundle, FetchTicket, InstallOutcome, PlanningSession};
use crate::config::PlanningTuning;
use crate::domain::alert::PlanningAlert;
use crate::domain::allocation::SliderBounds;
use crate::domain::eligibility::EligibilityMatrix;
use crate::domain::metrics::DerivedMetrics;
use crate::domain::types::Horizon;
use crate::engine::RecipeSlider;
use chrono::NaiveDate;

// ==========================================
// PlanningApi - 计划模拟API
// ==========================================
pub struct PlanningApi {
    session: PlanningSession,
}

impl PlanningApi {
    pub fn new() -> Self {
        Self {
            session: PlanningSession::new(),
        }
    }

    /// 使用调参总集构造
    pub fn with_tuning(tuning: PlanningTuning) -> Self {
        Self {
            session: PlanningSession::with_tuning(tuning),
        }
    }

    pub fn with_session(session: PlanningSession) -> Self {
        Self { session }
    }

    // ==========================================
    // 选区
    // ==========================================

    /// 按日期+粒度选择周期,返回拉取凭据
    pub fn select_period_date(&mut self, date: NaiveDate, horizon: Horizon) -> FetchTicket {
        self.session.select_date(date, horizon)
    }

    /// 按自定义区间选择周期 (粒度自动挑选),返回拉取凭据
    pub fn select_period_range(&mut self, from: NaiveDate, to: NaiveDate) -> FetchTicket {
        self.session.select_range(from, to)
    }

    /// 当前周期标签
    pub fn current_period(&self) -> Result<String, ApiError> {
        self.session
            .current_period()
            .map(|p| p.to_string())
            .ok_or_else(|| ApiError::EngineUninitialized("尚未选择周期".to_string()))
    }

    /// 安装拉取回来的基线数据 (代数过期的结果被丢弃)
    pub fn install_baseline(
        &mut self,
        ticket: &FetchTicket,
        bundle: BaselineBundle,
    ) -> InstallOutcome {
        self.session.install_baseline(ticket, bundle)
    }

    // ==========================================
    // 分配变更
    // ==========================================

    /// 设置某配方的当前工时,返回重算后的指标
    ///
    /// 工时先收敛到该配方的固定滑杆边界 (静默截断);
    /// 未知配方ID返回 RecipeNotFound,引擎状态不变
    pub fn set_allocation(&mut self, recipe_id: &str, hours: f64) -> Result<DerivedMetrics, ApiError> {
        self.ensure_ready()?;

        if self.session.engine().allocation_of(recipe_id).is_none() {
            return Err(ApiError::RecipeNotFound(recipe_id.to_string()));
        }

        Ok(self.session.engine_mut().set_allocation(recipe_id, hours))
    }

    /// 将单个配方重置回基线
    pub fn reset_recipe(&mut self, recipe_id: &str) -> Result<DerivedMetrics, ApiError> {
        self.ensure_ready()?;

        if self.session.engine().allocation_of(recipe_id).is_none() {
            return Err(ApiError::RecipeNotFound(recipe_id.to_string()));
        }

        Ok(self.session.engine_mut().reset_recipe(recipe_id))
    }

    /// 将全部配方重置回基线 (指标回到 initialize 时刻)
    pub fn reset_all(&mut self) -> Result<DerivedMetrics, ApiError> {
        self.ensure_ready()?;
        Ok(self.session.engine_mut().reset_all())
    }

    // ==========================================
    // 只读查询
    // ==========================================

    /// 当前派生指标 (幂等读)
    pub fn derived_metrics(&self) -> Result<DerivedMetrics, ApiError> {
        self.ensure_ready()?;
        Ok(self.session.engine().derived_metrics())
    }

    /// initialize 时刻的基线指标快照
    pub fn baseline_metrics(&self) -> Result<DerivedMetrics, ApiError> {
        self.ensure_ready()?;
        Ok(self.session.engine().baseline_metrics())
    }

    /// 某配方的固定滑杆边界
    pub fn slider_bounds(&self, recipe_id: &str) -> Result<SliderBounds, ApiError> {
        self.ensure_ready()?;
        self.session
            .engine()
            .slider_bounds(recipe_id)
            .ok_or_else(|| ApiError::RecipeNotFound(recipe_id.to_string()))
    }

    /// 全部滑杆视图
    pub fn list_sliders(&self) -> Result<Vec<RecipeSlider>, ApiError> {
        self.ensure_ready()?;
        Ok(self.session.engine().sliders())
    }

    /// 适用矩阵 (只读参考,不参与约束)
    pub fn eligibility_matrix(&self) -> Result<EligibilityMatrix, ApiError> {
        self.ensure_ready()?;
        self.session
            .engine()
            .eligibility()
            .cloned()
            .ok_or_else(|| ApiError::EngineUninitialized("基线尚未载入".to_string()))
    }

    /// 提示性告警 (超限/高风险)
    pub fn alerts(&self) -> Result<Vec<PlanningAlert>, ApiError> {
        self.ensure_ready()?;
        Ok(self.session.engine().alerts())
    }

    /// 底层会话 (测试/高级用法)
    pub fn session(&self) -> &PlanningSession {
        &self.session
    }

    // ==========================================
    // 内部方法
    // ==========================================

    fn ensure_ready(&self) -> Result<(), ApiError> {
        if self.session.engine().is_ready() {
            Ok(())
        } else {
            Err(ApiError::EngineUninitialized(
                "基线尚未载入,请先选择周期并安装基线数据".to_string(),
            ))
        }
    }
}

impl Default for PlanningApi {
    fn default() -> Self {
        Self::new()
    }
}
