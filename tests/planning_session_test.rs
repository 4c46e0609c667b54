// ==========================================
// PlanningSession / PlanningApi 集成测试
// ==========================================
// 测试目标: 验证选区生命周期与"最后选择胜出"的代数裁决
// 覆盖范围: 过期拉取丢弃/重选丢状态/未初始化错误/门面全流程
// ==========================================

use chrono::NaiveDate;
use flour_milling_aps::api::{ApiError, BaselineBundle, InstallOutcome, PlanningApi, PlanningSession};
use flour_milling_aps::config::{PlanningTuning, RiskTuning};
use flour_milling_aps::domain::{BaselineKpis, BaselineRecipeRow, CapacityRow};
use flour_milling_aps::logging;
use flour_milling_aps::Horizon;

// ==========================================
// 测试辅助函数
// ==========================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 创建测试用的基线数据包 (两配方一磨机)
fn create_bundle(period: &str) -> BaselineBundle {
    BaselineBundle {
        recipe_rows: vec![
            BaselineRecipeRow {
                recipe_id: "R1".to_string(),
                recipe_name: "配方R1".to_string(),
                period: period.to_string(),
                scheduled_hours: 480.0,
                cost_per_hour: 320.0,
                avg_waste_pct: 2.0,
            },
            BaselineRecipeRow {
                recipe_id: "R2".to_string(),
                recipe_name: "配方R2".to_string(),
                period: period.to_string(),
                scheduled_hours: 360.0,
                cost_per_hour: 295.0,
                avg_waste_pct: 3.0,
            },
        ],
        capacity_rows: vec![CapacityRow {
            mill_id: "M1".to_string(),
            mill_name: "磨机M1".to_string(),
            period: period.to_string(),
            available_hours: 900.0,
            scheduled_hours: 840.0,
            overload_hours: 0.0,
            utilization_pct: 93.3,
        }],
        eligibility_rows: vec![],
        baseline_kpis: BaselineKpis {
            risk_score: 35.0,
            ..BaselineKpis::default()
        },
    }
}

// ==========================================
// 测试用例 1: 选区与凭据
// ==========================================

#[test]
fn test_select_date_issues_monotonic_tickets() {
    let mut session = PlanningSession::new();

    let t1 = session.select_date(date(2026, 1, 15), Horizon::Month);
    let t2 = session.select_date(date(2026, 2, 15), Horizon::Month);

    assert_eq!(t1.period, "2026-01");
    assert_eq!(t2.period, "2026-02");
    assert!(t2.generation > t1.generation);
    assert_eq!(session.current_period(), Some("2026-02"));
}

#[test]
fn test_select_range_picks_horizon_from_span() {
    let mut session = PlanningSession::new();

    let ticket = session.select_range(date(2026, 1, 5), date(2026, 1, 9));
    assert_eq!(ticket.horizon, Horizon::Week);
    assert_eq!(ticket.period, "2026-W02");

    let ticket = session.select_range(date(2026, 1, 1), date(2026, 3, 1));
    assert_eq!(ticket.horizon, Horizon::Month);
    assert_eq!(ticket.period, "2026-01");

    // 写反的区间: 交换后按起点所在桶取标签
    let ticket = session.select_range(date(2027, 6, 1), date(2026, 1, 1));
    assert_eq!(ticket.horizon, Horizon::Year);
    assert_eq!(ticket.period, "2026");
}

// ==========================================
// 测试用例 2: 最后选择胜出
// ==========================================

#[test]
fn test_stale_fetch_is_discarded_by_generation() {
    logging::init_test();

    let mut session = PlanningSession::new();

    // 先选1月,再选2月: 1月的拉取还在途
    let jan_ticket = session.select_date(date(2026, 1, 15), Horizon::Month);
    let feb_ticket = session.select_date(date(2026, 2, 15), Horizon::Month);

    // 1月的数据后到: 代数过期,必须丢弃
    match session.install_baseline(&jan_ticket, create_bundle("2026-01")) {
        InstallOutcome::StaleDiscarded {
            ticket_generation,
            current_generation,
        } => {
            assert_eq!(ticket_generation, jan_ticket.generation);
            assert_eq!(current_generation, feb_ticket.generation);
        }
        InstallOutcome::Installed(_) => panic!("过期拉取不应被安装"),
    }
    assert!(!session.engine().is_ready());

    // 当前选择 (2月) 的数据正常安装
    match session.install_baseline(&feb_ticket, create_bundle("2026-02")) {
        InstallOutcome::Installed(metrics) => {
            assert_eq!(metrics.period, "2026-02");
            assert_eq!(metrics.total_allocated_hours, 840.0);
        }
        InstallOutcome::StaleDiscarded { .. } => panic!("当前代数的拉取应被安装"),
    }
    assert!(session.engine().is_ready());
}

#[test]
fn test_reselect_discards_engine_state() {
    let mut session = PlanningSession::new();

    let ticket = session.select_date(date(2026, 1, 15), Horizon::Month);
    session.install_baseline(&ticket, create_bundle("2026-01"));
    session.engine_mut().set_allocation("R1", 600.0);

    // 周期切换: 用户编辑不跨周期
    session.select_date(date(2026, 2, 15), Horizon::Month);
    assert!(!session.engine().is_ready());
    assert_eq!(session.engine().allocation_of("R1"), None);
}

// ==========================================
// 测试用例 3: 门面错误与全流程
// ==========================================

#[test]
fn test_api_rejects_calls_before_install() {
    let mut api = PlanningApi::new();

    assert!(matches!(
        api.derived_metrics(),
        Err(ApiError::EngineUninitialized(_))
    ));
    assert!(matches!(
        api.set_allocation("R1", 100.0),
        Err(ApiError::EngineUninitialized(_))
    ));
    assert!(matches!(api.reset_all(), Err(ApiError::EngineUninitialized(_))));
    assert!(matches!(api.current_period(), Err(ApiError::EngineUninitialized(_))));
}

#[test]
fn test_api_full_flow() {
    logging::init_test();

    let mut api = PlanningApi::new();

    let ticket = api.select_period_date(date(2026, 1, 15), Horizon::Month);
    assert_eq!(api.current_period().unwrap(), "2026-01");

    let metrics = match api.install_baseline(&ticket, create_bundle("2026-01")) {
        InstallOutcome::Installed(m) => m,
        InstallOutcome::StaleDiscarded { .. } => panic!("安装不应被丢弃"),
    };
    assert_eq!(metrics.risk_score, 35.0);

    // 滑杆变更 -> 指标同步重算
    let metrics = api.set_allocation("R1", 600.0).unwrap();
    assert_eq!(metrics.overload_hours, 60.0);

    // 未知配方走门面要报显式错误
    assert!(matches!(
        api.set_allocation("R9", 100.0),
        Err(ApiError::RecipeNotFound(_))
    ));

    // 滑杆视图与边界
    let sliders = api.list_sliders().unwrap();
    assert_eq!(sliders.len(), 2);
    assert_eq!(api.slider_bounds("R1").unwrap().max_hours, 1000.0);

    // 告警与重置
    assert!(!api.alerts().unwrap().is_empty());
    let restored = api.reset_all().unwrap();
    assert_eq!(restored, api.baseline_metrics().unwrap());
    assert!(api.alerts().unwrap().is_empty());
}

#[test]
fn test_api_with_custom_tuning() {
    // 风险上界压到50: 极端输入下评分夹在自定义上界
    let mut api = PlanningApi::with_tuning(PlanningTuning {
        risk: RiskTuning {
            risk_ceiling: 50.0,
            ..RiskTuning::default()
        },
        ..PlanningTuning::default()
    });

    let ticket = api.select_period_date(date(2026, 1, 15), Horizon::Month);
    api.install_baseline(&ticket, create_bundle("2026-01"));

    let metrics = api.set_allocation("R1", 1000.0).unwrap();
    assert_eq!(metrics.risk_score, 50.0);
}
