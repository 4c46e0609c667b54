// ==========================================
// AllocationEngine 引擎集成测试
// ==========================================
// 测试目标: 验证 what-if 模拟的派生指标与不变式
// 覆盖范围: 基线载入/滑杆变更/重置往返/超限/风险夹取/空基线
// ==========================================

use flour_milling_aps::domain::{
    BaselineKpis, BaselineRecipeRow, CapacityRow, EligibilityRow, RiskLevel,
};
use flour_milling_aps::engine::AllocationEngine;
use flour_milling_aps::logging;

// ==========================================
// 测试辅助函数
// ==========================================

const PERIOD: &str = "2026-01";

/// 创建测试用的配方基线行
fn create_recipe_row(
    recipe_id: &str,
    scheduled_hours: f64,
    cost_per_hour: f64,
    avg_waste_pct: f64,
) -> BaselineRecipeRow {
    BaselineRecipeRow {
        recipe_id: recipe_id.to_string(),
        recipe_name: format!("配方{}", recipe_id),
        period: PERIOD.to_string(),
        scheduled_hours,
        cost_per_hour,
        avg_waste_pct,
    }
}

/// 创建测试用的磨机产能行
fn create_capacity_row(mill_id: &str, available_hours: f64) -> CapacityRow {
    CapacityRow {
        mill_id: mill_id.to_string(),
        mill_name: format!("磨机{}", mill_id),
        period: PERIOD.to_string(),
        available_hours,
        scheduled_hours: 0.0,
        overload_hours: 0.0,
        utilization_pct: 0.0,
    }
}

/// 创建测试用的适用矩阵行
fn create_eligibility_row(flour_type_id: &str, recipe_id: &str) -> EligibilityRow {
    EligibilityRow {
        recipe_id: recipe_id.to_string(),
        recipe_name: format!("配方{}", recipe_id),
        flour_type_id: flour_type_id.to_string(),
        flour_type: format!("品类{}", flour_type_id),
        is_eligible: Some(true),
    }
}

/// 参考场景: R1 480h/成本320/损耗2.0, R2 360h/成本295/损耗3.0, 产能900h, 基线风险35
fn create_reference_engine() -> AllocationEngine {
    let mut engine = AllocationEngine::new();
    engine.initialize(
        PERIOD,
        &[
            create_recipe_row("R1", 480.0, 320.0, 2.0),
            create_recipe_row("R2", 360.0, 295.0, 3.0),
        ],
        &[create_capacity_row("M1", 900.0)],
        &[
            create_eligibility_row("F1", "R1"),
            create_eligibility_row("F2", "R2"),
        ],
        BaselineKpis {
            planned_recipe_hours: 840.0,
            available_mill_hours: 900.0,
            slack_shortfall_hours: 60.0,
            wheat_cost_index: 100.0,
            waste_impact_pct: 2.4,
            cost_impact_pct: 0.0,
            risk_score: 35.0,
        },
    );
    engine
}

// ==========================================
// 测试用例 1: 基线载入
// ==========================================

#[test]
fn test_initialize_yields_baseline_metrics() {
    let engine = create_reference_engine();
    let metrics = engine.derived_metrics();

    assert_eq!(metrics.period, PERIOD);
    assert_eq!(metrics.total_allocated_hours, 840.0);
    assert_eq!(metrics.total_capacity_hours, 900.0);
    assert_eq!(metrics.overload_hours, 0.0);
    assert_eq!(metrics.slack_or_shortfall_hours, 60.0);
    assert_eq!(metrics.cost_delta_pct, 0.0);
    assert_eq!(metrics.waste_delta_pct, 0.0);
    // 分配 == 基线: 风险评分就是外部给的基线评分
    assert_eq!(metrics.risk_score, 35.0);
}

#[test]
fn test_initialize_fixes_slider_bounds_from_baseline() {
    let engine = create_reference_engine();

    // R1 基线480: max = max(1000, round(480*1.5)=720) = 1000, 步长5
    let bounds = engine.slider_bounds("R1").unwrap();
    assert_eq!(bounds.min_hours, 0.0);
    assert_eq!(bounds.max_hours, 1000.0);
    assert_eq!(bounds.step_hours, 5.0);
}

#[test]
fn test_large_baseline_slider_bounds() {
    let mut engine = AllocationEngine::new();
    engine.initialize(
        PERIOD,
        &[create_recipe_row("R1", 800.0, 100.0, 1.0)],
        &[create_capacity_row("M1", 900.0)],
        &[],
        BaselineKpis::default(),
    );

    // 基线800: max = max(1000, round(1200)) = 1200, 粗步长10
    let bounds = engine.slider_bounds("R1").unwrap();
    assert_eq!(bounds.max_hours, 1200.0);
    assert_eq!(bounds.step_hours, 10.0);
}

// ==========================================
// 测试用例 2: 参考场景的数值
// ==========================================

#[test]
fn test_raise_r1_to_600_reference_numbers() {
    logging::init_test();

    let mut engine = create_reference_engine();
    let metrics = engine.set_allocation("R1", 600.0);

    // 480+360 基线, R1 提到 600: 合计960, 超限60, 缺口-60
    assert_eq!(metrics.total_allocated_hours, 960.0);
    assert_eq!(metrics.overload_hours, 60.0);
    assert_eq!(metrics.slack_or_shortfall_hours, -60.0);

    // 基线成本 480*320+360*295=259200, 当前 600*320+360*295=298200
    // 偏离 = 39000/259200*100 ≈ 15.0463%
    assert!((metrics.cost_delta_pct - 15.046296296).abs() < 1e-6);

    // 加权平均损耗: 基线 2040/840≈2.4286, 当前 2280/960=2.375
    assert!((metrics.waste_delta_pct - (-0.053571428)).abs() < 1e-6);

    // 风险: 35 + 60/900*80 + 15.0463*1.5 + 0.0536*8 ≈ 63.33
    assert!((metrics.risk_score - 63.331349).abs() < 1e-3);
    assert_eq!(metrics.risk_level(), RiskLevel::Orange);
}

#[test]
fn test_overload_matches_formula_for_reachable_states() {
    let mut engine = create_reference_engine();

    for hours in [0.0, 120.0, 480.0, 600.0, 1000.0] {
        let metrics = engine.set_allocation("R1", hours);
        assert!(metrics.overload_hours >= 0.0);
        assert_eq!(
            metrics.overload_hours,
            (metrics.total_allocated_hours - metrics.total_capacity_hours).max(0.0)
        );
    }
}

// ==========================================
// 测试用例 3: 幂等与往返律
// ==========================================

#[test]
fn test_set_allocation_is_idempotent() {
    let mut engine = create_reference_engine();

    let first = engine.set_allocation("R1", 600.0);
    let second = engine.set_allocation("R1", 600.0);
    assert_eq!(first, second);
}

#[test]
fn test_reset_all_round_trips_to_initialize_metrics() {
    let mut engine = create_reference_engine();
    let initial = engine.derived_metrics();

    // 任意折腾后全量重置
    engine.set_allocation("R1", 1000.0);
    engine.set_allocation("R2", 0.0);
    engine.set_allocation("R1", 37.0);
    let restored = engine.reset_all();

    assert_eq!(restored, initial);
    assert_eq!(engine.derived_metrics(), initial);
}

#[test]
fn test_reset_single_recipe() {
    let mut engine = create_reference_engine();

    engine.set_allocation("R1", 600.0);
    engine.set_allocation("R2", 100.0);
    let metrics = engine.reset_recipe("R1");

    assert_eq!(engine.allocation_of("R1"), Some(480.0));
    assert_eq!(engine.allocation_of("R2"), Some(100.0));
    assert_eq!(metrics.total_allocated_hours, 580.0);
}

// ==========================================
// 测试用例 4: 夹取与容差
// ==========================================

#[test]
fn test_out_of_range_input_is_clamped_not_rejected() {
    let mut engine = create_reference_engine();

    engine.set_allocation("R1", 99999.0);
    assert_eq!(engine.allocation_of("R1"), Some(1000.0));

    engine.set_allocation("R1", -50.0);
    assert_eq!(engine.allocation_of("R1"), Some(0.0));
}

#[test]
fn test_risk_score_clamped_under_extreme_inputs() {
    let mut engine = create_reference_engine();

    // 双滑杆拉满: 成本/超限压力远超上界,评分必须夹在 [0,100]
    engine.set_allocation("R1", 1000.0);
    let metrics = engine.set_allocation("R2", 1000.0);
    assert!(metrics.risk_score >= 0.0 && metrics.risk_score <= 100.0);
    assert_eq!(metrics.risk_score, 100.0);
    assert_eq!(metrics.risk_level(), RiskLevel::Red);

    // 全部清零同样不越界
    engine.set_allocation("R1", 0.0);
    let metrics = engine.set_allocation("R2", 0.0);
    assert!(metrics.risk_score >= 0.0 && metrics.risk_score <= 100.0);
}

#[test]
fn test_sub_step_change_keeps_baseline_risk() {
    let mut engine = create_reference_engine();

    // R1 步长5: 偏移2小时在容差带内,视为"未变",风险保持基线评分
    let metrics = engine.set_allocation("R1", 482.0);
    assert_eq!(metrics.total_allocated_hours, 842.0);
    assert_eq!(metrics.risk_score, 35.0);

    // 超出一个步长就按公式抬升
    let metrics = engine.set_allocation("R1", 490.0);
    assert!(metrics.risk_score > 35.0);
}

#[test]
fn test_bounds_do_not_move_when_other_sliders_drag() {
    let mut engine = create_reference_engine();
    let before = engine.slider_bounds("R2").unwrap();

    engine.set_allocation("R1", 1000.0);
    engine.set_allocation("R2", 700.0);

    assert_eq!(engine.slider_bounds("R2").unwrap(), before);
}

// ==========================================
// 测试用例 5: 退化输入
// ==========================================

#[test]
fn test_empty_baseline_initializes_with_zero_metrics() {
    let mut engine = AllocationEngine::new();
    let metrics = engine.initialize(PERIOD, &[], &[], &[], BaselineKpis::default());

    assert!(engine.is_ready());
    assert_eq!(metrics.total_allocated_hours, 0.0);
    assert_eq!(metrics.total_capacity_hours, 0.0);
    assert_eq!(metrics.overload_hours, 0.0);
    assert_eq!(metrics.slack_or_shortfall_hours, 0.0);
    assert_eq!(metrics.cost_delta_pct, 0.0);
    assert_eq!(metrics.waste_delta_pct, 0.0);
    assert_eq!(metrics.risk_score, 0.0);
}

#[test]
fn test_zero_cost_baseline_has_zero_cost_delta() {
    let mut engine = AllocationEngine::new();
    engine.initialize(
        PERIOD,
        &[create_recipe_row("R1", 100.0, 0.0, 1.0)],
        &[create_capacity_row("M1", 200.0)],
        &[],
        BaselineKpis::default(),
    );

    // 基线成本为0: 比率回退哨兵0,不出 NaN/Inf
    let metrics = engine.set_allocation("R1", 150.0);
    assert_eq!(metrics.cost_delta_pct, 0.0);
    assert!(metrics.risk_score.is_finite());
}

#[test]
fn test_unknown_recipe_is_ignored_by_engine() {
    let mut engine = create_reference_engine();
    let before = engine.derived_metrics();

    // 分配键集合不变式: 未知ID不得进入分配表
    let after = engine.set_allocation("NO_SUCH_RECIPE", 500.0);
    assert_eq!(after, before);
    assert_eq!(engine.allocation_of("NO_SUCH_RECIPE"), None);
}

#[test]
fn test_non_finite_input_is_ignored() {
    let mut engine = create_reference_engine();
    let before = engine.derived_metrics();

    assert_eq!(engine.set_allocation("R1", f64::NAN), before);
    assert_eq!(engine.set_allocation("R1", f64::INFINITY), before);
    assert_eq!(engine.allocation_of("R1"), Some(480.0));
}

// ==========================================
// 测试用例 6: 多行聚合与适用矩阵
// ==========================================

#[test]
fn test_multi_row_recipe_aggregation() {
    let mut engine = AllocationEngine::new();
    engine.initialize(
        PERIOD,
        &[
            create_recipe_row("R1", 200.0, 300.0, 2.0),
            create_recipe_row("R1", 200.0, 320.0, 4.0),
        ],
        &[create_capacity_row("M1", 900.0)],
        &[],
        BaselineKpis::default(),
    );

    // 工时求和,成本按工时加权: (200*300+200*320)/400 = 310
    let sliders = engine.sliders();
    assert_eq!(sliders.len(), 1);
    assert_eq!(sliders[0].baseline_hours, 400.0);

    // 提到440: 成本偏离 = 40*310 / (400*310) * 100 = 10%
    let metrics = engine.set_allocation("R1", 440.0);
    assert!((metrics.cost_delta_pct - 10.0).abs() < 1e-9);
}

#[test]
fn test_eligibility_matrix_is_advisory_readonly() {
    let mut engine = create_reference_engine();

    let matrix = engine.eligibility().unwrap().clone();
    assert!(matrix.is_eligible("F1", "R1"));
    assert!(!matrix.is_eligible("F1", "R2"));
    assert_eq!(matrix.eligible_recipes("F2"), vec!["R2".to_string()]);

    // 矩阵不拦截任何调整: R2 对 F1 不适用,依然可以被拉高/清零
    let metrics = engine.set_allocation("R2", 0.0);
    assert_eq!(engine.allocation_of("R2"), Some(0.0));
    assert!(metrics.risk_score.is_finite());
}

// ==========================================
// 测试用例 7: 告警
// ==========================================

#[test]
fn test_overload_produces_capacity_alert() {
    let mut engine = create_reference_engine();

    assert!(engine.alerts().iter().all(|a| a.alert_type != "capacity_overload"));

    engine.set_allocation("R1", 600.0);
    let alerts = engine.alerts();
    let overload = alerts
        .iter()
        .find(|a| a.alert_type == "capacity_overload")
        .expect("超限后应产生产能告警");
    assert_eq!(overload.period, PERIOD);
    assert!(overload.message.contains("60.0"));
}
