// ==========================================
// 面粉制粉产销计划系统 - 演示入口
// ==========================================
// 用途: 跑一遍参考场景的 what-if 模拟并打印派生指标
// (正式形态下由仪表盘UI控制器调用 PlanningApi)
// ==========================================

use chrono::NaiveDate;
use flour_milling_aps::api::{BaselineBundle, InstallOutcome, PlanningApi};
use flour_milling_aps::domain::{BaselineKpis, BaselineRecipeRow, CapacityRow, EligibilityRow};
use flour_milling_aps::Horizon;

fn main() {
    flour_milling_aps::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持核心", flour_milling_aps::APP_NAME);
    tracing::info!("系统版本: {}", flour_milling_aps::VERSION);
    tracing::info!("==================================================");

    let mut api = PlanningApi::new();

    // 选择 2026-01 月度周期
    let date = NaiveDate::from_ymd_opt(2026, 1, 15).expect("合法日期");
    let ticket = api.select_period_date(date, Horizon::Month);
    tracing::info!("当前周期: {} (拉取代数 {})", ticket.period, ticket.generation);

    // 参考场景: R1 基线480h成本320, R2 基线360h成本295, 产能900h
    let bundle = BaselineBundle {
        recipe_rows: vec![
            BaselineRecipeRow {
                recipe_id: "R1".to_string(),
                recipe_name: "特精粉配方".to_string(),
                period: ticket.period.clone(),
                scheduled_hours: 480.0,
                cost_per_hour: 320.0,
                avg_waste_pct: 2.0,
            },
            BaselineRecipeRow {
                recipe_id: "R2".to_string(),
                recipe_name: "标准粉配方".to_string(),
                period: ticket.period.clone(),
                scheduled_hours: 360.0,
                cost_per_hour: 295.0,
                avg_waste_pct: 3.0,
            },
        ],
        capacity_rows: vec![CapacityRow {
            mill_id: "M1".to_string(),
            mill_name: "一号磨机".to_string(),
            period: ticket.period.clone(),
            available_hours: 900.0,
            scheduled_hours: 840.0,
            overload_hours: 0.0,
            utilization_pct: 93.3,
        }],
        eligibility_rows: vec![EligibilityRow {
            recipe_id: "R1".to_string(),
            recipe_name: "特精粉配方".to_string(),
            flour_type_id: "F1".to_string(),
            flour_type: "特精粉".to_string(),
            is_eligible: Some(true),
        }],
        baseline_kpis: BaselineKpis {
            planned_recipe_hours: 840.0,
            available_mill_hours: 900.0,
            slack_shortfall_hours: 60.0,
            wheat_cost_index: 102.4,
            waste_impact_pct: 2.4,
            cost_impact_pct: 0.0,
            risk_score: 35.0,
        },
    };

    match api.install_baseline(&ticket, bundle) {
        InstallOutcome::Installed(metrics) => {
            tracing::info!(
                "基线就绪: 分配 {:.1}h / 产能 {:.1}h, 风险 {:.1}",
                metrics.total_allocated_hours,
                metrics.total_capacity_hours,
                metrics.risk_score
            );
        }
        InstallOutcome::StaleDiscarded { .. } => {
            tracing::warn!("基线安装被丢弃,退出");
            return;
        }
    }

    // what-if: 将 R1 提到 600h,制造 60h 超限
    match api.set_allocation("R1", 600.0) {
        Ok(metrics) => {
            tracing::info!(
                "R1 -> 600h: 分配 {:.1}h, 超限 {:.1}h, 富余/缺口 {:.1}h, 成本偏离 {:.2}%, 风险 {:.1} ({})",
                metrics.total_allocated_hours,
                metrics.overload_hours,
                metrics.slack_or_shortfall_hours,
                metrics.cost_delta_pct,
                metrics.risk_score,
                metrics.risk_level()
            );
        }
        Err(e) => tracing::error!("分配变更失败: {}", e),
    }

    if let Ok(alerts) = api.alerts() {
        for alert in alerts {
            tracing::warn!("[{}] {}: {}", alert.severity, alert.title, alert.message);
        }
    }

    // 全部重置,回到基线指标
    if let Ok(metrics) = api.reset_all() {
        tracing::info!(
            "已重置: 分配 {:.1}h, 风险 {:.1}",
            metrics.total_allocated_hours,
            metrics.risk_score
        );
        match serde_json::to_string_pretty(&metrics) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("指标序列化失败: {}", e),
        }
    }
}
