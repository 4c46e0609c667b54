// ==========================================
// 面粉制粉产销计划系统 - 日志初始化
// ==========================================
// 基于 tracing / tracing-subscriber
// 级别由 RUST_LOG 环境变量控制
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 级别过滤器,缺省 info
///   例如 RUST_LOG=debug 或 RUST_LOG=flour_milling_aps=trace
///
/// # 示例
/// ```no_run
/// use flour_milling_aps::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 测试环境日志初始化 (输出接入测试捕获,重复调用安全)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
