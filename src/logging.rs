// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 日志一律写 stderr，stdout 留给模拟结果 JSON
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的过滤器
pub const DEFAULT_FILTER: &str = "info";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 人读文本 (默认)
    #[default]
    Text,
    /// 每行一个 JSON 对象，带当前 span (含 run_id)，供日志采集
    Json,
}

/// 构造过滤器
///
/// # 规则
/// - RUST_LOG 可解析时优先，例如 `RUST_LOG=molty_lining::engine=debug` 输出每轮迭代
/// - 否则使用 `fallback`
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// 初始化日志系统
///
/// # 参数
/// - `format`: 输出格式
///
/// # 示例
/// ```no_run
/// use molty_lining::logging::{self, LogFormat};
/// logging::init(LogFormat::Text);
/// ```
pub fn init(format: LogFormat) {
    let builder = fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.with_target(true).with_line_number(true).init(),
        LogFormat::Json => builder.json().with_current_span(true).init(),
    }
}

/// 测试用日志: debug 级别，输出交给测试框架捕获；可重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
