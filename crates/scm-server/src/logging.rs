//! 日誌系統初始化

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "scm_server=info,scm_calc=info";

/// 初始化日誌系統
///
/// RUST_LOG 未設定時使用 `scm_server=info,scm_calc=info`，
/// 例如 `RUST_LOG=scm_calc=debug` 可看到每次計算的中間值。
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}
