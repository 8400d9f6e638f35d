//! ログ初期化
//!
//! RUST_LOG があればそれを優先し、無ければ info（--verbose で debug）。

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(verbose: bool) -> Result<(), String> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cellscope={0},cellscope_common={0}", default_level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("ログ初期化に失敗: {}", e))
}
