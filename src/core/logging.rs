//! 日志初始化

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// 初始化日志系统
///
/// 设置了`RUST_LOG`时以环境变量为准，否则使用配置中的级别。
/// 可以重复调用，已有全局订阅者时返回`false`。
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(target: "testbed", level = %config.level, "Logging initialized");
    }
    installed
}
