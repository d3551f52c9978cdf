//! 统一错误处理模块
//!
//! 数学运算本身从不返回错误，错误只来自配置加载和加速后端选择。

use crate::config::ConfigError;
use thiserror::Error;

/// 测试平台错误类型
#[derive(Error, Debug)]
pub enum TestbedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SIMD backend '{0}' is not available on this CPU")]
    BackendUnavailable(String),

    #[error("General error: {0}")]
    General(String),
}

pub type TestbedResult<T> = Result<T, TestbedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TestbedError::BackendUnavailable("neon".to_string());
        assert_eq!(err.to_string(), "SIMD backend 'neon' is not available on this CPU");

        let err: TestbedError = ConfigError::ValidationError("batch_size must be > 0".into()).into();
        assert!(err.to_string().contains("batch_size"));
        assert!(matches!(err, TestbedError::Config(_)));
    }

    #[test]
    fn test_io_conversion() {
        fn read_missing() -> TestbedResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.toml")?)
        }
        assert!(matches!(read_missing(), Err(TestbedError::Io(_))));
    }
}
