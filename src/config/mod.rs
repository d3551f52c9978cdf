//! 统一配置系统
//!
//! 提供TOML/JSON配置文件和环境变量覆盖

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub mod simd;

pub use simd::SimdConfig;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 主配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestbedConfig {
    /// SIMD加速配置
    #[serde(default)]
    pub simd: SimdConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TestbedConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 按扩展名选择格式加载，`.json`之外的都按TOML解析
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从进程环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// 用任意键值来源覆盖配置，无法解析的值保持原配置不变
    ///
    /// 识别的键：`TESTBED_SIMD_ENABLED`、`TESTBED_SIMD_BACKEND`、
    /// `TESTBED_SIMD_BATCH_SIZE`、`TESTBED_LOG_LEVEL`。
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // SIMD配置
        if let Some(val) = lookup("TESTBED_SIMD_ENABLED") {
            match val.trim().parse() {
                Ok(enabled) => self.simd.enabled = enabled,
                Err(_) => tracing::warn!(
                    "Ignoring TESTBED_SIMD_ENABLED: expected 'true' or 'false', got '{}'",
                    val
                ),
            }
        }
        if let Some(val) = lookup("TESTBED_SIMD_BACKEND") {
            self.simd.force_backend = match val.trim() {
                "" | "auto" => None,
                name => Some(name.to_string()),
            };
        }
        if let Some(val) = lookup("TESTBED_SIMD_BATCH_SIZE") {
            match val.trim().parse() {
                Ok(size) => self.simd.batch_size = size,
                Err(e) => tracing::warn!("Ignoring TESTBED_SIMD_BATCH_SIZE '{}': {}", val, e),
            }
        }

        // 日志配置
        if let Some(val) = lookup("TESTBED_LOG_LEVEL") {
            match val.parse() {
                Ok(level) => self.logging.level = level,
                Err(e) => tracing::warn!("Ignoring TESTBED_LOG_LEVEL: {}", e),
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.simd.validate()?;
        Ok(())
    }

    /// 加载配置文件，路径为空时查找`./testbed.toml`和`./testbed.json`，都不存在时使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        for candidate in ["testbed.toml", "testbed.json"] {
            if Path::new(candidate).exists() {
                return Self::from_file(candidate);
            }
        }

        tracing::debug!("Using default configuration");
        Ok(Self::default())
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别，设置了`RUST_LOG`时以环境变量为准
    pub level: LogLevel,

    /// 是否输出ANSI颜色
    pub ansi: bool,
}

use crate::impl_default;

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    ansi: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown log level '{}'",
                other
            ))),
        }
    }
}
