use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};
use testbed_simd::{BatchConfig, SimdBackend};

/// SIMD配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimdConfig {
    /// 是否启用
    pub enabled: bool,

    /// 强制使用特定指令集（如`"sse2"`、`"neon"`）
    pub force_backend: Option<String>,

    /// 批量处理大小
    pub batch_size: usize,

    /// 大批量时是否多线程处理
    pub use_threading: bool,

    /// 工作线程数（0表示自动）
    pub num_threads: usize,
}

impl_default!(SimdConfig {
    enabled: true,
    force_backend: None,
    batch_size: 1024,
    use_threading: true,
    num_threads: 0, // 自动
});

impl SimdConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "SIMD batch_size must be greater than 0".to_string(),
            ));
        }
        if let Some(name) = &self.force_backend {
            if SimdBackend::from_name(name).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown SIMD backend '{}'",
                    name
                )));
            }
        }
        Ok(())
    }

    /// 请求的后端，不检查CPU是否支持
    ///
    /// 未启用时为`Scalar`，未强制指定时为当前CPU的最佳后端。
    pub fn requested_backend(&self) -> ConfigResult<SimdBackend> {
        if !self.enabled {
            return Ok(SimdBackend::Scalar);
        }
        match &self.force_backend {
            Some(name) => SimdBackend::from_name(name).ok_or_else(|| {
                ConfigError::ValidationError(format!("Unknown SIMD backend '{}'", name))
            }),
            None => Ok(SimdBackend::best_available()),
        }
    }

    /// 转换为批处理配置
    pub fn batch_config(&self, backend: SimdBackend) -> BatchConfig {
        BatchConfig {
            batch_size: self.batch_size,
            backend,
            use_threading: self.use_threading,
            num_threads: self.num_threads,
        }
    }
}
