//! # testbed_simd
//!
//! testbed数学库的SIMD内核，提供CPU特性检测和行主序`f32`数组上的向量化运算。
//!
//! ## 特性
//!
//! - **跨平台支持**: x86_64 (SSE2/SSE4.1/AVX/AVX2) 和 aarch64 (NEON)
//! - **自动检测**: 运行时检测CPU特性，选择最优SIMD后端
//! - **安全回退**: 请求的后端不被当前CPU支持时自动降级为标量实现
//! - **批量处理**: 批量矩阵转置与向量变换，可选多线程
//!
//! ## 快速开始
//!
//! ```rust
//! use testbed_simd::{SimdBackend, SimdKernels};
//!
//! let kernels = SimdKernels::new(SimdBackend::best_available());
//!
//! let identity = [
//!     1.0, 0.0, 0.0, 0.0,
//!     0.0, 1.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0, 0.0,
//!     0.0, 0.0, 0.0, 1.0,
//! ];
//! let product = kernels.mat4_mul(&identity, &identity);
//! assert_eq!(product, identity);
//! ```
//!
//! ## 模块
//!
//! - [`cpu_detect`]: CPU特性检测
//! - [`math`]: 标量与SIMD内核以及运行时分发
//! - [`batch`]: 批量处理（转置、变换）
//!
//! 所有内核都使用行主序布局：4x4矩阵为`[f32; 16]`，3x4仿射矩阵为`[f32; 12]`，
//! 四元数为`[w, x, y, z]`。

pub mod batch;
pub mod cpu_detect;
pub mod math;

// 重新导出主要类型
pub use batch::{BatchConfig, BatchStats, BatchTransform};
pub use cpu_detect::{detect_cpu_features, print_cpu_info, CpuFeatures, CpuVendor};
pub use math::SimdKernels;

/// SIMD向量宽度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdWidth {
    /// 128位 (SSE, NEON)
    W128,
    /// 256位 (AVX, AVX2)
    W256,
}

/// SIMD后端类型
///
/// 表示可用的SIMD指令集后端。AVX/AVX2上的4分量运算仍使用128位内核。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimdBackend {
    /// 标量回退实现（无SIMD）
    Scalar,
    /// SSE2 (Intel/AMD)
    Sse2,
    /// SSE4.1 (Intel/AMD)
    Sse41,
    /// AVX (Intel/AMD)
    Avx,
    /// AVX2 (Intel/AMD)
    Avx2,
    /// ARM NEON (aarch64)
    Neon,
}

impl SimdBackend {
    /// 所有后端，按名称解析时使用
    pub const ALL: [SimdBackend; 6] = [
        SimdBackend::Scalar,
        SimdBackend::Sse2,
        SimdBackend::Sse41,
        SimdBackend::Avx,
        SimdBackend::Avx2,
        SimdBackend::Neon,
    ];

    /// 获取当前平台最优的SIMD后端
    ///
    /// 根据运行时检测的CPU特性，返回当前平台支持的最高性能SIMD后端，
    /// 如果平台不支持任何SIMD指令集则返回`Scalar`。
    ///
    /// ```rust
    /// use testbed_simd::SimdBackend;
    ///
    /// let backend = SimdBackend::best_available();
    /// assert!(backend.is_supported());
    /// ```
    pub fn best_available() -> Self {
        let features = detect_cpu_features();

        #[cfg(target_arch = "x86_64")]
        {
            if features.avx2 {
                return Self::Avx2;
            }
            if features.avx {
                return Self::Avx;
            }
            if features.sse41 {
                return Self::Sse41;
            }
            if features.sse2 {
                return Self::Sse2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if features.neon {
                return Self::Neon;
            }
        }

        let _ = features;
        Self::Scalar
    }

    /// 当前CPU是否支持该后端
    pub fn is_supported(&self) -> bool {
        let features = detect_cpu_features();
        match self {
            Self::Scalar => true,
            Self::Sse2 => features.sse2,
            Self::Sse41 => features.sse41,
            Self::Avx => features.avx,
            Self::Avx2 => features.avx2,
            Self::Neon => features.neon,
        }
    }

    /// 获取SIMD向量宽度
    pub fn width(&self) -> SimdWidth {
        match self {
            Self::Scalar | Self::Sse2 | Self::Sse41 | Self::Neon => SimdWidth::W128,
            Self::Avx | Self::Avx2 => SimdWidth::W256,
        }
    }

    /// 获取可以并行处理的f32数量
    ///
    /// ```rust
    /// use testbed_simd::SimdBackend;
    ///
    /// assert_eq!(SimdBackend::Sse2.f32_lanes(), 4);
    /// assert_eq!(SimdBackend::Avx2.f32_lanes(), 8);
    /// ```
    pub fn f32_lanes(&self) -> usize {
        match self.width() {
            SimdWidth::W128 => 4,
            SimdWidth::W256 => 8,
        }
    }

    /// 配置文件中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse2 => "sse2",
            Self::Sse41 => "sse4.1",
            Self::Avx => "avx",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
        }
    }

    /// 按名称查找后端（不区分大小写）
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let name = if name == "sse41" { "sse4.1" } else { name.as_str() };
        Self::ALL.iter().copied().find(|backend| backend.name() == name)
    }
}

impl std::fmt::Display for SimdBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
