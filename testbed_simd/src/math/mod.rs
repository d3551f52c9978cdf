//! SIMD优化的数学运算模块
//!
//! `scalar`为标量参照实现，`x86`/`arm`为平台内核，
//! [`SimdKernels`]在运行时选择其一。

#[cfg(target_arch = "x86_64")]
pub mod x86;

#[cfg(target_arch = "aarch64")]
pub mod arm;

pub mod scalar;
mod dispatch;

pub use dispatch::SimdKernels;
