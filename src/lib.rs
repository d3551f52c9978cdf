//! # Testbed
//!
//! 3D测试平台使用的数学库：向量、矩阵、四元数和仿射/齐次变换。
//!
//! ## Features
//!
//! - **值类型**: `Vector2/3/4`、`Matrix3`、`Quaternion`、`Matrix3x4`、`Matrix4`，
//!   全部为`#[repr(C)]`纯数据，可直接按`&[f32]`上传给图形API
//! - **右操作数先应用**: `(a * b) * v == a * (b * v)`
//! - **SIMD加速**: 运行时检测CPU特性，通过[`math::Accelerator`]选择SSE/NEON内核
//! - **配置**: TOML/JSON配置文件和环境变量覆盖
//!
//! ## 坐标约定
//!
//! 右手系，UP为+Z，FORWARD为+Y，RIGHT为+X。角度参数均为度。
//!
//! ### Example
//!
//! ```
//! use testbed::math::{Matrix4, Quaternion, Vector3};
//!
//! let rotation = Quaternion::from_angle_axis(90.0, Vector3::UP);
//! let transform = Matrix4::from_trs(Vector3::new(1.0, 0.0, 0.0), rotation, Vector3::ONE);
//!
//! let p = transform * Vector3::RIGHT;
//! assert!(p.equals(&Vector3::new(1.0, 1.0, 0.0), 1e-4));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: 错误类型、日志初始化和通用宏
//! - [`config`]: 配置系统
//! - [`math`]: 数学类型与加速路径

/// Error types, logging bootstrap and shared macros
pub mod core;
/// Configuration system
pub mod config;
/// Vectors, matrices, quaternions and accelerated kernels
pub mod math;

pub use crate::core::{TestbedError, TestbedResult};
pub use math::{Matrix3, Matrix3x4, Matrix4, Quaternion, Vector2, Vector3, Vector4};
