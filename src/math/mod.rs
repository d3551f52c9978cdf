//! 三维数学核心
//!
//! - `scalar` - 浮点比较、角度换算和位运算辅助函数
//! - `Vector2`/`Vector3`/`Vector4` - 向量
//! - `Matrix3` - 3x3线性变换
//! - `Quaternion` - 旋转
//! - `Matrix3x4` - 仿射变换
//! - `Matrix4` - 齐次变换
//! - `accel` - 基于`testbed_simd`的批量与SIMD加速路径
//!
//! 所有类型都是`#[repr(C)]`的纯数据，可通过`bytemuck`零拷贝上传。
//! 数学运算不返回错误，非法输入按IEEE-754传播Inf/NaN。

pub mod accel;
mod matrix3;
mod matrix3x4;
mod matrix4;
mod quaternion;
pub mod scalar;
mod vector2;
mod vector3;
mod vector4;


pub use accel::Accelerator;
pub use matrix3::Matrix3;
pub use matrix3x4::Matrix3x4;
pub use matrix4::Matrix4;
pub use quaternion::Quaternion;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
