use super::scalar::acos_deg;
use super::Vector2;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 三维向量
///
/// 坐标轴约定：UP/DOWN为±Z，FORWARD/BACK为±Y，RIGHT/LEFT为±X。
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, 0.0, -1.0);
    pub const FORWARD: Self = Self::new(0.0, 1.0, 0.0);
    pub const BACK: Self = Self::new(0.0, -1.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 由二维向量和z分量构造
    #[inline]
    pub const fn from_vector2(v: Vector2, z: f32) -> Self {
        Self::new(v.x, v.y, z)
    }

    #[inline]
    pub fn cross(&self, rhs: &Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// 两向量夹角（度）
    ///
    /// 任一向量长度为零时结果为NaN。
    #[inline]
    pub fn angle(&self, rhs: &Self) -> f32 {
        acos_deg(self.dot(rhs) / (self.length() * rhs.length()))
    }
}

impl From<Vector2> for Vector3 {
    fn from(v: Vector2) -> Self {
        Self::from_vector2(v, 0.0)
    }
}

crate::core::macros::impl_vector_ops!(Vector3 { x, y, z }, 3);
