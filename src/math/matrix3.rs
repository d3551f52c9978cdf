use super::scalar::{equals, LARGE_EPSILON};
use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 3x3矩阵，行主序（`m<行><列>`）
///
/// 表示不含平移的线性变换（旋转、缩放、切变）。默认值为单位矩阵。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix3 {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m20: f32,
    pub m21: f32,
    pub m22: f32,
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);

    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        v00: f32,
        v01: f32,
        v02: f32,
        v10: f32,
        v11: f32,
        v12: f32,
        v20: f32,
        v21: f32,
        v22: f32,
    ) -> Self {
        Self {
            m00: v00,
            m01: v01,
            m02: v02,
            m10: v10,
            m11: v11,
            m12: v12,
            m20: v20,
            m21: v21,
            m22: v22,
        }
    }

    /// 由行主序数组构造
    #[inline]
    pub fn from_array(data: [f32; 9]) -> Self {
        bytemuck::cast(data)
    }

    /// 行主序的紧凑浮点数组，可直接上传给图形API
    #[inline]
    pub fn data(&self) -> &[f32; 9] {
        bytemuck::cast_ref(self)
    }

    /// 只设置对角线元素
    pub fn set_scale(&mut self, scale: Vector3) {
        self.m00 = scale.x;
        self.m11 = scale.y;
        self.m22 = scale.z;
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.m00 = scale;
        self.m11 = scale;
        self.m22 = scale;
    }

    /// 各列长度，仅在没有切变时有意义
    pub fn scale(&self) -> Vector3 {
        Vector3::new(
            (self.m00 * self.m00 + self.m10 * self.m10 + self.m20 * self.m20).sqrt(),
            (self.m01 * self.m01 + self.m11 * self.m11 + self.m21 * self.m21).sqrt(),
            (self.m02 * self.m02 + self.m12 * self.m12 + self.m22 * self.m22).sqrt(),
        )
    }

    pub fn transpose(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20, //
            self.m01, self.m11, self.m21, //
            self.m02, self.m12, self.m22,
        )
    }

    /// 第j列乘以`scale`的第j个分量
    pub fn scaled(&self, scale: Vector3) -> Self {
        Self::new(
            self.m00 * scale.x,
            self.m01 * scale.y,
            self.m02 * scale.z,
            self.m10 * scale.x,
            self.m11 * scale.y,
            self.m12 * scale.z,
            self.m20 * scale.x,
            self.m21 * scale.y,
            self.m22 * scale.z,
        )
    }

    /// 伴随矩阵除以行列式
    ///
    /// 不检查奇异性，奇异矩阵会得到Inf/NaN。
    pub fn inverse(&self) -> Self {
        let det = self.m00 * self.m11 * self.m22
            + self.m10 * self.m21 * self.m02
            + self.m20 * self.m01 * self.m12
            - self.m20 * self.m11 * self.m02
            - self.m10 * self.m01 * self.m22
            - self.m00 * self.m21 * self.m12;

        let inv_det = 1.0 / det;

        Self::new(
            (self.m11 * self.m22 - self.m21 * self.m12) * inv_det,
            -(self.m01 * self.m22 - self.m21 * self.m02) * inv_det,
            (self.m01 * self.m12 - self.m11 * self.m02) * inv_det,
            -(self.m10 * self.m22 - self.m20 * self.m12) * inv_det,
            (self.m00 * self.m22 - self.m20 * self.m02) * inv_det,
            -(self.m00 * self.m12 - self.m10 * self.m02) * inv_det,
            (self.m10 * self.m21 - self.m20 * self.m11) * inv_det,
            -(self.m00 * self.m21 - self.m20 * self.m01) * inv_det,
            (self.m00 * self.m11 - self.m10 * self.m01) * inv_det,
        )
    }

    /// 逐元素在`LARGE_EPSILON`内相等
    pub fn equals(&self, rhs: &Self) -> bool {
        self.data()
            .iter()
            .zip(rhs.data())
            .all(|(l, r)| equals(*l, *r, LARGE_EPSILON))
    }

    pub fn is_nan(&self) -> bool {
        self.data().iter().any(|v| super::scalar::is_nan(*v))
    }

    /// 批量转置，`dest[i] = src[i].transpose()`
    ///
    /// # Panics
    ///
    /// 两个切片长度不同时panic
    pub fn bulk_transpose(dest: &mut [Self], src: &[Self]) {
        assert_eq!(dest.len(), src.len(), "bulk_transpose length mismatch");
        for (d, s) in dest.iter_mut().zip(src) {
            *d = s.transpose();
        }
    }
}

impl Add for Matrix3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let (l, r) = (self.data(), rhs.data());
        Self::from_array(std::array::from_fn(|i| l[i] + r[i]))
    }
}

impl Sub for Matrix3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let (l, r) = (self.data(), rhs.data());
        Self::from_array(std::array::from_fn(|i| l[i] - r[i]))
    }
}

impl Mul<f32> for Matrix3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        let l = self.data();
        Self::from_array(std::array::from_fn(|i| l[i] * rhs))
    }
}

impl Mul<Matrix3> for f32 {
    type Output = Matrix3;
    fn mul(self, rhs: Matrix3) -> Matrix3 {
        rhs * self
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(
            self.m00 * rhs.x + self.m01 * rhs.y + self.m02 * rhs.z,
            self.m10 * rhs.x + self.m11 * rhs.y + self.m12 * rhs.z,
            self.m20 * rhs.x + self.m21 * rhs.y + self.m22 * rhs.z,
        )
    }
}

impl Mul for Matrix3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.m00 * rhs.m00 + self.m01 * rhs.m10 + self.m02 * rhs.m20,
            self.m00 * rhs.m01 + self.m01 * rhs.m11 + self.m02 * rhs.m21,
            self.m00 * rhs.m02 + self.m01 * rhs.m12 + self.m02 * rhs.m22,
            self.m10 * rhs.m00 + self.m11 * rhs.m10 + self.m12 * rhs.m20,
            self.m10 * rhs.m01 + self.m11 * rhs.m11 + self.m12 * rhs.m21,
            self.m10 * rhs.m02 + self.m11 * rhs.m12 + self.m12 * rhs.m22,
            self.m20 * rhs.m00 + self.m21 * rhs.m10 + self.m22 * rhs.m20,
            self.m20 * rhs.m01 + self.m21 * rhs.m11 + self.m22 * rhs.m21,
            self.m20 * rhs.m02 + self.m21 * rhs.m12 + self.m22 * rhs.m22,
        )
    }
}
