//! 4x4齐次变换矩阵

use super::matrix3x4::decompose_affine;
use super::scalar::{equals, is_nan, LARGE_EPSILON};
use super::{Matrix3, Matrix3x4, Quaternion, Vector3, Vector4};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 行主序4x4矩阵，最后一行保存投影项
///
/// 乘法约定为右侧操作数先应用：`(a * b) * v == a * (b * v)`。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix4 {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m03: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m20: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m30: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const ZERO: Self = Self::from_rows([0.0; 4], [0.0; 4], [0.0; 4], [0.0; 4]);
    pub const IDENTITY: Self = Self::from_rows(
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    );

    #[inline]
    pub const fn from_rows(r0: [f32; 4], r1: [f32; 4], r2: [f32; 4], r3: [f32; 4]) -> Self {
        Self {
            m00: r0[0],
            m01: r0[1],
            m02: r0[2],
            m03: r0[3],
            m10: r1[0],
            m11: r1[1],
            m12: r1[2],
            m13: r1[3],
            m20: r2[0],
            m21: r2[1],
            m22: r2[2],
            m23: r2[3],
            m30: r3[0],
            m31: r3[1],
            m32: r3[2],
            m33: r3[3],
        }
    }

    #[inline]
    pub fn from_array(data: [f32; 16]) -> Self {
        bytemuck::cast(data)
    }

    /// 行主序的紧凑浮点数组
    #[inline]
    pub fn data(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    pub fn from_trs(translation: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Matrix3x4::from_trs(translation, rotation, scale).to_matrix4()
    }

    pub fn from_trs_uniform(translation: Vector3, rotation: Quaternion, scale: f32) -> Self {
        Self::from_trs(translation, rotation, Vector3::new(scale, scale, scale))
    }

    pub fn set_translation(&mut self, translation: Vector3) {
        self.m03 = translation.x;
        self.m13 = translation.y;
        self.m23 = translation.z;
    }

    pub fn set_rotation(&mut self, rotation: &Matrix3) {
        self.m00 = rotation.m00;
        self.m01 = rotation.m01;
        self.m02 = rotation.m02;
        self.m10 = rotation.m10;
        self.m11 = rotation.m11;
        self.m12 = rotation.m12;
        self.m20 = rotation.m20;
        self.m21 = rotation.m21;
        self.m22 = rotation.m22;
    }

    pub fn set_scale(&mut self, scale: Vector3) {
        self.m00 = scale.x;
        self.m11 = scale.y;
        self.m22 = scale.z;
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vector3::new(scale, scale, scale));
    }

    pub fn to_matrix3(&self) -> Matrix3 {
        Matrix3::new(
            self.m00, self.m01, self.m02, //
            self.m10, self.m11, self.m12, //
            self.m20, self.m21, self.m22,
        )
    }

    pub fn rotation_matrix(&self) -> Matrix3 {
        let scale = self.scale();
        self.to_matrix3()
            .scaled(Vector3::new(1.0 / scale.x, 1.0 / scale.y, 1.0 / scale.z))
    }

    #[inline]
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.m03, self.m13, self.m23)
    }

    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(&self.rotation_matrix())
    }

    pub fn scale(&self) -> Vector3 {
        self.to_matrix3().scale()
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(
            [self.m00, self.m10, self.m20, self.m30],
            [self.m01, self.m11, self.m21, self.m31],
            [self.m02, self.m12, self.m22, self.m32],
            [self.m03, self.m13, self.m23, self.m33],
        )
    }

    pub fn equals(&self, rhs: &Self) -> bool {
        self.data()
            .iter()
            .zip(rhs.data())
            .all(|(l, r)| equals(*l, *r, LARGE_EPSILON))
    }

    pub fn is_nan(&self) -> bool {
        self.data().iter().any(|v| is_nan(*v))
    }

    /// 分解为`(平移, 旋转, 缩放)`，忽略投影行
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        decompose_affine(self.translation(), &self.to_matrix3())
    }

    /// 4x4余子式展开求逆，不检查奇异性
    pub fn inverse(&self) -> Self {
        let m = self;

        let mut v0 = m.m20 * m.m31 - m.m21 * m.m30;
        let mut v1 = m.m20 * m.m32 - m.m22 * m.m30;
        let mut v2 = m.m20 * m.m33 - m.m23 * m.m30;
        let mut v3 = m.m21 * m.m32 - m.m22 * m.m31;
        let mut v4 = m.m21 * m.m33 - m.m23 * m.m31;
        let mut v5 = m.m22 * m.m33 - m.m23 * m.m32;

        let i00 = v5 * m.m11 - v4 * m.m12 + v3 * m.m13;
        let i10 = -(v5 * m.m10 - v2 * m.m12 + v1 * m.m13);
        let i20 = v4 * m.m10 - v2 * m.m11 + v0 * m.m13;
        let i30 = -(v3 * m.m10 - v1 * m.m11 + v0 * m.m12);

        let inv_det = 1.0 / (i00 * m.m00 + i10 * m.m01 + i20 * m.m02 + i30 * m.m03);

        let i00 = i00 * inv_det;
        let i10 = i10 * inv_det;
        let i20 = i20 * inv_det;
        let i30 = i30 * inv_det;

        let i01 = -(v5 * m.m01 - v4 * m.m02 + v3 * m.m03) * inv_det;
        let i11 = (v5 * m.m00 - v2 * m.m02 + v1 * m.m03) * inv_det;
        let i21 = -(v4 * m.m00 - v2 * m.m01 + v0 * m.m03) * inv_det;
        let i31 = (v3 * m.m00 - v1 * m.m01 + v0 * m.m02) * inv_det;

        v0 = m.m10 * m.m31 - m.m11 * m.m30;
        v1 = m.m10 * m.m32 - m.m12 * m.m30;
        v2 = m.m10 * m.m33 - m.m13 * m.m30;
        v3 = m.m11 * m.m32 - m.m12 * m.m31;
        v4 = m.m11 * m.m33 - m.m13 * m.m31;
        v5 = m.m12 * m.m33 - m.m13 * m.m32;

        let i02 = (v5 * m.m01 - v4 * m.m02 + v3 * m.m03) * inv_det;
        let i12 = -(v5 * m.m00 - v2 * m.m02 + v1 * m.m03) * inv_det;
        let i22 = (v4 * m.m00 - v2 * m.m01 + v0 * m.m03) * inv_det;
        let i32 = -(v3 * m.m00 - v1 * m.m01 + v0 * m.m02) * inv_det;

        v0 = m.m21 * m.m10 - m.m20 * m.m11;
        v1 = m.m22 * m.m10 - m.m20 * m.m12;
        v2 = m.m23 * m.m10 - m.m20 * m.m13;
        v3 = m.m22 * m.m11 - m.m21 * m.m12;
        v4 = m.m23 * m.m11 - m.m21 * m.m13;
        v5 = m.m23 * m.m12 - m.m22 * m.m13;

        let i03 = -(v5 * m.m01 - v4 * m.m02 + v3 * m.m03) * inv_det;
        let i13 = (v5 * m.m00 - v2 * m.m02 + v1 * m.m03) * inv_det;
        let i23 = -(v4 * m.m00 - v2 * m.m01 + v0 * m.m03) * inv_det;
        let i33 = (v3 * m.m00 - v1 * m.m01 + v0 * m.m02) * inv_det;

        Self::from_rows(
            [i00, i01, i02, i03],
            [i10, i11, i12, i13],
            [i20, i21, i22, i23],
            [i30, i31, i32, i33],
        )
    }

    /// `dest[i] = src[i].transpose()`
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

/// 零扩展，平移为零、投影行为`(0, 0, 0, 1)`
impl From<Matrix3> for Matrix4 {
    fn from(m: Matrix3) -> Self {
        Self::from_rows(
            [m.m00, m.m01, m.m02, 0.0],
            [m.m10, m.m11, m.m12, 0.0],
            [m.m20, m.m21, m.m22, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        )
    }
}

impl From<Matrix3x4> for Matrix4 {
    fn from(m: Matrix3x4) -> Self {
        m.to_matrix4()
    }
}

impl Add for Matrix4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let (l, r) = (self.data(), rhs.data());
        Self::from_array(std::array::from_fn(|i| l[i] + r[i]))
    }
}

impl Sub for Matrix4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let (l, r) = (self.data(), rhs.data());
        Self::from_array(std::array::from_fn(|i| l[i] - r[i]))
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        let l = self.data();
        Self::from_array(std::array::from_fn(|i| l[i] * rhs))
    }
}

impl Mul<Matrix4> for f32 {
    type Output = Matrix4;
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        rhs * self
    }
}

/// 以w = 1变换点并做透视除法
///
/// w为零时结果为Inf/NaN。
impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        let inv_w = 1.0 / (self.m30 * rhs.x + self.m31 * rhs.y + self.m32 * rhs.z + self.m33);

        Vector3::new(
            (self.m00 * rhs.x + self.m01 * rhs.y + self.m02 * rhs.z + self.m03) * inv_w,
            (self.m10 * rhs.x + self.m11 * rhs.y + self.m12 * rhs.z + self.m13) * inv_w,
            (self.m20 * rhs.x + self.m21 * rhs.y + self.m22 * rhs.z + self.m23) * inv_w,
        )
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Vector4 {
        Vector4::new(
            self.m00 * rhs.x + self.m01 * rhs.y + self.m02 * rhs.z + self.m03 * rhs.w,
            self.m10 * rhs.x + self.m11 * rhs.y + self.m12 * rhs.z + self.m13 * rhs.w,
            self.m20 * rhs.x + self.m21 * rhs.y + self.m22 * rhs.z + self.m23 * rhs.w,
            self.m30 * rhs.x + self.m31 * rhs.y + self.m32 * rhs.z + self.m33 * rhs.w,
        )
    }
}

impl Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let row = |r: [f32; 4]| -> [f32; 4] {
            [
                r[0] * rhs.m00 + r[1] * rhs.m10 + r[2] * rhs.m20 + r[3] * rhs.m30,
                r[0] * rhs.m01 + r[1] * rhs.m11 + r[2] * rhs.m21 + r[3] * rhs.m31,
                r[0] * rhs.m02 + r[1] * rhs.m12 + r[2] * rhs.m22 + r[3] * rhs.m32,
                r[0] * rhs.m03 + r[1] * rhs.m13 + r[2] * rhs.m23 + r[3] * rhs.m33,
            ]
        };

        Self::from_rows(
            row([self.m00, self.m01, self.m02, self.m03]),
            row([self.m10, self.m11, self.m12, self.m13]),
            row([self.m20, self.m21, self.m22, self.m23]),
            row([self.m30, self.m31, self.m32, self.m33]),
        )
    }
}
