//! 3x4仿射变换矩阵
//!
//! 左上3x3为旋转·缩放，最后一列为平移，省略了恒为`(0, 0, 0, 1)`的投影行。

use super::scalar::{equals, is_nan, LARGE_EPSILON};
use super::{Matrix3, Matrix4, Quaternion, Vector3, Vector4};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 行主序3x4矩阵，默认值为单位矩阵
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix3x4 {
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
}

impl Default for Matrix3x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3x4 {
    pub const ZERO: Self = Self::from_rows([0.0; 4], [0.0; 4], [0.0; 4]);
    pub const IDENTITY: Self = Self::from_rows(
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    );

    #[inline]
    pub const fn from_rows(r0: [f32; 4], r1: [f32; 4], r2: [f32; 4]) -> Self {
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
        }
    }

    #[inline]
    pub fn from_array(data: [f32; 12]) -> Self {
        bytemuck::cast(data)
    }

    #[inline]
    pub fn data(&self) -> &[f32; 12] {
        bytemuck::cast_ref(self)
    }

    /// 由平移、旋转和均匀缩放构造
    pub fn from_trs_uniform(translation: Vector3, rotation: Quaternion, scale: f32) -> Self {
        Self::from_trs(translation, rotation, Vector3::new(scale, scale, scale))
    }

    /// 由平移、旋转和逐轴缩放构造，等价于`T * R * S`
    pub fn from_trs(translation: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        let mut ret = Self::IDENTITY;
        ret.set_rotation(&rotation.rotation_matrix().scaled(scale));
        ret.set_translation(translation);
        ret
    }

    pub fn set_translation(&mut self, translation: Vector3) {
        self.m03 = translation.x;
        self.m13 = translation.y;
        self.m23 = translation.z;
    }

    /// 覆盖左上3x3，平移列不变
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

    /// 只设置对角线元素
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

    /// 补上`(0, 0, 0, 1)`投影行
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_rows(
            [self.m00, self.m01, self.m02, self.m03],
            [self.m10, self.m11, self.m12, self.m13],
            [self.m20, self.m21, self.m22, self.m23],
            [0.0, 0.0, 0.0, 1.0],
        )
    }

    /// 去掉缩放的旋转部分，任一列长度为零时结果含Inf/NaN
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

    /// 左上3x3各列长度，存在切变时不准确
    pub fn scale(&self) -> Vector3 {
        self.to_matrix3().scale()
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

    /// 分解为`(平移, 旋转, 缩放)`
    ///
    /// 只有不含切变时才精确。
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        decompose_affine(self.translation(), &self.to_matrix3())
    }

    /// 3x3部分用伴随矩阵求逆，再反解平移列
    ///
    /// 不检查奇异性。
    pub fn inverse(&self) -> Self {
        let r = self.to_matrix3().inverse();
        let mut ret = Self::IDENTITY;
        ret.set_rotation(&r);

        ret.m03 = -(self.m03 * r.m00 + self.m13 * r.m01 + self.m23 * r.m02);
        ret.m13 = -(self.m03 * r.m10 + self.m13 * r.m11 + self.m23 * r.m12);
        ret.m23 = -(self.m03 * r.m20 + self.m13 * r.m21 + self.m23 * r.m22);

        ret
    }
}

pub(crate) fn decompose_affine(
    translation: Vector3,
    linear: &Matrix3,
) -> (Vector3, Quaternion, Vector3) {
    let scale = linear.scale();
    let inv_scale = Vector3::new(1.0 / scale.x, 1.0 / scale.y, 1.0 / scale.z);
    let rotation = Quaternion::from_rotation_matrix(&linear.scaled(inv_scale));
    (translation, rotation, scale)
}

impl From<Matrix3> for Matrix3x4 {
    fn from(m: Matrix3) -> Self {
        Self::from_rows(
            [m.m00, m.m01, m.m02, 0.0],
            [m.m10, m.m11, m.m12, 0.0],
            [m.m20, m.m21, m.m22, 0.0],
        )
    }
}

/// 丢弃投影行，不检查投影行是否为`(0, 0, 0, 1)`
impl From<Matrix4> for Matrix3x4 {
    fn from(m: Matrix4) -> Self {
        Self::from_rows(
            [m.m00, m.m01, m.m02, m.m03],
            [m.m10, m.m11, m.m12, m.m13],
            [m.m20, m.m21, m.m22, m.m23],
        )
    }
}

impl Add for Matrix3x4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let (l, r) = (self.data(), rhs.data());
        Self::from_array(std::array::from_fn(|i| l[i] + r[i]))
    }
}

impl Sub for Matrix3x4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let (l, r) = (self.data(), rhs.data());
        Self::from_array(std::array::from_fn(|i| l[i] - r[i]))
    }
}

impl Mul<f32> for Matrix3x4 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        let l = self.data();
        Self::from_array(std::array::from_fn(|i| l[i] * rhs))
    }
}

impl Mul<Matrix3x4> for f32 {
    type Output = Matrix3x4;
    fn mul(self, rhs: Matrix3x4) -> Matrix3x4 {
        rhs * self
    }
}

/// 变换点（隐含w = 1），没有透视除法
impl Mul<Vector3> for Matrix3x4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(
            self.m00 * rhs.x + self.m01 * rhs.y + self.m02 * rhs.z + self.m03,
            self.m10 * rhs.x + self.m11 * rhs.y + self.m12 * rhs.z + self.m13,
            self.m20 * rhs.x + self.m21 * rhs.y + self.m22 * rhs.z + self.m23,
        )
    }
}

/// 平移按`rhs.w`加权，w = 0时只做线性变换
impl Mul<Vector4> for Matrix3x4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector4) -> Vector3 {
        Vector3::new(
            self.m00 * rhs.x + self.m01 * rhs.y + self.m02 * rhs.z + self.m03 * rhs.w,
            self.m10 * rhs.x + self.m11 * rhs.y + self.m12 * rhs.z + self.m13 * rhs.w,
            self.m20 * rhs.x + self.m21 * rhs.y + self.m22 * rhs.z + self.m23 * rhs.w,
        )
    }
}

impl Mul for Matrix3x4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_rows(
            [
                self.m00 * rhs.m00 + self.m01 * rhs.m10 + self.m02 * rhs.m20,
                self.m00 * rhs.m01 + self.m01 * rhs.m11 + self.m02 * rhs.m21,
                self.m00 * rhs.m02 + self.m01 * rhs.m12 + self.m02 * rhs.m22,
                self.m00 * rhs.m03 + self.m01 * rhs.m13 + self.m02 * rhs.m23 + self.m03,
            ],
            [
                self.m10 * rhs.m00 + self.m11 * rhs.m10 + self.m12 * rhs.m20,
                self.m10 * rhs.m01 + self.m11 * rhs.m11 + self.m12 * rhs.m21,
                self.m10 * rhs.m02 + self.m11 * rhs.m12 + self.m12 * rhs.m22,
                self.m10 * rhs.m03 + self.m11 * rhs.m13 + self.m12 * rhs.m23 + self.m13,
            ],
            [
                self.m20 * rhs.m00 + self.m21 * rhs.m10 + self.m22 * rhs.m20,
                self.m20 * rhs.m01 + self.m21 * rhs.m11 + self.m22 * rhs.m21,
                self.m20 * rhs.m02 + self.m21 * rhs.m12 + self.m22 * rhs.m22,
                self.m20 * rhs.m03 + self.m21 * rhs.m13 + self.m22 * rhs.m23 + self.m23,
            ],
        )
    }
}

/// 结果的最后一行取自`rhs`
impl Mul<Matrix4> for Matrix3x4 {
    type Output = Matrix4;
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let row = |r: [f32; 4]| -> [f32; 4] {
            [
                r[0] * rhs.m00 + r[1] * rhs.m10 + r[2] * rhs.m20 + r[3] * rhs.m30,
                r[0] * rhs.m01 + r[1] * rhs.m11 + r[2] * rhs.m21 + r[3] * rhs.m31,
                r[0] * rhs.m02 + r[1] * rhs.m12 + r[2] * rhs.m22 + r[3] * rhs.m32,
                r[0] * rhs.m03 + r[1] * rhs.m13 + r[2] * rhs.m23 + r[3] * rhs.m33,
            ]
        };

        Matrix4::from_rows(
            row([self.m00, self.m01, self.m02, self.m03]),
            row([self.m10, self.m11, self.m12, self.m13]),
            row([self.m20, self.m21, self.m22, self.m23]),
            [rhs.m30, rhs.m31, rhs.m32, rhs.m33],
        )
    }
}
