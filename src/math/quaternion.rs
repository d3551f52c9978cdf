//! 旋转四元数
//!
//! 分量顺序为`(w, x, y, z)`。运算符允许非单位长度的中间值，
//! 只有`normalize`/`normalized`以及插值函数会归一化。

use super::scalar::{equals, is_nan, DEG2RAD_2, LARGE_EPSILON, RAD2DEG};
use super::{Matrix3, Vector3};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 四元数
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// 由`[w, x, y, z]`数组构造
    #[inline]
    pub fn from_array(data: [f32; 4]) -> Self {
        bytemuck::cast(data)
    }

    #[inline]
    pub fn data(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    /// 绕`axis`旋转`angle`度，轴会先归一化
    pub fn from_angle_axis(angle: f32, axis: Vector3) -> Self {
        let norm_axis = axis.normalized();
        let half = angle * DEG2RAD_2;
        let (sin_angle, cos_angle) = half.sin_cos();

        Self::new(
            cos_angle,
            norm_axis.x * sin_angle,
            norm_axis.y * sin_angle,
            norm_axis.z * sin_angle,
        )
    }

    /// 绕FORWARD轴旋转`angle`度
    pub fn from_angle(angle: f32) -> Self {
        Self::from_angle_axis(angle, Vector3::FORWARD)
    }

    /// 由欧拉角（度）构造，旋转顺序为先Z、再X、最后Y
    ///
    /// 与第一人称相机一致，俯仰±90度处存在万向节锁。
    pub fn from_euler_angles(x: f32, y: f32, z: f32) -> Self {
        let (sin_x, cos_x) = (x * DEG2RAD_2).sin_cos();
        let (sin_y, cos_y) = (y * DEG2RAD_2).sin_cos();
        let (sin_z, cos_z) = (z * DEG2RAD_2).sin_cos();

        Self::new(
            cos_y * cos_x * cos_z + sin_y * sin_x * sin_z,
            cos_y * sin_x * cos_z + sin_y * cos_x * sin_z,
            sin_y * cos_x * cos_z - cos_y * sin_x * sin_z,
            cos_y * cos_x * sin_z - sin_y * sin_x * cos_z,
        )
    }

    /// 从`start`方向到`end`方向的最短弧旋转
    ///
    /// 两方向近似反向时，绕一条垂直于`start`的轴旋转180度：
    /// 优先取`RIGHT x start`，它过短时改用`UP x start`。
    pub fn from_rotation_to(start: Vector3, end: Vector3) -> Self {
        let norm_start = start.normalized();
        let norm_end = end.normalized();
        let d = norm_start.dot(&norm_end);

        if d > -1.0 + LARGE_EPSILON {
            let c = norm_start.cross(&norm_end);
            let s = ((1.0 + d) * 2.0).sqrt();
            let inv_s = 1.0 / s;

            Self::new(0.5 * s, c.x * inv_s, c.y * inv_s, c.z * inv_s)
        } else {
            let mut axis = Vector3::RIGHT.cross(&norm_start);
            if axis.length() < LARGE_EPSILON {
                axis = Vector3::UP.cross(&norm_start);
            }

            Self::from_angle_axis(180.0, axis)
        }
    }

    /// 由三根正交基向量构造，基向量作为旋转矩阵的列
    pub fn from_axes(x_axis: Vector3, y_axis: Vector3, z_axis: Vector3) -> Self {
        let matrix = Matrix3::new(
            x_axis.x, y_axis.x, z_axis.x, //
            x_axis.y, y_axis.y, z_axis.y, //
            x_axis.z, y_axis.z, z_axis.z,
        );

        Self::from_rotation_matrix(&matrix)
    }

    /// 由旋转矩阵构造
    ///
    /// 迹为正时直接计算，否则按最大的对角元素选择分支，避免除以接近零的数。
    pub fn from_rotation_matrix(matrix: &Matrix3) -> Self {
        let t = matrix.m00 + matrix.m11 + matrix.m22;

        if t > 0.0 {
            let inv_s = 0.5 / (1.0 + t).sqrt();
            Self::new(
                0.25 / inv_s,
                (matrix.m21 - matrix.m12) * inv_s,
                (matrix.m02 - matrix.m20) * inv_s,
                (matrix.m10 - matrix.m01) * inv_s,
            )
        } else if matrix.m00 > matrix.m11 && matrix.m00 > matrix.m22 {
            let inv_s = 0.5 / (1.0 + matrix.m00 - matrix.m11 - matrix.m22).sqrt();
            Self::new(
                (matrix.m21 - matrix.m12) * inv_s,
                0.25 / inv_s,
                (matrix.m01 + matrix.m10) * inv_s,
                (matrix.m20 + matrix.m02) * inv_s,
            )
        } else if matrix.m11 > matrix.m22 {
            let inv_s = 0.5 / (1.0 + matrix.m11 - matrix.m00 - matrix.m22).sqrt();
            Self::new(
                (matrix.m02 - matrix.m20) * inv_s,
                (matrix.m01 + matrix.m10) * inv_s,
                0.25 / inv_s,
                (matrix.m12 + matrix.m21) * inv_s,
            )
        } else {
            let inv_s = 0.5 / (1.0 + matrix.m22 - matrix.m00 - matrix.m11).sqrt();
            Self::new(
                (matrix.m10 - matrix.m01) * inv_s,
                (matrix.m02 + matrix.m20) * inv_s,
                (matrix.m12 + matrix.m21) * inv_s,
                0.25 / inv_s,
            )
        }
    }

    /// 朝向`direction`、以`up`为参考上方向的旋转
    ///
    /// 旋转后FORWARD指向`direction`，UP位于`direction`和`up`张成的平面内。
    /// 两者平行时退化为从FORWARD到`direction`的最短弧旋转。
    /// 结果含NaN时返回`None`。
    pub fn look_rotation(direction: Vector3, up: Vector3) -> Option<Self> {
        let forward = direction.normalized();
        let v = forward.cross(&up);

        let ret = if v.length_squared() >= LARGE_EPSILON {
            let right = v.normalized();
            let up = right.cross(&forward);
            Self::from_axes(right, forward, up)
        } else {
            Self::from_rotation_to(Vector3::FORWARD, forward)
        };

        if ret.is_nan() {
            None
        } else {
            Some(ret)
        }
    }

    /// [`Self::look_rotation`]的就地版本，失败时不修改自身并返回`false`
    pub fn set_look_rotation(&mut self, direction: Vector3, up: Vector3) -> bool {
        let Some(q) = Self::look_rotation(direction, up) else {
            tracing::trace!(%direction, %up, "look rotation produced NaN, keeping previous value");
            return false;
        };
        self.assign_if_valid(q)
    }

    /// 仅当`q`不含NaN时赋值
    fn assign_if_valid(&mut self, q: Self) -> bool {
        if q.is_nan() {
            return false;
        }
        *self = q;
        true
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> f32 {
        self.w * rhs.w + self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// 原地归一化，已是单位长度或长度为零时保持不变
    pub fn normalize(&mut self) {
        let len_squared = self.length_squared();
        if !equals(len_squared, 1.0, LARGE_EPSILON) && len_squared > 0.0 {
            let inv_len = 1.0 / len_squared.sqrt();
            *self *= inv_len;
        }
    }

    pub fn normalized(&self) -> Self {
        let mut ret = *self;
        ret.normalize();
        ret
    }

    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// 逆旋转
    ///
    /// 单位四元数直接返回共轭；模平方过小时返回单位四元数。
    pub fn inverse(&self) -> Self {
        let len_squared = self.length_squared();
        if len_squared == 1.0 {
            self.conjugate()
        } else if len_squared >= LARGE_EPSILON {
            self.conjugate() * (1.0 / len_squared)
        } else {
            Self::IDENTITY
        }
    }

    /// 逐分量在`LARGE_EPSILON`内相等（不考虑q与-q等价）
    pub fn equals(&self, rhs: &Self) -> bool {
        equals(self.w, rhs.w, LARGE_EPSILON)
            && equals(self.x, rhs.x, LARGE_EPSILON)
            && equals(self.y, rhs.y, LARGE_EPSILON)
            && equals(self.z, rhs.z, LARGE_EPSILON)
    }

    pub fn is_nan(&self) -> bool {
        is_nan(self.w) || is_nan(self.x) || is_nan(self.y) || is_nan(self.z)
    }

    /// 欧拉角（度），`from_euler_angles`的逆运算
    ///
    /// 俯仰接近±90度时偏航固定为0，只计算滚转。
    pub fn euler_angles(&self) -> Vector3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        let check = 2.0 * (-y * z + w * x);

        if check < -0.995 {
            Vector3::new(
                -90.0,
                0.0,
                -(2.0 * (x * z - w * y)).atan2(1.0 - 2.0 * (y * y + z * z)) * RAD2DEG,
            )
        } else if check > 0.995 {
            Vector3::new(
                90.0,
                0.0,
                (2.0 * (x * z - w * y)).atan2(1.0 - 2.0 * (y * y + z * z)) * RAD2DEG,
            )
        } else {
            Vector3::new(
                check.asin() * RAD2DEG,
                (2.0 * (x * z + w * y)).atan2(1.0 - 2.0 * (x * x + y * y)) * RAD2DEG,
                (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (x * x + z * z)) * RAD2DEG,
            )
        }
    }

    pub fn yaw_angle(&self) -> f32 {
        self.euler_angles().y
    }

    pub fn pitch_angle(&self) -> f32 {
        self.euler_angles().x
    }

    pub fn roll_angle(&self) -> f32 {
        self.euler_angles().z
    }

    pub fn rotation_matrix(&self) -> Matrix3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        Matrix3::new(
            1.0 - 2.0 * y * y - 2.0 * z * z,
            2.0 * x * y - 2.0 * w * z,
            2.0 * x * z + 2.0 * w * y,
            2.0 * x * y + 2.0 * w * z,
            1.0 - 2.0 * x * x - 2.0 * z * z,
            2.0 * y * z - 2.0 * w * x,
            2.0 * x * z - 2.0 * w * y,
            2.0 * y * z + 2.0 * w * x,
            1.0 - 2.0 * x * x - 2.0 * y * y,
        )
    }

    /// 球面线性插值，总是走最短路径
    ///
    /// 夹角的正弦不大于0.001时退化为线性插值并重新归一化。
    pub fn slerp(&self, rhs: &Self, t: f32) -> Self {
        let mut rhs = *rhs;
        let mut cos_angle = self.dot(&rhs);
        if cos_angle < 0.0 {
            cos_angle = -cos_angle;
            rhs = -rhs;
        }

        let angle = cos_angle.acos();
        let sin_angle = angle.sin();

        if sin_angle > 0.001 {
            let inv_sin_angle = 1.0 / sin_angle;
            let t1 = ((1.0 - t) * angle).sin() * inv_sin_angle;
            let t2 = (t * angle).sin() * inv_sin_angle;
            *self * t1 + rhs * t2
        } else {
            (*self * (1.0 - t) + rhs * t).normalized()
        }
    }

    /// 归一化线性插值，`shortest_path`为真且点积为负时取反`rhs`
    pub fn nlerp(&self, rhs: &Self, t: f32, shortest_path: bool) -> Self {
        let result = if self.dot(rhs) < 0.0 && shortest_path {
            *self + ((-*rhs) - *self) * t
        } else {
            *self + (*rhs - *self) * t
        };
        result.normalized()
    }
}

impl From<Matrix3> for Quaternion {
    fn from(matrix: Matrix3) -> Self {
        Self::from_rotation_matrix(&matrix)
    }
}

impl Add for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Quaternion> for f32 {
    type Output = Quaternion;
    #[inline]
    fn mul(self, rhs: Quaternion) -> Quaternion {
        rhs * self
    }
}

/// Hamilton积：`a * b`先应用`b`再应用`a`
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
        )
    }
}

/// 旋转向量
impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        let q_vec = Vector3::new(self.x, self.y, self.z);
        let cross1 = q_vec.cross(&rhs);
        let cross2 = q_vec.cross(&cross1);

        rhs + 2.0 * (cross1 * self.w + cross2)
    }
}

impl AddAssign for Quaternion {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quaternion {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Quaternion {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl std::fmt::Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vector3, b: Vector3) {
        assert!(a.equals(&b, LARGE_EPSILON), "{} != {}", a, b);
    }

    #[test]
    fn test_angle_axis_rotates_right_to_forward() {
        let q = Quaternion::from_angle_axis(90.0, Vector3::new(0.0, 0.0, 1.0));
        assert_vec_eq(q * Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_vec_eq(q.rotation_matrix() * Vector3::RIGHT, Vector3::FORWARD);
    }

    #[test]
    fn test_axis_is_normalized() {
        let a = Quaternion::from_angle_axis(30.0, Vector3::new(0.0, 0.0, 5.0));
        let b = Quaternion::from_angle_axis(30.0, Vector3::UP);
        assert!(a.equals(&b));
        assert!(equals(a.length_squared(), 1.0, LARGE_EPSILON));
    }

    #[test]
    fn test_from_angle_uses_forward() {
        let q = Quaternion::from_angle(90.0);
        assert_vec_eq(q * Vector3::FORWARD, Vector3::FORWARD);
        assert_vec_eq(q * Vector3::UP, Vector3::RIGHT);
    }

    #[test]
    fn test_euler_round_trip() {
        let q = Quaternion::from_euler_angles(30.0, 45.0, 60.0);
        let euler = q.euler_angles();
        assert!(equals(euler.x, 30.0, 1e-3));
        assert!(equals(euler.y, 45.0, 1e-3));
        assert!(equals(euler.z, 60.0, 1e-3));
        assert!(equals(q.pitch_angle(), 30.0, 1e-3));
        assert!(equals(q.yaw_angle(), 45.0, 1e-3));
        assert!(equals(q.roll_angle(), 60.0, 1e-3));
    }

    #[test]
    fn test_euler_gimbal_lock() {
        let q = Quaternion::from_euler_angles(90.0, 0.0, 30.0);
        let euler = q.euler_angles();
        assert_eq!(euler.x, 90.0);
        assert_eq!(euler.y, 0.0);

        let q = Quaternion::from_euler_angles(-90.0, 0.0, 0.0);
        assert_eq!(q.euler_angles().x, -90.0);
        assert_eq!(q.euler_angles().y, 0.0);
    }

    #[test]
    fn test_rotation_to() {
        let q = Quaternion::from_rotation_to(Vector3::RIGHT, Vector3::FORWARD);
        assert_vec_eq(q * Vector3::RIGHT, Vector3::FORWARD);

        let q = Quaternion::from_rotation_to(Vector3::new(0.0, 0.0, 2.0), Vector3::new(3.0, 0.0, 0.0));
        assert_vec_eq(q * Vector3::UP, Vector3::RIGHT);
    }

    #[test]
    fn test_rotation_to_antiparallel() {
        // RIGHT x FORWARD非零，绕UP旋转180度
        let q = Quaternion::from_rotation_to(Vector3::FORWARD, Vector3::BACK);
        assert_vec_eq(q * Vector3::FORWARD, Vector3::BACK);
        assert!(equals(q.z.abs(), 1.0, LARGE_EPSILON));

        // start与RIGHT平行，改用UP x start
        let q = Quaternion::from_rotation_to(Vector3::RIGHT, Vector3::LEFT);
        assert_vec_eq(q * Vector3::RIGHT, Vector3::LEFT);
        assert!(equals(q.y.abs(), 1.0, LARGE_EPSILON));
    }

    #[test]
    fn test_rotation_matrix_branches() {
        // 迹为正
        let q = Quaternion::from_angle_axis(40.0, Vector3::new(1.0, 2.0, 3.0));
        assert!(Quaternion::from_rotation_matrix(&q.rotation_matrix()).equals(&q));

        // 绕各轴旋转180度分别走三个对角分支
        for axis in [Vector3::RIGHT, Vector3::FORWARD, Vector3::UP] {
            let q = Quaternion::from_angle_axis(180.0, axis);
            let r = Quaternion::from_rotation_matrix(&q.rotation_matrix());
            assert!(r.equals(&q) || r.equals(&-q), "{} vs {}", r, q);
        }
    }

    #[test]
    fn test_from_axes_identity() {
        let q = Quaternion::from_axes(Vector3::RIGHT, Vector3::FORWARD, Vector3::UP);
        assert!(q.equals(&Quaternion::IDENTITY));
    }

    #[test]
    fn test_look_rotation() {
        let mut q = Quaternion::from_angle(10.0);
        assert!(q.set_look_rotation(Vector3::FORWARD, Vector3::UP));
        assert!(q.equals(&Quaternion::IDENTITY));

        let q = Quaternion::look_rotation(Vector3::new(1.0, 1.0, 0.0), Vector3::UP).unwrap();
        assert_vec_eq(q * Vector3::FORWARD, Vector3::new(1.0, 1.0, 0.0).normalized());
        assert_vec_eq(q * Vector3::UP, Vector3::UP);

        // 方向与上方向平行时使用最短弧
        let q = Quaternion::look_rotation(Vector3::UP, Vector3::UP).unwrap();
        assert_vec_eq(q * Vector3::FORWARD, Vector3::UP);
    }

    #[test]
    fn test_nan_result_keeps_value() {
        let original = Quaternion::from_angle(25.0);
        let mut q = original;
        assert!(!q.assign_if_valid(Quaternion::new(f32::NAN, 0.0, 0.0, 0.0)));
        assert!(!q.assign_if_valid(Quaternion::new(1.0, 0.0, f32::NAN, 0.0)));
        assert_eq!(q, original);

        assert!(q.assign_if_valid(Quaternion::IDENTITY));
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_look_rotation_nan_direction_falls_back() {
        // NaN叉积走最短弧分支，点积比较为假，得到绕UP的180度旋转
        let q = Quaternion::look_rotation(Vector3::new(f32::NAN, 0.0, 0.0), Vector3::UP).unwrap();
        assert!(!q.is_nan());
        assert!(equals(q.length_squared(), 1.0, LARGE_EPSILON));
        assert_vec_eq(q * Vector3::FORWARD, Vector3::BACK);

        let mut target = Quaternion::from_angle(25.0);
        assert!(target.set_look_rotation(Vector3::new(f32::NAN, 0.0, 0.0), Vector3::UP));
        assert_eq!(target, q);
    }

    #[test]
    fn test_from_rotation_matrix_diagonal_ties() {
        let inv_s = 0.5 / 2.0f32.sqrt();

        // 绕(1,1,0)/√2旋转180度：m00 == m11 > m22，取m11分支
        let m = Matrix3::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0);
        let q = Quaternion::from_rotation_matrix(&m);
        assert_eq!(q, Quaternion::new(0.0, 2.0 * inv_s, 0.25 / inv_s, 0.0));
        assert!(q.rotation_matrix().equals(&m));

        // 绕(0,1,1)/√2旋转180度：m11 == m22，取最后的分支
        let m = Matrix3::new(-1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0);
        let q = Quaternion::from_rotation_matrix(&m);
        assert_eq!(q, Quaternion::new(0.0, 0.0, 2.0 * inv_s, 0.25 / inv_s));
        assert!(q.rotation_matrix().equals(&m));
    }

    #[test]
    fn test_euler_angles_gimbal_threshold() {
        // 仅绕x轴时check = sin(俯仰)
        let pitch_with_check = |check: f32| {
            let half = check.asin() * 0.5;
            Quaternion::new(half.cos(), half.sin(), 0.0, 0.0)
        };

        let below = pitch_with_check(0.994).euler_angles();
        assert!(equals(below.x, 0.994f32.asin() * RAD2DEG, 1e-2), "{}", below);
        assert!(below.x < 90.0 - 1.0);
        assert!(equals(below.y, 0.0, LARGE_EPSILON));

        let above = pitch_with_check(0.996).euler_angles();
        assert_eq!(above.x, 90.0);
        assert_eq!(above.y, 0.0);
        assert!(equals(above.z, 0.0, LARGE_EPSILON));

        let below = pitch_with_check(-0.994).euler_angles();
        assert!(equals(below.x, -(0.994f32.asin()) * RAD2DEG, 1e-2), "{}", below);

        let above = pitch_with_check(-0.996).euler_angles();
        assert_eq!(above.x, -90.0);
        assert_eq!(above.y, 0.0);
        assert!(equals(above.z, 0.0, LARGE_EPSILON));
    }

    #[test]
    fn test_slerp_sine_threshold() {
        let a = Quaternion::IDENTITY;
        // 两者夹角为theta，中点为theta/2
        let check_midpoint = |theta: f32| {
            let b = Quaternion::new(theta.cos(), theta.sin(), 0.0, 0.0);
            let mid = a.slerp(&b, 0.5);
            let half = theta * 0.5;
            assert!(!mid.is_nan());
            assert!(equals(mid.w, half.cos(), 1e-6), "{}", mid);
            assert!(equals(mid.x, half.sin(), 1e-6), "{}", mid);
            assert_eq!(mid.y, 0.0);
            assert_eq!(mid.z, 0.0);
        };

        // sin(theta)略大于0.001，使用球面插值
        check_midpoint(0.002);
        // sin(theta)略小于0.001，退化为线性插值
        check_midpoint(0.0009);

        // 夹角为零时不能除以sin
        let q = Quaternion::from_angle_axis(30.0, Vector3::UP);
        assert!(q.slerp(&q, 0.3).equals(&q));
        assert!(q.slerp(&-q, 0.3).equals(&q));
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::from_euler_angles(10.0, 20.0, 30.0);
        assert!((q * q.inverse()).equals(&Quaternion::IDENTITY));

        let scaled = q * 2.0;
        assert!((scaled * scaled.inverse()).equals(&Quaternion::IDENTITY));

        let tiny = Quaternion::new(0.001, 0.0, 0.0, 0.0);
        assert_eq!(tiny.inverse(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::IDENTITY.inverse(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_composition_order() {
        // a * b 先应用b
        let a = Quaternion::from_angle_axis(90.0, Vector3::UP);
        let b = Quaternion::from_angle_axis(90.0, Vector3::RIGHT);
        let v = Vector3::FORWARD;
        assert_vec_eq((a * b) * v, a * (b * v));
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quaternion::from_euler_angles(0.0, 10.0, 0.0);
        let b = Quaternion::from_euler_angles(40.0, 80.0, -20.0);

        assert!(a.slerp(&b, 0.0).equals(&a));
        assert!(a.slerp(&b, 1.0).equals(&b));
        assert!(equals(a.slerp(&b, 0.5).length_squared(), 1.0, LARGE_EPSILON));
    }

    #[test]
    fn test_slerp_shortest_path() {
        let a = Quaternion::IDENTITY;
        let b = -Quaternion::from_angle_axis(20.0, Vector3::UP);
        let mid = a.slerp(&b, 0.5);
        let expected = Quaternion::from_angle_axis(10.0, Vector3::UP);
        assert!(mid.equals(&expected));
    }

    #[test]
    fn test_slerp_small_angle_renormalizes() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_angle_axis(0.05, Vector3::UP);
        let mid = a.slerp(&b, 0.5);
        assert!(equals(mid.length_squared(), 1.0, 1e-5));
    }

    #[test]
    fn test_nlerp() {
        let a = Quaternion::IDENTITY;
        let b = -Quaternion::from_angle_axis(90.0, Vector3::UP);

        let short = a.nlerp(&b, 0.5, true);
        assert!(short.equals(&Quaternion::from_angle_axis(45.0, Vector3::UP)));

        let long = a.nlerp(&b, 0.5, false);
        assert!(equals(long.length_squared(), 1.0, LARGE_EPSILON));
        assert!(equals(long.w.abs(), (67.5f32).to_radians().cos(), 1e-3));
    }
}
