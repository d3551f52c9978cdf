//! 核心宏定义
//!
//! 提供统一的宏来减少代码重复

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use testbed::impl_default;
///
/// struct MyStruct {
///     field1: u32,
///     field2: String,
/// }
///
/// impl_default!(MyStruct {
///     field1: 0,
///     field2: String::new(),
/// });
///
/// assert_eq!(MyStruct::default().field1, 0);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 为N维`f32`向量实现逐分量运算符和通用方法
///
/// 生成的运算符：`+ - * /`（标量或逐分量）、取负、复合赋值以及`f32 * 向量`。
/// `/= f32`先求倒数再相乘，`/ f32`逐分量相除。
/// 生成的方法：`length`、`length_squared`、`dot`、`abs_dot`、`abs`、`lerp`、
/// `equals`、`is_nan`、`normalize`、`normalized`、`data`，以及`TryFrom<&[f32]>`。
macro_rules! impl_vector_ops {
    ($name:ident { $($field:ident),+ }, $len:expr) => {
        /// 取切片的前N个分量，切片长度不足时返回错误
        impl TryFrom<&[f32]> for $name {
            type Error = std::array::TryFromSliceError;

            fn try_from(data: &[f32]) -> Result<Self, Self::Error> {
                let packed = <[f32; $len]>::try_from(data.get(..$len).unwrap_or(data))?;
                let [$($field),+] = packed;
                Ok(Self { $($field),+ })
            }
        }

        impl $name {
            /// 紧凑排列的分量
            #[inline]
            pub fn data(&self) -> &[f32; $len] {
                bytemuck::cast_ref(self)
            }

            #[inline]
            pub fn length_squared(&self) -> f32 {
                0.0 $(+ self.$field * self.$field)+
            }

            #[inline]
            pub fn length(&self) -> f32 {
                self.length_squared().sqrt()
            }

            #[inline]
            pub fn dot(&self, rhs: &Self) -> f32 {
                0.0 $(+ self.$field * rhs.$field)+
            }

            /// 逐分量乘积的绝对值之和（不是点积的绝对值）
            #[inline]
            pub fn abs_dot(&self, rhs: &Self) -> f32 {
                0.0 $(+ $crate::math::scalar::abs(self.$field * rhs.$field))+
            }

            #[inline]
            pub fn abs(&self) -> Self {
                Self { $($field: $crate::math::scalar::abs(self.$field)),+ }
            }

            /// 线性插值，不限制`t`的范围
            #[inline]
            pub fn lerp(&self, rhs: &Self, t: f32) -> Self {
                *self * (1.0 - t) + *rhs * t
            }

            /// 每个分量都在`epsilon`范围内相等
            #[inline]
            pub fn equals(&self, rhs: &Self, epsilon: f32) -> bool {
                true $(&& $crate::math::scalar::equals(self.$field, rhs.$field, epsilon))+
            }

            #[inline]
            pub fn is_nan(&self) -> bool {
                false $(|| $crate::math::scalar::is_nan(self.$field))+
            }

            /// 原地归一化，已是单位长度或长度为零时保持不变
            pub fn normalize(&mut self) {
                let len_squared = self.length_squared();
                if !$crate::math::scalar::equals(len_squared, 1.0, $crate::math::scalar::LARGE_EPSILON)
                    && len_squared > 0.0
                {
                    let inv_len = 1.0 / len_squared.sqrt();
                    $(self.$field *= inv_len;)+
                }
            }

            /// 返回归一化后的副本，规则同[`Self::normalize`]
            pub fn normalized(&self) -> Self {
                let mut ret = *self;
                ret.normalize();
                ret
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl std::ops::Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl std::ops::Mul<f32> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl std::ops::Mul<$name> for f32 {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl std::ops::Mul for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl std::ops::Div<f32> for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl std::ops::Div for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl std::ops::AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl std::ops::SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl std::ops::MulAssign<f32> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                $(self.$field *= rhs;)+
            }
        }

        impl std::ops::MulAssign for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                $(self.$field *= rhs.$field;)+
            }
        }

        impl std::ops::DivAssign<f32> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                let inv_rhs = 1.0 / rhs;
                $(self.$field *= inv_rhs;)+
            }
        }

        impl std::ops::DivAssign for $name {
            #[inline]
            fn div_assign(&mut self, rhs: Self) {
                $(self.$field /= rhs.$field;)+
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let parts = [$(self.$field.to_string()),+];
                write!(f, "({})", parts.join(", "))
            }
        }
    };
}

pub(crate) use impl_vector_ops;
