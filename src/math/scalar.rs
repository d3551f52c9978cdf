//! 标量数学辅助函数与常量
//!
//! 角度相关的函数都以度为单位。

/// 小误差
pub const SMALL_EPSILON: f32 = 1e-5;
/// 大误差，四元数和矩阵的近似相等使用此值
pub const LARGE_EPSILON: f32 = 1e-4;
/// 极大误差
pub const HUGE_EPSILON: f32 = 1e-3;

pub const PI: f32 = std::f32::consts::PI;
/// 度转弧度
pub const DEG2RAD: f32 = PI / 180.0;
/// 度转弧度的一半，用于半角公式
pub const DEG2RAD_2: f32 = PI / 360.0;
/// 弧度转度
pub const RAD2DEG: f32 = 180.0 / PI;

/// 在误差范围内比较两个浮点数
#[inline]
pub fn equals(lhs: f32, rhs: f32, eps: f32) -> bool {
    lhs + eps >= rhs && lhs - eps <= rhs
}

#[inline]
pub fn is_zero(value: f32, eps: f32) -> bool {
    equals(value, 0.0, eps)
}

/// 线性插值，不限制`t`的范围
#[inline]
pub fn lerp(lhs: f32, rhs: f32, t: f32) -> f32 {
    lhs * (1.0 - t) + rhs * t
}

#[inline]
pub fn min(lhs: f32, rhs: f32) -> f32 {
    if lhs < rhs {
        lhs
    } else {
        rhs
    }
}

#[inline]
pub fn max(lhs: f32, rhs: f32) -> f32 {
    if lhs > rhs {
        lhs
    } else {
        rhs
    }
}

#[inline]
pub fn abs(value: f32) -> f32 {
    if value >= 0.0 {
        value
    } else {
        -value
    }
}

/// 符号：正数为1，负数为-1，零为0
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// 基于位模式的NaN检测
///
/// 去掉符号位后超过无穷大的位模式即为NaN。
#[inline]
pub fn is_nan(value: f32) -> bool {
    (value.to_bits() & 0x7fff_ffff) > 0x7f80_0000
}

/// 将值限制在`[min, max]`内，NaN原样返回
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Hermite平滑插值
pub fn smooth_step(lhs: f32, rhs: f32, t: f32) -> f32 {
    let t = clamp((t - lhs) / (rhs - lhs), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn sin_deg(degrees: f32) -> f32 {
    (degrees * DEG2RAD).sin()
}

#[inline]
pub fn cos_deg(degrees: f32) -> f32 {
    (degrees * DEG2RAD).cos()
}

#[inline]
pub fn tan_deg(degrees: f32) -> f32 {
    (degrees * DEG2RAD).tan()
}

/// 反正弦（度），参数先限制到`[-1, 1]`
#[inline]
pub fn asin_deg(x: f32) -> f32 {
    RAD2DEG * clamp(x, -1.0, 1.0).asin()
}

/// 反余弦（度），参数先限制到`[-1, 1]`
#[inline]
pub fn acos_deg(x: f32) -> f32 {
    RAD2DEG * clamp(x, -1.0, 1.0).acos()
}

#[inline]
pub fn atan_deg(x: f32) -> f32 {
    RAD2DEG * x.atan()
}

#[inline]
pub fn atan2_deg(y: f32, x: f32) -> f32 {
    RAD2DEG * y.atan2(x)
}

/// 0也视为2的幂
#[inline]
pub fn is_power_of_two(value: u32) -> bool {
    value & value.wrapping_sub(1) == 0
}

/// 不小于`value`的最小2的幂，上限为2^31
pub fn next_power_of_two(value: u32) -> u32 {
    if value >= 0x8000_0000 {
        return 0x8000_0000;
    }
    let mut ret = 1;
    while ret < value {
        ret <<= 1;
    }
    ret
}

#[inline]
pub fn count_set_bits(value: u32) -> u32 {
    value.count_ones()
}
