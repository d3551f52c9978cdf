//! 标量回退实现
//!
//! 当SIMD不可用时的纯标量实现，同时作为SIMD内核的参照结果。
//! 矩阵均为行主序。

/// 4维向量点积（标量）
pub fn dot_product_scalar(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// 4维向量加法（标量）
pub fn add_vec4_scalar(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    out[0] = a[0] + b[0];
    out[1] = a[1] + b[1];
    out[2] = a[2] + b[2];
    out[3] = a[3] + b[3];
}

/// 4维向量减法（标量）
pub fn sub_vec4_scalar(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    out[0] = a[0] - b[0];
    out[1] = a[1] - b[1];
    out[2] = a[2] - b[2];
    out[3] = a[3] - b[3];
}

/// 4维向量标量乘法
pub fn scale_vec4_scalar(a: &[f32; 4], scalar: f32, out: &mut [f32; 4]) {
    out[0] = a[0] * scalar;
    out[1] = a[1] * scalar;
    out[2] = a[2] * scalar;
    out[3] = a[3] * scalar;
}

/// 4x4矩阵乘法（标量）
pub fn mat4_mul_scalar(a: &[f32; 16], b: &[f32; 16], out: &mut [f32; 16]) {
    for i in 0..4 {
        for j in 0..4 {
            out[i * 4 + j] = a[i * 4] * b[j]
                + a[i * 4 + 1] * b[4 + j]
                + a[i * 4 + 2] * b[8 + j]
                + a[i * 4 + 3] * b[12 + j];
        }
    }
}

/// 3x4仿射矩阵乘法（标量），隐含最后一行为(0, 0, 0, 1)
pub fn mat3x4_mul_scalar(a: &[f32; 12], b: &[f32; 12], out: &mut [f32; 12]) {
    for i in 0..3 {
        for j in 0..4 {
            let mut sum = a[i * 4] * b[j] + a[i * 4 + 1] * b[4 + j] + a[i * 4 + 2] * b[8 + j];
            if j == 3 {
                sum += a[i * 4 + 3];
            }
            out[i * 4 + j] = sum;
        }
    }
}

/// 4x4矩阵乘4维向量（标量）
pub fn mat4_transform_vec4_scalar(m: &[f32; 16], v: &[f32; 4], out: &mut [f32; 4]) {
    for (i, o) in out.iter_mut().enumerate() {
        *o = m[i * 4] * v[0] + m[i * 4 + 1] * v[1] + m[i * 4 + 2] * v[2] + m[i * 4 + 3] * v[3];
    }
}

/// 4x4矩阵转置（标量）
pub fn transpose4_scalar(m: &[f32; 16], out: &mut [f32; 16]) {
    for i in 0..4 {
        for j in 0..4 {
            out[j * 4 + i] = m[i * 4 + j];
        }
    }
}

/// 3x3矩阵转置（标量）
pub fn transpose3_scalar(m: &[f32; 9], out: &mut [f32; 9]) {
    for i in 0..3 {
        for j in 0..3 {
            out[j * 3 + i] = m[i * 3 + j];
        }
    }
}

/// 四元数乘法（标量），布局为`[w, x, y, z]`
pub fn quat_mul_scalar(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    let [aw, ax, ay, az] = *a;
    let [bw, bx, by, bz] = *b;
    out[0] = aw * bw - ax * bx - ay * by - az * bz;
    out[1] = aw * bx + ax * bw + ay * bz - az * by;
    out[2] = aw * by - ax * bz + ay * bw + az * bx;
    out[3] = aw * bz + ax * by - ay * bx + az * bw;
}
