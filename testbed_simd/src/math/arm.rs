//! ARM NEON SIMD数学运算优化
//!
//! aarch64上NEON是强制特性。矩阵为行主序。

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

/// 使用NEON的4维向量点积
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集（aarch64上始终满足）
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn dot_product_neon(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    unsafe {
        let va = vld1q_f32(a.as_ptr());
        let vb = vld1q_f32(b.as_ptr());
        // 使用vaddvq_f32进行水平加法（ARMv8）
        vaddvq_f32(vmulq_f32(va, vb))
    }
}

/// 使用NEON的4维向量加法
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn add_vec4_neon(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    unsafe {
        let va = vld1q_f32(a.as_ptr());
        let vb = vld1q_f32(b.as_ptr());
        vst1q_f32(out.as_mut_ptr(), vaddq_f32(va, vb));
    }
}

/// 使用NEON的4维向量减法
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn sub_vec4_neon(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    unsafe {
        let va = vld1q_f32(a.as_ptr());
        let vb = vld1q_f32(b.as_ptr());
        vst1q_f32(out.as_mut_ptr(), vsubq_f32(va, vb));
    }
}

/// 使用NEON的4维向量标量乘法
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn scale_vec4_neon(a: &[f32; 4], scalar: f32, out: &mut [f32; 4]) {
    unsafe {
        let va = vld1q_f32(a.as_ptr());
        vst1q_f32(out.as_mut_ptr(), vmulq_n_f32(va, scalar));
    }
}

/// 使用NEON的4x4矩阵乘法
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn mat4_mul_neon(a: &[f32; 16], b: &[f32; 16], out: &mut [f32; 16]) {
    unsafe {
        let b0 = vld1q_f32(b.as_ptr());
        let b1 = vld1q_f32(b.as_ptr().add(4));
        let b2 = vld1q_f32(b.as_ptr().add(8));
        let b3 = vld1q_f32(b.as_ptr().add(12));

        for i in 0..4 {
            let row = &a[i * 4..i * 4 + 4];
            let mut r = vmulq_n_f32(b0, row[0]);
            r = vaddq_f32(r, vmulq_n_f32(b1, row[1]));
            r = vaddq_f32(r, vmulq_n_f32(b2, row[2]));
            r = vaddq_f32(r, vmulq_n_f32(b3, row[3]));
            vst1q_f32(out.as_mut_ptr().add(i * 4), r);
        }
    }
}

/// 使用NEON的3x4仿射矩阵乘法，隐含最后一行为(0, 0, 0, 1)
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn mat3x4_mul_neon(a: &[f32; 12], b: &[f32; 12], out: &mut [f32; 12]) {
    unsafe {
        let b0 = vld1q_f32(b.as_ptr());
        let b1 = vld1q_f32(b.as_ptr().add(4));
        let b2 = vld1q_f32(b.as_ptr().add(8));

        for i in 0..3 {
            let row = &a[i * 4..i * 4 + 4];
            let mut r = vmulq_n_f32(b0, row[0]);
            r = vaddq_f32(r, vmulq_n_f32(b1, row[1]));
            r = vaddq_f32(r, vmulq_n_f32(b2, row[2]));
            let translation = [0.0, 0.0, 0.0, row[3]];
            r = vaddq_f32(r, vld1q_f32(translation.as_ptr()));
            vst1q_f32(out.as_mut_ptr().add(i * 4), r);
        }
    }
}

/// 使用NEON的矩阵乘向量
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn mat4_transform_vec4_neon(m: &[f32; 16], v: &[f32; 4], out: &mut [f32; 4]) {
    unsafe {
        let vv = vld1q_f32(v.as_ptr());
        for (i, o) in out.iter_mut().enumerate() {
            let row = vld1q_f32(m.as_ptr().add(i * 4));
            *o = vaddvq_f32(vmulq_f32(row, vv));
        }
    }
}

/// 使用NEON的批量向量变换
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集，且`vectors`与`output`长度相同
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn transform_vectors_neon(m: &[f32; 16], vectors: &[[f32; 4]], output: &mut [[f32; 4]]) {
    debug_assert_eq!(vectors.len(), output.len());
    for (v, out) in vectors.iter().zip(output.iter_mut()) {
        unsafe { mat4_transform_vec4_neon(m, v, out) };
    }
}

/// 使用NEON的4x4矩阵转置
///
/// `vld4q_f32`按步长4解交织加载，得到的四个寄存器正好是原矩阵的四列。
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn transpose4_neon(m: &[f32; 16], out: &mut [f32; 16]) {
    unsafe {
        let cols = vld4q_f32(m.as_ptr());
        let ptr = out.as_mut_ptr();
        vst1q_f32(ptr, cols.0);
        vst1q_f32(ptr.add(4), cols.1);
        vst1q_f32(ptr.add(8), cols.2);
        vst1q_f32(ptr.add(12), cols.3);
    }
}

/// 使用NEON的四元数乘法，布局为`[w, x, y, z]`
///
/// # Safety
///
/// 调用者必须确保当前CPU支持NEON指令集
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn quat_mul_neon(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    const SIGN_X: [f32; 4] = [-1.0, 1.0, -1.0, 1.0];
    const SIGN_Y: [f32; 4] = [-1.0, 1.0, 1.0, -1.0];
    const SIGN_Z: [f32; 4] = [-1.0, -1.0, 1.0, 1.0];

    unsafe {
        let vb = vld1q_f32(b.as_ptr());
        // [bx, bw, bz, by]
        let bx = vrev64q_f32(vb);
        // [by, bz, bw, bx]
        let by = vextq_f32(vb, vb, 2);
        // [bz, by, bx, bw]
        let bz = vrev64q_f32(by);

        let mut r = vmulq_n_f32(vb, a[0]);
        r = vaddq_f32(r, vmulq_f32(vmulq_n_f32(bx, a[1]), vld1q_f32(SIGN_X.as_ptr())));
        r = vaddq_f32(r, vmulq_f32(vmulq_n_f32(by, a[2]), vld1q_f32(SIGN_Y.as_ptr())));
        r = vaddq_f32(r, vmulq_f32(vmulq_n_f32(bz, a[3]), vld1q_f32(SIGN_Z.as_ptr())));

        vst1q_f32(out.as_mut_ptr(), r);
    }
}

#[cfg(all(test, target_arch = "aarch64"))]
mod tests {
    use super::*;
    use crate::math::scalar::*;

    fn assert_close(a: &[f32], b: &[f32]) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-4, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_dot_product() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        assert_eq!(unsafe { dot_product_neon(&a, &b) }, 70.0);
    }

    #[test]
    fn test_mat4_mul_matches_scalar() {
        let a: [f32; 16] = std::array::from_fn(|i| (i as f32 * 0.37).sin() * 4.0);
        let b: [f32; 16] = std::array::from_fn(|i| (i as f32 * 0.53 + 1.0).cos() * 2.0);
        let mut simd = [0.0; 16];
        let mut scalar = [0.0; 16];

        unsafe { mat4_mul_neon(&a, &b, &mut simd) };
        mat4_mul_scalar(&a, &b, &mut scalar);
        assert_close(&simd, &scalar);
    }

    #[test]
    fn test_mat3x4_mul_matches_scalar() {
        let a: [f32; 12] = std::array::from_fn(|i| (i as f32 * 0.71).cos());
        let b: [f32; 12] = std::array::from_fn(|i| (i as f32 * 0.29 + 0.5).sin());
        let mut simd = [0.0; 12];
        let mut scalar = [0.0; 12];

        unsafe { mat3x4_mul_neon(&a, &b, &mut simd) };
        mat3x4_mul_scalar(&a, &b, &mut scalar);
        assert_close(&simd, &scalar);
    }

    #[test]
    fn test_transpose_matches_scalar() {
        let m: [f32; 16] = std::array::from_fn(|i| i as f32);
        let mut simd = [0.0; 16];
        let mut scalar = [0.0; 16];

        unsafe { transpose4_neon(&m, &mut simd) };
        transpose4_scalar(&m, &mut scalar);
        assert_eq!(simd, scalar);
    }

    #[test]
    fn test_quat_mul_matches_scalar() {
        let a = [0.9, 0.1, -0.3, 0.2];
        let b = [0.4, -0.5, 0.6, 0.7];
        let mut simd = [0.0; 4];
        let mut scalar = [0.0; 4];

        unsafe { quat_mul_neon(&a, &b, &mut simd) };
        quat_mul_scalar(&a, &b, &mut scalar);
        assert_close(&simd, &scalar);
    }
}
