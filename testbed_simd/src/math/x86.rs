//! x86/x64 SIMD数学运算优化
//!
//! 支持SSE2和SSE4.1指令集。AVX/AVX2后端复用这里的128位内核，
//! 因为所有运算都是4分量的。矩阵为行主序。

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// 使用SSE2的4维向量点积
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集（通过is_x86_feature_detected!检查）
///
/// # Examples
///
/// ```rust
/// # #[cfg(target_arch = "x86_64")]
/// # {
/// use testbed_simd::math::x86::dot_product_sse2;
///
/// assert!(is_x86_feature_detected!("sse2"));
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [5.0, 6.0, 7.0, 8.0];
///
/// let result = unsafe { dot_product_sse2(&a, &b) };
/// assert_eq!(result, 70.0);
/// # }
/// ```
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn dot_product_sse2(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    unsafe {
        let va = _mm_loadu_ps(a.as_ptr());
        let vb = _mm_loadu_ps(b.as_ptr());
        let mul = _mm_mul_ps(va, vb);

        // 水平加法
        let shuf = _mm_shuffle_ps(mul, mul, 0b_11_10_11_10);
        let sums = _mm_add_ps(mul, shuf);
        let shuf2 = _mm_shuffle_ps(sums, sums, 0b_01_01_01_01);
        let result = _mm_add_ss(sums, shuf2);

        _mm_cvtss_f32(result)
    }
}

/// 使用SSE4.1的4维向量点积（单条dpps指令）
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE4.1指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.1")]
pub unsafe fn dot_product_sse41(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    unsafe {
        let va = _mm_loadu_ps(a.as_ptr());
        let vb = _mm_loadu_ps(b.as_ptr());
        // 0xF1: 四个分量都参与乘法，结果写入最低位
        _mm_cvtss_f32(_mm_dp_ps(va, vb, 0xF1))
    }
}

/// 使用SSE2的4维向量加法
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn add_vec4_sse2(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    unsafe {
        let va = _mm_loadu_ps(a.as_ptr());
        let vb = _mm_loadu_ps(b.as_ptr());
        _mm_storeu_ps(out.as_mut_ptr(), _mm_add_ps(va, vb));
    }
}

/// 使用SSE2的4维向量减法
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn sub_vec4_sse2(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    unsafe {
        let va = _mm_loadu_ps(a.as_ptr());
        let vb = _mm_loadu_ps(b.as_ptr());
        _mm_storeu_ps(out.as_mut_ptr(), _mm_sub_ps(va, vb));
    }
}

/// 使用SSE2的4维向量标量乘法
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn scale_vec4_sse2(a: &[f32; 4], scalar: f32, out: &mut [f32; 4]) {
    unsafe {
        let va = _mm_loadu_ps(a.as_ptr());
        _mm_storeu_ps(out.as_mut_ptr(), _mm_mul_ps(va, _mm_set1_ps(scalar)));
    }
}

/// 使用SSE2的4x4矩阵乘法
///
/// 结果的每一行是`b`各行按`a`对应行元素加权之和。
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn mat4_mul_sse2(a: &[f32; 16], b: &[f32; 16], out: &mut [f32; 16]) {
    unsafe {
        let b0 = _mm_loadu_ps(b.as_ptr());
        let b1 = _mm_loadu_ps(b.as_ptr().add(4));
        let b2 = _mm_loadu_ps(b.as_ptr().add(8));
        let b3 = _mm_loadu_ps(b.as_ptr().add(12));

        for i in 0..4 {
            let row = &a[i * 4..i * 4 + 4];
            let mut r = _mm_mul_ps(_mm_set1_ps(row[0]), b0);
            r = _mm_add_ps(r, _mm_mul_ps(_mm_set1_ps(row[1]), b1));
            r = _mm_add_ps(r, _mm_mul_ps(_mm_set1_ps(row[2]), b2));
            r = _mm_add_ps(r, _mm_mul_ps(_mm_set1_ps(row[3]), b3));
            _mm_storeu_ps(out.as_mut_ptr().add(i * 4), r);
        }
    }
}

/// 使用SSE2的3x4仿射矩阵乘法，隐含最后一行为(0, 0, 0, 1)
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn mat3x4_mul_sse2(a: &[f32; 12], b: &[f32; 12], out: &mut [f32; 12]) {
    unsafe {
        let b0 = _mm_loadu_ps(b.as_ptr());
        let b1 = _mm_loadu_ps(b.as_ptr().add(4));
        let b2 = _mm_loadu_ps(b.as_ptr().add(8));

        for i in 0..3 {
            let row = &a[i * 4..i * 4 + 4];
            let mut r = _mm_mul_ps(_mm_set1_ps(row[0]), b0);
            r = _mm_add_ps(r, _mm_mul_ps(_mm_set1_ps(row[1]), b1));
            r = _mm_add_ps(r, _mm_mul_ps(_mm_set1_ps(row[2]), b2));
            r = _mm_add_ps(r, _mm_setr_ps(0.0, 0.0, 0.0, row[3]));
            _mm_storeu_ps(out.as_mut_ptr().add(i * 4), r);
        }
    }
}

/// 使用SSE2的矩阵乘向量
///
/// 四行分别与向量相乘后，通过unpack/movehl完成横向求和。
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn mat4_transform_vec4_sse2(m: &[f32; 16], v: &[f32; 4], out: &mut [f32; 4]) {
    unsafe {
        let vv = _mm_loadu_ps(v.as_ptr());
        let p0 = _mm_mul_ps(_mm_loadu_ps(m.as_ptr()), vv);
        let p1 = _mm_mul_ps(_mm_loadu_ps(m.as_ptr().add(4)), vv);
        let p2 = _mm_mul_ps(_mm_loadu_ps(m.as_ptr().add(8)), vv);
        let p3 = _mm_mul_ps(_mm_loadu_ps(m.as_ptr().add(12)), vv);

        let s01 = _mm_add_ps(_mm_unpacklo_ps(p0, p1), _mm_unpackhi_ps(p0, p1));
        let s23 = _mm_add_ps(_mm_unpacklo_ps(p2, p3), _mm_unpackhi_ps(p2, p3));
        let r = _mm_add_ps(_mm_movelh_ps(s01, s23), _mm_movehl_ps(s23, s01));

        _mm_storeu_ps(out.as_mut_ptr(), r);
    }
}

/// 使用SSE2的批量向量变换
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集，且`vectors`与`output`长度相同
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn transform_vectors_sse2(m: &[f32; 16], vectors: &[[f32; 4]], output: &mut [[f32; 4]]) {
    debug_assert_eq!(vectors.len(), output.len());
    for (v, out) in vectors.iter().zip(output.iter_mut()) {
        unsafe { mat4_transform_vec4_sse2(m, v, out) };
    }
}

/// 使用SSE2的4x4矩阵转置
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn transpose4_sse2(m: &[f32; 16], out: &mut [f32; 16]) {
    unsafe {
        let r0 = _mm_loadu_ps(m.as_ptr());
        let r1 = _mm_loadu_ps(m.as_ptr().add(4));
        let r2 = _mm_loadu_ps(m.as_ptr().add(8));
        let r3 = _mm_loadu_ps(m.as_ptr().add(12));

        let t0 = _mm_unpacklo_ps(r0, r1);
        let t1 = _mm_unpacklo_ps(r2, r3);
        let t2 = _mm_unpackhi_ps(r0, r1);
        let t3 = _mm_unpackhi_ps(r2, r3);

        let ptr = out.as_mut_ptr();
        _mm_storeu_ps(ptr, _mm_movelh_ps(t0, t1));
        _mm_storeu_ps(ptr.add(4), _mm_movehl_ps(t1, t0));
        _mm_storeu_ps(ptr.add(8), _mm_movelh_ps(t2, t3));
        _mm_storeu_ps(ptr.add(12), _mm_movehl_ps(t3, t2));
    }
}

/// 使用SSE2的四元数乘法，布局为`[w, x, y, z]`
///
/// # Safety
///
/// 调用者必须确保当前CPU支持SSE2指令集
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
pub unsafe fn quat_mul_sse2(a: &[f32; 4], b: &[f32; 4], out: &mut [f32; 4]) {
    unsafe {
        let vb = _mm_loadu_ps(b.as_ptr());

        // [bx, bw, bz, by]
        let bx = _mm_shuffle_ps(vb, vb, 0b10_11_00_01);
        // [by, bz, bw, bx]
        let by = _mm_shuffle_ps(vb, vb, 0b01_00_11_10);
        // [bz, by, bx, bw]
        let bz = _mm_shuffle_ps(vb, vb, 0b00_01_10_11);

        let mut r = _mm_mul_ps(_mm_set1_ps(a[0]), vb);
        r = _mm_add_ps(
            r,
            _mm_mul_ps(
                _mm_mul_ps(_mm_set1_ps(a[1]), bx),
                _mm_setr_ps(-1.0, 1.0, -1.0, 1.0),
            ),
        );
        r = _mm_add_ps(
            r,
            _mm_mul_ps(
                _mm_mul_ps(_mm_set1_ps(a[2]), by),
                _mm_setr_ps(-1.0, 1.0, 1.0, -1.0),
            ),
        );
        r = _mm_add_ps(
            r,
            _mm_mul_ps(
                _mm_mul_ps(_mm_set1_ps(a[3]), bz),
                _mm_setr_ps(-1.0, -1.0, 1.0, 1.0),
            ),
        );

        _mm_storeu_ps(out.as_mut_ptr(), r);
    }
}
