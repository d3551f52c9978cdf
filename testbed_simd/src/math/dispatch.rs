//! 运行时动态分发系统
//!
//! 根据选定的后端调用对应的SIMD内核，不支持时退回标量实现

use super::scalar::*;
use crate::SimdBackend;

#[cfg(target_arch = "x86_64")]
use super::x86::*;

#[cfg(target_arch = "aarch64")]
use super::arm::*;

/// 绑定到某个SIMD后端的内核集合
///
/// 构造时校验后端是否被当前CPU支持，之后的调用不再重复检测。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimdKernels {
    backend: SimdBackend,
}

impl Default for SimdKernels {
    fn default() -> Self {
        Self::new(SimdBackend::best_available())
    }
}

impl SimdKernels {
    /// 创建内核集合，不受支持的后端降级为`Scalar`
    pub fn new(backend: SimdBackend) -> Self {
        let backend = if backend.is_supported() {
            backend
        } else {
            SimdBackend::Scalar
        };
        Self { backend }
    }

    /// 纯标量内核
    pub fn scalar() -> Self {
        Self {
            backend: SimdBackend::Scalar,
        }
    }

    /// 实际使用的后端
    pub fn backend(&self) -> SimdBackend {
        self.backend
    }

    fn is_simd(&self) -> bool {
        self.backend != SimdBackend::Scalar
    }

    /// 4维向量点积
    pub fn dot4(&self, a: &[f32; 4], b: &[f32; 4]) -> f32 {
        #[cfg(target_arch = "x86_64")]
        {
            match self.backend {
                SimdBackend::Sse41 | SimdBackend::Avx | SimdBackend::Avx2 => {
                    return unsafe { dot_product_sse41(a, b) };
                }
                SimdBackend::Sse2 => return unsafe { dot_product_sse2(a, b) },
                _ => {}
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                return unsafe { dot_product_neon(a, b) };
            }
        }

        dot_product_scalar(a, b)
    }

    /// 4维向量加法
    pub fn add4(&self, a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { add_vec4_sse2(a, b, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { add_vec4_neon(a, b, &mut out) };
                return out;
            }
        }

        add_vec4_scalar(a, b, &mut out);
        out
    }

    /// 4维向量减法
    pub fn sub4(&self, a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { sub_vec4_sse2(a, b, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { sub_vec4_neon(a, b, &mut out) };
                return out;
            }
        }

        sub_vec4_scalar(a, b, &mut out);
        out
    }

    /// 4维向量标量乘法
    pub fn scale4(&self, a: &[f32; 4], scalar: f32) -> [f32; 4] {
        let mut out = [0.0; 4];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { scale_vec4_sse2(a, scalar, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { scale_vec4_neon(a, scalar, &mut out) };
                return out;
            }
        }

        scale_vec4_scalar(a, scalar, &mut out);
        out
    }

    /// 4x4矩阵乘法（行主序）
    pub fn mat4_mul(&self, a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
        let mut out = [0.0; 16];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { mat4_mul_sse2(a, b, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { mat4_mul_neon(a, b, &mut out) };
                return out;
            }
        }

        mat4_mul_scalar(a, b, &mut out);
        out
    }

    /// 3x4仿射矩阵乘法（行主序，隐含最后一行为(0, 0, 0, 1)）
    pub fn mat3x4_mul(&self, a: &[f32; 12], b: &[f32; 12]) -> [f32; 12] {
        let mut out = [0.0; 12];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { mat3x4_mul_sse2(a, b, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { mat3x4_mul_neon(a, b, &mut out) };
                return out;
            }
        }

        mat3x4_mul_scalar(a, b, &mut out);
        out
    }

    /// 矩阵乘4维向量
    pub fn mat4_transform_vec4(&self, m: &[f32; 16], v: &[f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { mat4_transform_vec4_sse2(m, v, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { mat4_transform_vec4_neon(m, v, &mut out) };
                return out;
            }
        }

        mat4_transform_vec4_scalar(m, v, &mut out);
        out
    }

    /// 批量矩阵乘向量，`vectors`与`output`长度必须相同
    pub fn transform_vectors(&self, m: &[f32; 16], vectors: &[[f32; 4]], output: &mut [[f32; 4]]) {
        assert_eq!(vectors.len(), output.len());

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { transform_vectors_sse2(m, vectors, output) };
                return;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { transform_vectors_neon(m, vectors, output) };
                return;
            }
        }

        for (v, out) in vectors.iter().zip(output.iter_mut()) {
            mat4_transform_vec4_scalar(m, v, out);
        }
    }

    /// 4x4矩阵转置
    pub fn transpose4(&self, m: &[f32; 16]) -> [f32; 16] {
        let mut out = [0.0; 16];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { transpose4_sse2(m, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { transpose4_neon(m, &mut out) };
                return out;
            }
        }

        transpose4_scalar(m, &mut out);
        out
    }

    /// 3x3矩阵转置，没有对应的SIMD内核
    pub fn transpose3(&self, m: &[f32; 9]) -> [f32; 9] {
        let mut out = [0.0; 9];
        transpose3_scalar(m, &mut out);
        out
    }

    /// 四元数乘法，布局为`[w, x, y, z]`
    pub fn quat_mul(&self, a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];

        #[cfg(target_arch = "x86_64")]
        {
            if self.is_simd() {
                unsafe { quat_mul_sse2(a, b, &mut out) };
                return out;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if self.is_simd() {
                unsafe { quat_mul_neon(a, b, &mut out) };
                return out;
            }
        }

        quat_mul_scalar(a, b, &mut out);
        out
    }
}
