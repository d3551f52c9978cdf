//! SIMD加速路径
//!
//! 以数学类型为接口包装`testbed_simd`的内核。结果与运算符实现在
//! `LARGE_EPSILON`内一致，只是计算路径不同。关闭`simd`特性时始终使用标量内核。

use super::{Matrix3x4, Matrix4, Quaternion, Vector3, Vector4};
use crate::config::SimdConfig;
use crate::core::{TestbedError, TestbedResult};
use testbed_simd::{BatchStats, BatchTransform, SimdBackend, SimdKernels};

/// 绑定到某个后端的加速器
#[derive(Debug, Clone, Copy)]
pub struct Accelerator {
    kernels: SimdKernels,
}

impl Default for Accelerator {
    fn default() -> Self {
        Self::detect()
    }
}

impl Accelerator {
    /// 纯标量路径
    pub fn scalar() -> Self {
        Self {
            kernels: SimdKernels::scalar(),
        }
    }

    /// 使用当前CPU支持的最佳后端
    pub fn detect() -> Self {
        if cfg!(feature = "simd") {
            Self::with_backend(SimdBackend::best_available())
        } else {
            Self::scalar()
        }
    }

    /// 使用指定后端，不支持时降级为标量
    pub fn with_backend(backend: SimdBackend) -> Self {
        if !cfg!(feature = "simd") {
            return Self::scalar();
        }
        let kernels = SimdKernels::new(backend);
        if kernels.backend() != backend {
            tracing::warn!(
                requested = %backend,
                "SIMD backend not supported by this CPU, falling back to scalar"
            );
        }
        Self { kernels }
    }

    /// 按配置选择后端
    ///
    /// 强制指定的后端不被当前CPU支持时返回`BackendUnavailable`。
    pub fn from_config(config: &SimdConfig) -> TestbedResult<Self> {
        config.validate()?;
        let requested = config.requested_backend()?;

        if !requested.is_supported() {
            return Err(TestbedError::BackendUnavailable(requested.to_string()));
        }

        let accel = Self::with_backend(requested);
        tracing::info!(backend = %accel.backend(), "SIMD backend selected");
        Ok(accel)
    }

    /// 实际使用的后端
    pub fn backend(&self) -> SimdBackend {
        self.kernels.backend()
    }

    pub fn kernels(&self) -> SimdKernels {
        self.kernels
    }

    pub fn mul_matrix4(&self, a: &Matrix4, b: &Matrix4) -> Matrix4 {
        Matrix4::from_array(self.kernels.mat4_mul(a.data(), b.data()))
    }

    pub fn mul_matrix3x4(&self, a: &Matrix3x4, b: &Matrix3x4) -> Matrix3x4 {
        Matrix3x4::from_array(self.kernels.mat3x4_mul(a.data(), b.data()))
    }

    pub fn transpose_matrix4(&self, m: &Matrix4) -> Matrix4 {
        Matrix4::from_array(self.kernels.transpose4(m.data()))
    }

    pub fn transform_vector4(&self, m: &Matrix4, v: &Vector4) -> Vector4 {
        bytemuck::cast(self.kernels.mat4_transform_vec4(m.data(), v.data()))
    }

    /// 以w = 1变换点并做透视除法，与`Matrix4 * Vector3`一致
    pub fn transform_point(&self, m: &Matrix4, p: &Vector3) -> Vector3 {
        let v = Vector4::from_vector3(*p, 1.0);
        let out = self.transform_vector4(m, &v);
        let inv_w = 1.0 / out.w;
        out.xyz() * inv_w
    }

    pub fn mul_quaternion(&self, a: &Quaternion, b: &Quaternion) -> Quaternion {
        Quaternion::from_array(self.kernels.quat_mul(a.data(), b.data()))
    }

    /// `output[i] = m * vectors[i]`
    ///
    /// # Panics
    ///
    /// 两个切片长度不同时panic
    pub fn transform_vectors(&self, m: &Matrix4, vectors: &[Vector4], output: &mut [Vector4]) {
        assert_eq!(vectors.len(), output.len(), "transform_vectors length mismatch");
        self.kernels.transform_vectors(
            m.data(),
            bytemuck::cast_slice(vectors),
            bytemuck::cast_slice_mut(output),
        );
    }

    /// `dest[i] = src[i].transpose()`
    ///
    /// # Panics
    ///
    /// 两个切片长度不同时panic
    pub fn bulk_transpose_matrix4(&self, dest: &mut [Matrix4], src: &[Matrix4]) {
        assert_eq!(dest.len(), src.len(), "bulk_transpose length mismatch");
        for (d, s) in dest.iter_mut().zip(src) {
            *d = self.transpose_matrix4(s);
        }
    }

    /// 大批量顶点变换，按配置拆分到多个线程
    pub fn batch_transform_vectors(
        &self,
        config: &SimdConfig,
        m: &Matrix4,
        vectors: &[Vector4],
        output: &mut [Vector4],
    ) -> BatchStats {
        let batch = BatchTransform::new(config.batch_config(self.backend()));
        let stats = batch.transform_vectors(
            m.data(),
            bytemuck::cast_slice(vectors),
            bytemuck::cast_slice_mut(output),
        );
        tracing::trace!(
            elements = stats.elements_processed,
            threads = stats.threads_used,
            "Batch transform finished"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::scalar::LARGE_EPSILON;

    fn backends() -> Vec<Accelerator> {
        SimdBackend::ALL
            .iter()
            .filter(|b| b.is_supported())
            .map(|b| Accelerator::with_backend(*b))
            .collect()
    }

    fn sample_matrix() -> Matrix4 {
        Matrix4::from_trs(
            Vector3::new(1.0, 2.0, 3.0),
            Quaternion::from_euler_angles(20.0, 40.0, 60.0),
            Vector3::new(1.5, 0.5, 2.0),
        )
    }

    #[test]
    fn test_scalar_backend() {
        let accel = Accelerator::scalar();
        assert_eq!(accel.backend(), SimdBackend::Scalar);
    }

    #[test]
    fn test_matrix_ops_match_operators() {
        let a = sample_matrix();
        let mut b = sample_matrix().transpose();
        b.m30 = 0.25;

        for accel in backends() {
            assert!(accel.mul_matrix4(&a, &b).equals(&(a * b)), "{}", accel.backend());
            assert_eq!(accel.transpose_matrix4(&a), a.transpose());

            let a3 = Matrix3x4::from(a);
            let b3 = Matrix3x4::from(sample_matrix().inverse());
            assert!(accel.mul_matrix3x4(&a3, &b3).equals(&(a3 * b3)));
        }
    }

    #[test]
    fn test_vector_ops_match_operators() {
        let mut m = sample_matrix();
        m.m31 = 0.1;
        let v = Vector4::new(1.0, -2.0, 0.5, 1.0);
        let p = Vector3::new(0.5, 0.25, -1.0);

        for accel in backends() {
            assert!(accel.transform_vector4(&m, &v).equals(&(m * v), LARGE_EPSILON));
            assert!(accel.transform_point(&m, &p).equals(&(m * p), LARGE_EPSILON));
        }
    }

    #[test]
    fn test_quaternion_matches_operator() {
        let a = Quaternion::from_euler_angles(10.0, 20.0, 30.0);
        let b = Quaternion::from_angle_axis(75.0, Vector3::new(1.0, -1.0, 2.0));

        for accel in backends() {
            assert!(accel.mul_quaternion(&a, &b).equals(&(a * b)), "{}", accel.backend());
        }
    }

    #[test]
    fn test_bulk_operations() {
        let m = sample_matrix();
        let vectors: Vec<Vector4> = (0..37)
            .map(|i| Vector4::new(i as f32, 1.0 - i as f32, 0.5 * i as f32, 1.0))
            .collect();
        let mats: Vec<Matrix4> = (0..5).map(|i| sample_matrix() * i as f32).collect();

        for accel in backends() {
            let mut out = vec![Vector4::ZERO; vectors.len()];
            accel.transform_vectors(&m, &vectors, &mut out);
            for (v, o) in vectors.iter().zip(&out) {
                assert!(o.equals(&(m * *v), 1e-3));
            }

            let mut transposed = vec![Matrix4::ZERO; mats.len()];
            accel.bulk_transpose_matrix4(&mut transposed, &mats);
            for (t, s) in transposed.iter().zip(&mats) {
                assert_eq!(*t, s.transpose());
            }
        }
    }

    #[test]
    fn test_batch_transform_threaded_matches_sequential() {
        let config = SimdConfig {
            batch_size: 16,
            use_threading: true,
            num_threads: 4,
            ..Default::default()
        };
        let m = sample_matrix();
        let vectors: Vec<Vector4> = (0..200)
            .map(|i| Vector4::new(i as f32 * 0.1, 2.0, -(i as f32), 1.0))
            .collect();

        let accel = Accelerator::detect();
        let mut threaded = vec![Vector4::ZERO; vectors.len()];
        let stats = accel.batch_transform_vectors(&config, &m, &vectors, &mut threaded);
        assert_eq!(stats.elements_processed, 200);
        assert!(stats.threads_used > 1);

        let mut sequential = vec![Vector4::ZERO; vectors.len()];
        accel.transform_vectors(&m, &vectors, &mut sequential);
        assert_eq!(threaded, sequential);
    }

    #[test]
    fn test_from_config() {
        let config = SimdConfig {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(Accelerator::from_config(&config).unwrap().backend(), SimdBackend::Scalar);

        let config = SimdConfig {
            force_backend: Some("bogus".to_string()),
            ..Default::default()
        };
        assert!(matches!(Accelerator::from_config(&config), Err(TestbedError::Config(_))));

        if let Some(missing) = SimdBackend::ALL.iter().find(|b| !b.is_supported()) {
            let config = SimdConfig {
                force_backend: Some(missing.name().to_string()),
                ..Default::default()
            };
            assert!(matches!(
                Accelerator::from_config(&config),
                Err(TestbedError::BackendUnavailable(_))
            ));
        }
    }
}
