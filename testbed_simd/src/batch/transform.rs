//! 批量变换优化
//!
//! 用于批量处理顶点变换和矩阵转置

use super::{BatchConfig, BatchStats};
use crate::{SimdBackend, SimdKernels};
use std::time::Instant;

/// 批量变换处理器
pub struct BatchTransform {
    config: BatchConfig,
    kernels: SimdKernels,
}

impl BatchTransform {
    pub fn new(config: BatchConfig) -> Self {
        let kernels = SimdKernels::new(config.backend);
        Self { config, kernels }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// 实际使用的内核
    pub fn kernels(&self) -> SimdKernels {
        self.kernels
    }

    /// 批量变换顶点（矩阵 * 向量）
    pub fn transform_vectors(
        &self,
        matrix: &[f32; 16],
        vectors: &[[f32; 4]],
        output: &mut [[f32; 4]],
    ) -> BatchStats {
        assert_eq!(vectors.len(), output.len());

        let start = Instant::now();
        let kernels = self.kernels;
        let threads = self.run_chunked(vectors, output, |src, dst| {
            kernels.transform_vectors(matrix, src, dst);
        });

        self.stats(vectors.len(), threads, start)
    }

    /// 批量转置4x4矩阵，`output[i]`为`matrices[i]`的转置
    pub fn bulk_transpose4(&self, matrices: &[[f32; 16]], output: &mut [[f32; 16]]) -> BatchStats {
        assert_eq!(matrices.len(), output.len());

        let start = Instant::now();
        let kernels = self.kernels;
        let threads = self.run_chunked(matrices, output, |src, dst| {
            for (m, out) in src.iter().zip(dst.iter_mut()) {
                *out = kernels.transpose4(m);
            }
        });

        self.stats(matrices.len(), threads, start)
    }

    /// 批量转置3x3矩阵
    pub fn bulk_transpose3(&self, matrices: &[[f32; 9]], output: &mut [[f32; 9]]) -> BatchStats {
        assert_eq!(matrices.len(), output.len());

        let start = Instant::now();
        let kernels = self.kernels;
        let threads = self.run_chunked(matrices, output, |src, dst| {
            for (m, out) in src.iter().zip(dst.iter_mut()) {
                *out = kernels.transpose3(m);
            }
        });

        self.stats(matrices.len(), threads, start)
    }

    /// 按配置拆分输入并在作用域线程中处理，返回使用的线程数
    fn run_chunked<T, U, F>(&self, src: &[T], dst: &mut [U], f: F) -> usize
    where
        T: Sync,
        U: Send,
        F: Fn(&[T], &mut [U]) + Sync,
    {
        let Some(chunk) = self.config.chunk_size(src.len()) else {
            f(src, dst);
            return 1;
        };

        let f = &f;
        std::thread::scope(|scope| {
            let mut spawned = 0;
            for (s, d) in src.chunks(chunk).zip(dst.chunks_mut(chunk)) {
                scope.spawn(move || f(s, d));
                spawned += 1;
            }
            spawned
        })
    }

    fn stats(&self, count: usize, threads: usize, start: Instant) -> BatchStats {
        let backend = self.kernels.backend();
        BatchStats {
            elements_processed: count,
            processing_time_us: start.elapsed().as_micros() as u64,
            backend_used: (backend != SimdBackend::Scalar).then_some(backend),
            threads_used: threads,
        }
    }
}
