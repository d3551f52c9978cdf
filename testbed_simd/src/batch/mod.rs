//! 批量数据处理SIMD优化模块
//!
//! 用于大批量的矩阵转置和顶点变换

mod transform;

pub use transform::*;

use crate::SimdBackend;

/// 批量处理配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// 批量大小，超过该数量且启用多线程时才拆分到多个线程
    pub batch_size: usize,
    /// 使用的SIMD后端
    pub backend: SimdBackend,
    /// 是否启用多线程
    pub use_threading: bool,
    /// 线程数（0表示自动检测）
    pub num_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1024,
            backend: SimdBackend::best_available(),
            use_threading: true,
            num_threads: 0,
        }
    }
}

impl BatchConfig {
    /// 获取实际使用的线程数
    pub fn get_num_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }

    /// 给定元素数量时每个线程处理的块大小，返回`None`表示单线程处理
    pub fn chunk_size(&self, count: usize) -> Option<usize> {
        let threads = self.get_num_threads();
        if !self.use_threading || threads <= 1 || count <= self.batch_size.max(1) {
            return None;
        }
        Some(count.div_ceil(threads).max(self.batch_size.max(1)))
    }
}

/// 批量处理统计信息
#[derive(Debug, Default, Clone)]
pub struct BatchStats {
    /// 处理的元素数量
    pub elements_processed: usize,
    /// 处理时间（微秒）
    pub processing_time_us: u64,
    /// 使用的SIMD后端，标量回退时为`None`
    pub backend_used: Option<SimdBackend>,
    /// 参与处理的线程数
    pub threads_used: usize,
}

impl BatchStats {
    /// 计算吞吐量（元素/秒）
    pub fn throughput(&self) -> f64 {
        if self.processing_time_us == 0 {
            return 0.0;
        }
        (self.elements_processed as f64) / (self.processing_time_us as f64 / 1_000_000.0)
    }
}
