//! SIMD功能演示程序

use testbed::config::TestbedConfig;
use testbed::core::init_logging;
use testbed::math::{Accelerator, Matrix4, Quaternion, Vector3, Vector4};
use testbed_simd::{print_cpu_info, BatchConfig, BatchTransform, SimdBackend};

fn main() -> anyhow::Result<()> {
    let mut config = TestbedConfig::default();
    config.apply_env_overrides();
    init_logging(&config.logging);

    println!("=== SIMD功能演示 ===\n");

    // 1. 检测CPU特性
    println!("1. CPU特性检测");
    println!("{}", "-".repeat(50));
    print_cpu_info();

    let backend = SimdBackend::best_available();
    println!("最优SIMD后端: {}", backend);
    println!("向量宽度: {:?}", backend.width());
    println!("f32通道数: {}", backend.f32_lanes());
    println!();

    let accel = Accelerator::from_config(&config.simd)?;
    let scalar = Accelerator::scalar();

    // 2. 矩阵运算
    println!("2. 矩阵运算（{} 对比 {}）", accel.backend(), scalar.backend());
    println!("{}", "-".repeat(50));

    let m = Matrix4::from_trs(
        Vector3::new(1.0, 2.0, 3.0),
        Quaternion::from_angle_axis(45.0, Vector3::UP),
        Vector3::new(2.0, 2.0, 2.0),
    );
    let product = accel.mul_matrix4(&m, &m);
    println!("m * m (加速) = {:?}", product.data());
    println!("与标量一致: {}", product.equals(&scalar.mul_matrix4(&m, &m)));

    let v = Vector4::new(1.0, 0.0, 0.0, 1.0);
    println!("m * {} = {}", v, accel.transform_vector4(&m, &v));
    println!("m * (1, 0, 0) = {}", accel.transform_point(&m, &Vector3::RIGHT));
    println!();

    // 3. 四元数运算
    println!("3. 四元数运算");
    println!("{}", "-".repeat(50));

    let q1 = Quaternion::from_angle_axis(90.0, Vector3::UP);
    let q2 = Quaternion::from_angle_axis(90.0, Vector3::RIGHT);
    let q = accel.mul_quaternion(&q1, &q2);
    println!("q1 * q2 = {}", q);
    println!("(q1 * q2) * FORWARD = {}", q * Vector3::FORWARD);
    println!();

    // 4. 批量变换
    println!("4. 批量变换");
    println!("{}", "-".repeat(50));

    let vectors: Vec<Vector4> = (0..100_000)
        .map(|i| Vector4::new(i as f32, 1.0, 0.0, 1.0))
        .collect();
    let mut output = vec![Vector4::ZERO; vectors.len()];
    let stats = accel.batch_transform_vectors(&config.simd, &m, &vectors, &mut output);
    println!(
        "处理 {} 个顶点，耗时 {} μs，{} 线程，吞吐量 {:.2} M/s",
        stats.elements_processed,
        stats.processing_time_us,
        stats.threads_used,
        stats.throughput() / 1_000_000.0
    );

    // 5. 批量转置
    let matrices: Vec<[f32; 16]> = (0..10_000).map(|i| *(m * i as f32).data()).collect();
    let mut transposed = vec![[0.0f32; 16]; matrices.len()];
    let transformer = BatchTransform::new(BatchConfig::default());
    let stats = transformer.bulk_transpose4(&matrices, &mut transposed);
    println!(
        "转置 {} 个矩阵，后端 {:?}，耗时 {} μs",
        stats.elements_processed, stats.backend_used, stats.processing_time_us
    );

    Ok(())
}
