//! SIMD性能基准测试
//!
//! 对比每个可用后端与标量内核

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use testbed::config::SimdConfig;
use testbed::math::{Accelerator, Matrix4, Quaternion, Vector3, Vector4};
use testbed_simd::{BatchConfig, BatchTransform, SimdBackend};

fn accelerators() -> Vec<Accelerator> {
    SimdBackend::ALL
        .iter()
        .copied()
        .filter(|b| b.is_supported())
        .map(Accelerator::with_backend)
        .collect()
}

fn sample_matrix() -> Matrix4 {
    Matrix4::from_trs(
        Vector3::new(1.0, 2.0, 3.0),
        Quaternion::from_euler_angles(15.0, 30.0, 45.0),
        Vector3::new(2.0, 1.0, 0.5),
    )
}

fn bench_mat4_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("mat4_mul");
    let m = sample_matrix();

    for accel in accelerators() {
        group.bench_with_input(BenchmarkId::from_parameter(accel.backend()), &accel, |b, accel| {
            b.iter(|| black_box(accel.mul_matrix4(black_box(&m), black_box(&m))));
        });
    }

    group.finish();
}

fn bench_transform_vector4(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_vector4");
    let m = sample_matrix();
    let v = Vector4::new(1.0, 2.0, 3.0, 1.0);

    for accel in accelerators() {
        group.bench_with_input(BenchmarkId::from_parameter(accel.backend()), &accel, |b, accel| {
            b.iter(|| black_box(accel.transform_vector4(black_box(&m), black_box(&v))));
        });
    }

    group.finish();
}

fn bench_quaternion_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("quaternion_mul");
    let qa = Quaternion::from_euler_angles(10.0, 20.0, 30.0);
    let qb = Quaternion::from_angle_axis(60.0, Vector3::ONE);

    for accel in accelerators() {
        group.bench_with_input(BenchmarkId::from_parameter(accel.backend()), &accel, |b, accel| {
            b.iter(|| black_box(accel.mul_quaternion(black_box(&qa), black_box(&qb))));
        });
    }

    group.finish();
}

fn bench_batch_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_transform");
    let m = sample_matrix();

    for count in [1_000usize, 10_000, 100_000] {
        let vectors: Vec<Vector4> = (0..count)
            .map(|i| Vector4::new(i as f32, (i % 7) as f32, 1.0, 1.0))
            .collect();
        let mut output = vec![Vector4::ZERO; count];
        group.throughput(Throughput::Elements(count as u64));

        let accel = Accelerator::detect();
        group.bench_with_input(BenchmarkId::new("single_thread", count), &count, |b, _| {
            b.iter(|| accel.transform_vectors(&m, black_box(&vectors), &mut output));
        });

        let config = SimdConfig::default();
        group.bench_with_input(BenchmarkId::new("threaded", count), &count, |b, _| {
            b.iter(|| accel.batch_transform_vectors(&config, &m, black_box(&vectors), &mut output));
        });
    }

    group.finish();
}

fn bench_bulk_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_transpose");
    let matrices: Vec<[f32; 16]> = (0..10_000).map(|i| *(sample_matrix() * i as f32).data()).collect();
    let mut output = vec![[0.0f32; 16]; matrices.len()];

    let transformer = BatchTransform::new(BatchConfig::default());
    group.bench_function("batch", |b| {
        b.iter(|| transformer.bulk_transpose4(black_box(&matrices), &mut output));
    });

    let scalar = BatchTransform::new(BatchConfig {
        backend: SimdBackend::Scalar,
        use_threading: false,
        ..Default::default()
    });
    group.bench_function("scalar", |b| {
        b.iter(|| scalar.bulk_transpose4(black_box(&matrices), &mut output));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mat4_mul,
    bench_transform_vector4,
    bench_quaternion_mul,
    bench_batch_transform,
    bench_bulk_transpose
);
criterion_main!(benches);
