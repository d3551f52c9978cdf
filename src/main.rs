use std::path::PathBuf;
use std::process::ExitCode;

use testbed::config::TestbedConfig;
use testbed::core::init_logging;
use testbed::math::scalar::LARGE_EPSILON;
use testbed::math::{Accelerator, Matrix3x4, Matrix4, Quaternion, Vector3, Vector4};
use testbed::{TestbedError, TestbedResult};
use testbed_simd::detect_cpu_features;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("testbed failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> TestbedResult<()> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    let mut config = TestbedConfig::load_or_default(path.as_deref())?;
    config.apply_env_overrides();
    config.validate()?;

    init_logging(&config.logging);
    tracing::info!(target: "testbed", "CPU: {}", detect_cpu_features().summary());

    let accel = Accelerator::from_config(&config.simd)?;
    println!("Selected SIMD backend: {}", accel.backend());

    let mismatches = self_check(&accel);
    if mismatches > 0 {
        return Err(TestbedError::General(format!(
            "{} accelerated results differ from the portable path",
            mismatches
        )));
    }

    println!("Self check passed");
    Ok(())
}

/// 对比加速路径与运算符结果，返回不一致的数量
fn self_check(accel: &Accelerator) -> usize {
    let a = Matrix4::from_trs(
        Vector3::new(1.0, -2.0, 3.0),
        Quaternion::from_euler_angles(30.0, 45.0, 60.0),
        Vector3::new(1.0, 2.0, 0.5),
    );
    let mut b = Matrix4::from_trs(
        Vector3::new(-4.0, 0.5, 2.0),
        Quaternion::from_angle_axis(120.0, Vector3::new(1.0, 1.0, 1.0)),
        Vector3::ONE,
    );
    b.m32 = 0.25;

    let qa = Quaternion::from_euler_angles(10.0, -20.0, 80.0);
    let qb = Quaternion::from_rotation_to(Vector3::FORWARD, Vector3::new(1.0, 1.0, 1.0));
    let v = Vector4::new(0.5, -1.5, 2.0, 1.0);
    let p = Vector3::new(3.0, 1.0, -2.0);

    let checks = [
        ("mul_matrix4", accel.mul_matrix4(&a, &b).equals(&(a * b))),
        (
            "mul_matrix3x4",
            {
                let (a3, b3) = (Matrix3x4::from(a), Matrix3x4::from(b));
                accel.mul_matrix3x4(&a3, &b3).equals(&(a3 * b3))
            },
        ),
        ("transpose_matrix4", accel.transpose_matrix4(&a) == a.transpose()),
        (
            "transform_vector4",
            accel.transform_vector4(&b, &v).equals(&(b * v), LARGE_EPSILON),
        ),
        (
            "transform_point",
            accel.transform_point(&b, &p).equals(&(b * p), LARGE_EPSILON),
        ),
        ("mul_quaternion", accel.mul_quaternion(&qa, &qb).equals(&(qa * qb))),
    ];

    let mut mismatches = 0;
    for (name, ok) in checks {
        if ok {
            tracing::debug!(check = name, "ok");
        } else {
            tracing::warn!(check = name, backend = %accel.backend(), "Accelerated result mismatch");
            mismatches += 1;
        }
    }
    mismatches
}
