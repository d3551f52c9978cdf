use testbed::config::TestbedConfig;
use testbed::math::scalar::{equals, LARGE_EPSILON};
use testbed::math::{Accelerator, Matrix3, Matrix3x4, Matrix4, Quaternion, Vector3, Vector4};

fn assert_vec3(actual: Vector3, expected: Vector3) {
    assert!(
        actual.equals(&expected, LARGE_EPSILON),
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_angle_axis_rotates_perpendicular_and_keeps_axis() {
    for angle in [15.0f32, 90.0, 135.0, -60.0] {
        let q = Quaternion::from_angle_axis(angle, Vector3::UP);
        let m = q.rotation_matrix();

        // 轴不变
        assert_vec3(m * Vector3::UP, Vector3::UP);

        // 垂直向量旋转angle度
        let rotated = m * Vector3::RIGHT;
        assert!(equals(rotated.angle(&Vector3::RIGHT), angle.abs(), 1e-2));
        assert!(equals(rotated.length(), 1.0, LARGE_EPSILON));
    }
}

#[test]
fn test_quarter_turn_about_z() {
    let q = Quaternion::from_angle_axis(90.0, Vector3::new(0.0, 0.0, 1.0));
    assert_vec3(q * Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_axes_round_trip() {
    let q = Quaternion::from_euler_angles(25.0, -70.0, 110.0);
    let m = q.rotation_matrix();
    let (x, y, z) = (
        Vector3::new(m.m00, m.m10, m.m20),
        Vector3::new(m.m01, m.m11, m.m21),
        Vector3::new(m.m02, m.m12, m.m22),
    );

    let rebuilt = Quaternion::from_axes(x, y, z).rotation_matrix();
    assert!(rebuilt.equals(&m));

    let back = Quaternion::from_rotation_matrix(&m);
    assert!(back.equals(&q) || back.equals(&-q));
}

#[test]
fn test_identity_is_neutral() {
    let m = Matrix4::from_rows(
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [13.0, 14.0, 15.0, 16.0],
    );
    assert_eq!(Matrix4::IDENTITY * m, m);
    assert_eq!(m * Matrix4::IDENTITY, m);
}

#[test]
fn test_inverses() {
    let q = Quaternion::from_euler_angles(12.0, 34.0, 56.0);
    let scale = Vector3::new(2.0, 0.5, 3.0);
    let t = Vector3::new(-3.0, 7.0, 1.5);

    let m3 = q.rotation_matrix().scaled(scale);
    assert!((m3.inverse() * m3).equals(&Matrix3::IDENTITY));

    let m34 = Matrix3x4::from_trs(t, q, scale);
    assert!((m34.inverse() * m34).equals(&Matrix3x4::IDENTITY));

    let mut m4 = Matrix4::from_trs(t, q, scale);
    m4.m31 = 0.2;
    assert!((m4.inverse() * m4).equals(&Matrix4::IDENTITY));
}

#[test]
fn test_normalize_guards() {
    assert!(equals(Vector3::new(1.0, 0.0, 0.0).normalized().length(), 1.0, LARGE_EPSILON));
    assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);
}

#[test]
fn test_slerp_contract() {
    let a = Quaternion::from_angle_axis(30.0, Vector3::RIGHT);
    let b = Quaternion::from_angle_axis(-100.0, Vector3::new(0.0, 1.0, 1.0));

    assert!(a.slerp(&b, 0.0).equals(&a));
    assert!(a.slerp(&b, 1.0).equals(&b));
    assert!(equals(a.slerp(&b, 0.5).length_squared(), 1.0, LARGE_EPSILON));
}

#[test]
fn test_trs_scenarios() {
    let m = Matrix3x4::from_trs_uniform(Vector3::new(1.0, 2.0, 3.0), Quaternion::IDENTITY, 1.0);
    assert_eq!(m.translation(), Vector3::new(1.0, 2.0, 3.0));

    let m = Matrix4::from_trs_uniform(Vector3::new(5.0, 0.0, 0.0), Quaternion::IDENTITY, 2.0);
    let (translation, rotation, scale) = m.decompose();
    assert_vec3(translation, Vector3::new(5.0, 0.0, 0.0));
    assert_vec3(scale, Vector3::new(2.0, 2.0, 2.0));
    assert!(rotation.equals(&Quaternion::IDENTITY));
}

#[test]
fn test_look_rotation_with_defaults() {
    let mut q = Quaternion::from_angle(45.0);
    assert!(q.set_look_rotation(Vector3::FORWARD, Vector3::UP));
    assert!(q.equals(&Quaternion::IDENTITY));
}

#[test]
fn test_degenerate_inputs_propagate() {
    // 奇异矩阵、零长度向量夹角和零长度列均不做保护
    assert!(Matrix3::ZERO.inverse().is_nan());
    assert!(Vector3::ZERO.angle(&Vector3::UP).is_nan());

    let mut m = Matrix3x4::IDENTITY;
    m.set_scale(Vector3::new(1.0, 0.0, 1.0));
    assert!(m.rotation_matrix().is_nan());

    let (_, rotation, _) = Matrix4::from(m).decompose();
    assert!(rotation.is_nan());

    let p = Matrix4::ZERO * Vector3::ONE;
    assert!(p.is_nan());
}

#[test]
fn test_composition_applies_right_operand_first() {
    let translate = Matrix4::from_trs_uniform(Vector3::new(0.0, 0.0, 10.0), Quaternion::IDENTITY, 1.0);
    let rotate = Matrix4::from(Quaternion::from_angle_axis(90.0, Vector3::UP).rotation_matrix());

    // 先旋转再平移
    assert_vec3((translate * rotate) * Vector3::RIGHT, Vector3::new(0.0, 1.0, 10.0));
    // 先平移再旋转
    assert_vec3((rotate * translate) * Vector3::RIGHT, Vector3::new(0.0, 1.0, 10.0));
    assert_vec3((rotate * translate) * Vector3::FORWARD, Vector3::new(-1.0, 0.0, 10.0));
}

#[test]
fn test_data_is_row_major_and_contiguous() {
    let mut m = Matrix4::IDENTITY;
    m.set_translation(Vector3::new(7.0, 8.0, 9.0));
    let data = m.data();
    assert_eq!(data[3], 7.0);
    assert_eq!(data[7], 8.0);
    assert_eq!(data[11], 9.0);

    let bytes: &[u8] = bytemuck::bytes_of(&m);
    assert_eq!(bytes.len(), 64);
    let as_floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&m));
    assert_eq!(as_floats, &data[..]);
}

#[test]
fn test_accelerator_from_default_config() {
    let config = TestbedConfig::default();
    let accel = Accelerator::from_config(&config.simd).unwrap();

    let a = Matrix4::from_trs(Vector3::ONE, Quaternion::from_angle(30.0), Vector3::new(1.0, 2.0, 3.0));
    let v = Vector4::new(1.0, 2.0, 3.0, 1.0);
    assert!(accel.mul_matrix4(&a, &a).equals(&(a * a)));
    assert!(accel.transform_vector4(&a, &v).equals(&(a * v), LARGE_EPSILON));
}

#[test]
fn test_values_are_thread_safe() {
    let q = Quaternion::from_euler_angles(10.0, 20.0, 30.0);
    let handles: Vec<_> = (0..4)
        .map(|i| std::thread::spawn(move || q * Vector3::new(i as f32, 1.0, 0.0)))
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_vec3(handle.join().unwrap(), q * Vector3::new(i as f32, 1.0, 0.0));
    }
}
