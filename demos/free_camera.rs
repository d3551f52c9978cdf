//! 自由相机演示
//!
//! 用一段预录的鼠标/键盘输入驱动相机，展示欧拉角到旋转矩阵的转换、
//! 沿相机朝向移动以及由相机变换求视图矩阵。

use testbed::config::TestbedConfig;
use testbed::core::init_logging;
use testbed::math::scalar::clamp;
use testbed::math::{Matrix3, Matrix3x4, Matrix4, Quaternion, Vector2, Vector3};

/// 一帧的输入
#[derive(Debug, Clone, Copy, Default)]
struct FrameInput {
    mouse_delta: Vector2,
    /// x: 右移, y: 前移, z: 上移，取值为-1、0或1
    movement: Vector3,
}

struct FreeCamera {
    position: Vector3,
    /// x: 俯仰, y: 偏航（度）
    orient: Vector2,
    rotation: Matrix3,
    rotation_speed: f32,
    move_speed: f32,
}

impl FreeCamera {
    fn new() -> Self {
        Self {
            position: Vector3::ZERO,
            orient: Vector2::ZERO,
            rotation: Matrix3::IDENTITY,
            rotation_speed: 0.2,
            move_speed: 5.0,
        }
    }

    fn update(&mut self, input: &FrameInput, dt: f32) {
        let delta = input.mouse_delta * self.rotation_speed;
        self.orient.y += delta.x;
        self.orient.x = clamp(self.orient.x - delta.y, -80.0, 80.0);
        self.rotation = self.orientation().rotation_matrix();

        // 旋转矩阵的三列即相机的右、前、上方向
        let right = self.rotation * Vector3::RIGHT;
        let forward = self.rotation * Vector3::FORWARD;
        let up = self.rotation * Vector3::UP;

        let step = input.movement * (self.move_speed * dt);
        self.position += right * step.x + forward * step.y + up * step.z;
    }

    fn orientation(&self) -> Quaternion {
        Quaternion::from_euler_angles(self.orient.x, self.orient.y, 0.0)
    }

    fn world_transform(&self) -> Matrix3x4 {
        Matrix3x4::from_trs_uniform(self.position, self.orientation(), 1.0)
    }

    fn view_matrix(&self) -> Matrix4 {
        self.world_transform().inverse().to_matrix4()
    }
}

fn scripted_input() -> Vec<FrameInput> {
    let mut frames = Vec::new();
    for i in 0..120 {
        let mouse_delta = if i < 60 {
            Vector2::new(3.0, 0.0)
        } else {
            Vector2::new(0.0, -2.0)
        };
        let movement = if i % 2 == 0 {
            Vector3::FORWARD
        } else {
            Vector3::new(0.0, 1.0, 0.5)
        };
        frames.push(FrameInput { mouse_delta, movement });
    }
    frames
}

fn main() {
    let config = TestbedConfig::default();
    init_logging(&config.logging);

    let mut camera = FreeCamera::new();
    let dt = 0.016;

    for (frame, input) in scripted_input().iter().enumerate() {
        camera.update(input, dt);

        if frame % 30 == 29 {
            let view = camera.view_matrix();
            // 视图矩阵把相机位置映射到原点
            let origin = view * camera.position;
            println!(
                "frame {:3}: position {} pitch {:.1} yaw {:.1} view*eye {}",
                frame + 1,
                camera.position,
                camera.orientation().pitch_angle(),
                camera.orientation().yaw_angle(),
                origin
            );
        }
    }

    let target = camera.position + camera.rotation * Vector3::FORWARD * 10.0;
    let look = Quaternion::look_rotation(target - camera.position, Vector3::UP)
        .unwrap_or(Quaternion::IDENTITY);
    println!(
        "look rotation towards target matches camera: {}",
        (look * Vector3::FORWARD).equals(&(camera.rotation * Vector3::FORWARD), 1e-3)
    );
}
