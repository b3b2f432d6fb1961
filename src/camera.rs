//! First-person camera, perspective projection and the camera uniform.
//!
//! The [`Camera`] is a position with a forward and an up vector. It moves
//! along its own forward axis and turns about the world Y axis, so it never
//! rolls or pitches.

use cgmath::{InnerSpace, Matrix3, Matrix4, Point3, Rad, Vector3, perspective};

/// wgpu clip space has z in [0, 1] where cgmath produces [-1, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Distance covered by one Up/Down key press.
pub const MOVE_STEP: f32 = 0.1;
/// Angle turned by one Left/Right key press.
pub const TURN_STEP: cgmath::Deg<f32> = cgmath::Deg(5.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// At the origin looking down -Z with +Y up.
    pub fn new() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            forward: -Vector3::unit_z(),
            up: Vector3::unit_y(),
        }
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward * distance;
    }

    /// Turns the camera about the world Y axis. Positive angles turn left.
    pub fn rotate_world_y<A: Into<Rad<f32>>>(&mut self, angle: A) {
        let rotation = Matrix3::from_angle_y(angle);
        self.forward = (rotation * self.forward).normalize();
        self.up = (rotation * self.up).normalize();
    }

    /// The world-to-eye matrix.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward, self.up)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            proj: Matrix4::identity().into(),
        }
    }

    /// Model-view matrices are baked into each instance, so only the
    /// projection lives here.
    pub fn update_proj(&mut self, projection: &Projection) {
        self.proj = projection.calc_matrix().into();
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, Vector4};

    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn moving_forward_follows_the_view_direction() {
        let mut camera = Camera::new();
        camera.move_forward(MOVE_STEP);
        camera.move_forward(MOVE_STEP);
        assert!(close(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -0.2)
        ));
    }

    #[test]
    fn turning_left_then_right_is_neutral() {
        let mut camera = Camera::new();
        camera.rotate_world_y(TURN_STEP);
        assert!(camera.forward.x < 0.0);
        camera.rotate_world_y(-TURN_STEP);
        assert!(close(camera.forward, -Vector3::unit_z()));
        assert!(close(camera.up, Vector3::unit_y()));
    }

    #[test]
    fn quarter_turn_moves_along_negative_x() {
        let mut camera = Camera::new();
        camera.rotate_world_y(Deg(90.0));
        camera.move_forward(1.0);
        assert!(close(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn camera_matrix_maps_points_ahead_to_negative_z() {
        let mut camera = Camera::new();
        camera.move_forward(1.0);
        let eye = camera.calc_matrix() * Vector4::new(0.0, 0.0, -3.0, 1.0);
        assert!((eye.z + 2.0).abs() < 1e-5);
    }
}
