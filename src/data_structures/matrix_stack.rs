//! Scoped model-view matrices and the transform pipeline.
//!
//! [`MatrixStack`] is the scene's only source of placement: every part is
//! drawn with whatever matrix sits on top of the stack at that moment.
//! Transform calls right-multiply the top, so the last transform issued is
//! the first one applied to the geometry.

use cgmath::{InnerSpace, Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Vector4};

#[derive(Clone, Debug)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    /// A stack holding only the identity matrix.
    pub fn new() -> Self {
        Self {
            stack: vec![Matrix4::identity()],
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> Matrix4<f32> {
        *self.top_ref()
    }

    fn top_ref(&self) -> &Matrix4<f32> {
        // the base matrix is never popped
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix4<f32> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    /// Discards the top matrix.
    ///
    /// # Panics
    ///
    /// Panics when only the base matrix is left: an unmatched pop would
    /// silently misplace everything drawn after it.
    pub fn pop(&mut self) {
        if self.stack.len() == 1 {
            panic!("matrix stack underflow: pop without a matching push");
        }
        self.stack.pop();
    }

    /// Runs `f` between a push and its matching pop and checks that `f` left
    /// the stack as deep as it found it.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.depth();
        self.push();
        let result = f(self);
        assert_eq!(
            self.depth(),
            depth + 1,
            "unbalanced push/pop inside a scoped block"
        );
        self.pop();
        result
    }

    pub fn load_identity(&mut self) {
        *self.top_mut() = Matrix4::identity();
    }

    pub fn load(&mut self, matrix: Matrix4<f32>) {
        *self.top_mut() = matrix;
    }

    pub fn mult(&mut self, matrix: Matrix4<f32>) {
        let top = self.top_mut();
        *top = *top * matrix;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.mult(Matrix4::from_translation(Vector3::new(x, y, z)));
    }

    /// Rotates about `axis`, which does not need to be normalized.
    pub fn rotate<A: Into<Rad<f32>>>(&mut self, angle: A, axis: Vector3<f32>) {
        self.mult(Matrix4::from_axis_angle(axis.normalize(), angle));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.mult(Matrix4::from_nonuniform_scale(x, y, z));
    }
}

/// The model-view stack paired with the current projection.
#[derive(Clone, Debug)]
pub struct TransformPipeline {
    pub model_view: MatrixStack,
    pub projection: Matrix4<f32>,
}

impl TransformPipeline {
    pub fn new(projection: Matrix4<f32>) -> Self {
        Self {
            model_view: MatrixStack::new(),
            projection,
        }
    }

    pub fn model_view_matrix(&self) -> Matrix4<f32> {
        self.model_view.top()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn model_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection * self.model_view.top()
    }

    pub fn normal_matrix(&self) -> Matrix3<f32> {
        normal_matrix(&self.model_view.top())
    }
}

/// Inverse transpose of the upper 3x3 block, so normals stay perpendicular
/// under non-uniform scale. Falls back to the block itself when singular.
pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix3<f32> {
    let upper = Matrix3::from_cols(
        model_view.x.truncate(),
        model_view.y.truncate(),
        model_view.z.truncate(),
    );
    upper.invert().map(|inv| inv.transpose()).unwrap_or(upper)
}

/// Moves the world-space light into eye space. Computed once per frame with
/// the camera matrix and shared by every draw of that frame.
pub fn eye_space_light(world_position: Vector4<f32>, camera: &Matrix4<f32>) -> Vector4<f32> {
    camera * world_position
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, Vector4};

    use super::*;

    fn assert_close(a: Matrix4<f32>, b: Matrix4<f32>) {
        let a: [[f32; 4]; 4] = a.into();
        let b: [[f32; 4]; 4] = b.into();
        for (col_a, col_b) in a.iter().zip(b.iter()) {
            for (x, y) in col_a.iter().zip(col_b.iter()) {
                assert!((x - y).abs() < 1e-5, "{:?} != {:?}", a, b);
            }
        }
    }

    #[test]
    fn starts_with_identity() {
        let stack = MatrixStack::new();
        assert_eq!(stack.depth(), 1);
        assert_close(stack.top(), Matrix4::identity());
    }

    #[test]
    fn transforms_apply_last_issued_first() {
        let mut stack = MatrixStack::new();
        stack.translate(1.0, 0.0, 0.0);
        stack.rotate(Deg(90.0), Vector3::unit_z());
        let p = stack.top() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-5 && (p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn scoped_restores_the_top() {
        let mut stack = MatrixStack::new();
        stack.translate(0.0, 2.0, 0.0);
        let before = stack.top();
        stack.scoped(|s| {
            s.scale(2.0, 2.0, 2.0);
            s.rotate(Deg(33.0), Vector3::new(1.0, 1.0, 0.0));
        });
        assert_eq!(stack.depth(), 1);
        assert_close(stack.top(), before);
    }

    #[test]
    #[should_panic(expected = "matrix stack underflow")]
    fn popping_the_base_panics() {
        let mut stack = MatrixStack::new();
        stack.pop();
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let m = Matrix4::from_nonuniform_scale(1.0, 1.0, 0.4);
        let n = normal_matrix(&m) * Vector3::new(0.0, 1.0, 1.0);
        assert!((n.z - 2.5).abs() < 1e-5);
        assert!((n.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn light_follows_the_camera() {
        let camera = Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0));
        let eye = eye_space_light(Vector4::new(2.0, 8.0, 5.0, 1.0), &camera);
        assert_eq!(eye, Vector4::new(2.0, 8.0, 0.0, 1.0));
    }
}
