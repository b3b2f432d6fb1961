mod common;

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3, Vector4};
use firewheel::data_structures::matrix_stack::{MatrixStack, TransformPipeline, eye_space_light};

use crate::common::test_utils::{assert_matrix_close, assert_vector_close};

#[test]
fn nested_translations_unwind_in_order() {
    let mut stack = MatrixStack::new();
    stack.push();
    stack.translate(1.0, 0.0, 0.0);
    stack.push();
    stack.translate(0.0, 1.0, 0.0);
    assert_matrix_close(
        stack.top(),
        Matrix4::from_translation(Vector3::new(1.0, 1.0, 0.0)),
    );
    stack.pop();
    assert_matrix_close(
        stack.top(),
        Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0)),
    );
    stack.pop();
    assert_matrix_close(stack.top(), Matrix4::identity());
    assert_eq!(stack.depth(), 1);
}

#[test]
fn balanced_scopes_restore_depth_and_top() {
    let mut stack = MatrixStack::new();
    stack.rotate(Deg(30.0), Vector3::unit_y());
    let before = stack.top();
    stack.scoped(|s| {
        s.scale(2.0, 2.0, 2.0);
        s.scoped(|s| {
            s.translate(0.0, 0.0, -5.0);
            assert_eq!(s.depth(), 3);
        });
    });
    assert_eq!(stack.depth(), 1);
    assert_matrix_close(stack.top(), before);
}

#[test]
#[should_panic]
fn unmatched_pop_panics() {
    let mut stack = MatrixStack::new();
    stack.push();
    stack.pop();
    stack.pop();
}

#[test]
fn eye_space_light_is_camera_times_world_position() {
    let camera = Matrix4::from_translation(Vector3::new(0.0, -1.0, -4.0))
        * Matrix4::from_angle_y(Deg(20.0));
    let world = Vector4::new(2.0, 8.0, 5.0, 1.0);
    assert_vector_close(eye_space_light(world, &camera), camera * world);
}

#[test]
fn pipeline_combines_projection_and_model_view() {
    let projection = cgmath::perspective(Deg(35.0), 1.0, 0.1, 100.0);
    let mut pipeline = TransformPipeline::new(projection);
    pipeline.model_view.translate(0.0, 0.0, -2.5);
    assert_matrix_close(
        pipeline.model_view_projection_matrix(),
        projection * Matrix4::from_translation(Vector3::new(0.0, 0.0, -2.5)),
    );
}
