mod common;

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3, Vector4};
use firewheel::{
    camera::Camera,
    render::Pass,
    scene::{FLOOR_HEIGHT, LIGHT_POSITION, REFLECTING_GROUND_ALPHA},
};

use crate::common::test_utils::{assert_matrix_close, assert_vector_close, sample_scene};

#[test]
fn wheel_rotation_stays_within_one_turn() {
    let mut scene = sample_scene();
    for _ in 0..1000 {
        scene.update();
        let rotation = scene.wheel().rotation();
        assert!((0.0..360.0).contains(&rotation), "rotation {}", rotation);
        assert!((0.0..360.0).contains(&scene.carousel().rotation()));
    }
}

#[test]
fn ground_is_see_through_only_while_reflecting() {
    let mut scene = sample_scene();
    assert_eq!(scene.ground_alpha(), 1.0);
    scene.set_reflecting(true);
    assert_eq!(scene.ground_alpha(), REFLECTING_GROUND_ALPHA);

    let frame = scene.compose(&Matrix4::identity(), Matrix4::identity());
    let ground = frame
        .draws
        .calls()
        .iter()
        .find(|c| c.pass == Pass::Ground)
        .unwrap();
    assert_eq!(ground.material.colour()[3], 0.5);
}

#[test]
fn without_reflection_only_ground_and_scene_are_drawn() {
    let scene = sample_scene();
    let frame = scene.compose(&Matrix4::identity(), Matrix4::identity());
    assert_eq!(frame.draws.count(Pass::Reflected), 0);
    assert_eq!(frame.draws.count(Pass::Ground), 1);
    assert_eq!(frame.draws.count(Pass::Scene), scene.scene_root().part_count());
}

#[test]
fn reflection_mirrors_every_scene_draw_about_the_floor() {
    let mut scene = sample_scene();
    scene.set_reflecting(true);
    let frame = scene.compose(&Matrix4::identity(), Matrix4::identity());

    let reflected: Vec<_> = frame
        .draws
        .calls()
        .iter()
        .filter(|c| c.pass == Pass::Reflected)
        .collect();
    let normal: Vec<_> = frame
        .draws
        .calls()
        .iter()
        .filter(|c| c.pass == Pass::Scene)
        .collect();
    assert_eq!(reflected.len(), normal.len());

    let mirror = Matrix4::from_nonuniform_scale(1.0, -1.0, 1.0)
        * Matrix4::from_translation(Vector3::new(0.0, -2.0 * FLOOR_HEIGHT, 0.0));
    for (r, n) in reflected.iter().zip(normal.iter()) {
        assert_eq!(r.batch, n.batch);
        assert_eq!(r.material, n.material);
        assert_matrix_close(r.model_view, mirror * n.model_view);
    }
    assert_eq!(Pass::Reflected.front_face(), wgpu::FrontFace::Cw);
}

#[test]
fn light_is_moved_into_eye_space_once_per_frame() {
    let mut camera = Camera::new();
    camera.move_forward(1.0);
    camera.rotate_world_y(Deg(15.0));
    let view = camera.calc_matrix();

    let mut scene = sample_scene();
    scene.set_reflecting(true);
    let frame = scene.compose(&view, Matrix4::identity());
    assert_vector_close(frame.light_eye_position, view * Vector4::from(LIGHT_POSITION));
}

#[test]
fn composing_does_not_animate() {
    let scene = sample_scene();
    let first = scene.compose(&Matrix4::identity(), Matrix4::identity());
    let second = scene.compose(&Matrix4::identity(), Matrix4::identity());
    assert_eq!(first.draws.calls(), second.draws.calls());
    assert_eq!(scene.wheel().rotation(), 0.0);
}

#[test]
fn texture_set_travels_with_the_frame() {
    let mut scene = sample_scene();
    scene.cycle_textures();
    let frame = scene.compose(&Matrix4::identity(), Matrix4::identity());
    assert_eq!(frame.texture_set, 1);
}
