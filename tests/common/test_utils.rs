#![allow(dead_code)]

use cgmath::{Matrix4, Vector4};
use firewheel::{resources::track_data::TrackData, scene::Scene};

pub(crate) const EPSILON: f32 = 1.0e-4;

/// A small closed track: four poles on the unit circle with a runner over
/// their tops.
pub(crate) fn sample_track() -> TrackData {
    TrackData {
        pole_heights: vec![0.8, 0.9, 1.0, 0.9],
        runner: vec![
            [2.0, 0.0, 0.02],
            [1.0, 1.0, 0.12],
            [0.0, 0.0, 0.22],
            [1.0, -1.0, 0.12],
        ],
    }
}

pub(crate) fn sample_scene() -> Scene {
    Scene::new(&sample_track())
}

pub(crate) fn assert_matrix_close(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let actual: [[f32; 4]; 4] = actual.into();
    let expected: [[f32; 4]; 4] = expected.into();
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                (actual[col][row] - expected[col][row]).abs() < EPSILON,
                "matrices differ at ({}, {}): {:?} != {:?}",
                row,
                col,
                actual,
                expected
            );
        }
    }
}

pub(crate) fn assert_vector_close(actual: Vector4<f32>, expected: Vector4<f32>) {
    let diff = actual - expected;
    assert!(
        diff.x.abs() < EPSILON
            && diff.y.abs() < EPSILON
            && diff.z.abs() < EPSILON
            && diff.w.abs() < EPSILON,
        "{:?} != {:?}",
        actual,
        expected
    );
}
