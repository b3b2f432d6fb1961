//! The roller coaster: a black ground frame, a ring of support poles whose
//! heights come from `roller_coaster_data.txt`, and the runner line traced
//! through `runner_data.txt`.

use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::Material,
        primitives::{make_cylinder, make_line_loop, make_torus},
        scene_graph::SceneNode,
    },
    models::Model,
    resources::track_data::{TRACK_CAPACITY, TrackData},
};

pub const FRAME_COLOUR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const FRAME_MAJOR_RADIUS: f32 = 1.0;
pub const FRAME_MINOR_RADIUS: f32 = 0.025;
pub const POLE_COLOUR: [f32; 4] = [0.67, 0.67, 0.67, 1.0];
pub const POLE_RADIUS: f32 = 0.01;
pub const FRAME_DEPTH: f32 = -0.65;
pub const POLE_DEPTH: f32 = -0.7;
/// Offset applied to every runner vertex read from the data file.
pub const RUNNER_OFFSET: [f32; 3] = [-1.0, 0.0, 0.08];

#[derive(Clone, Debug)]
pub struct Track {
    frame: BatchHandle,
    poles: Vec<BatchHandle>,
    runner: Option<BatchHandle>,
}

impl Track {
    pub fn new(store: &mut BatchStore, data: &TrackData) -> Self {
        let poles = data
            .pole_heights
            .iter()
            .take(TRACK_CAPACITY)
            .map(|height| store.insert(make_cylinder(POLE_RADIUS, POLE_RADIUS, *height, 10, 10)))
            .collect();

        let points: Vec<[f32; 3]> = data
            .runner
            .iter()
            .map(|[x, y, z]| [x + RUNNER_OFFSET[0], y + RUNNER_OFFSET[1], z + RUNNER_OFFSET[2]])
            .collect();
        let runner = if points.len() >= 2 {
            Some(store.insert(make_line_loop("runner", &points)))
        } else {
            log::warn!("runner has {} vertices, not drawing it", points.len());
            None
        };

        Self {
            frame: store.insert(make_torus(FRAME_MAJOR_RADIUS, FRAME_MINOR_RADIUS, 30, 30)),
            poles,
            runner,
        }
    }

    pub fn pole_count(&self) -> usize {
        self.poles.len()
    }

    /// Pole `i` stands on the unit circle at `i * 360 / TRACK_CAPACITY`.
    pub fn pole_angle(i: usize) -> f32 {
        i as f32 * 360.0 / TRACK_CAPACITY as f32
    }
}

impl Model for Track {
    fn scene_node(&self) -> SceneNode {
        let mut track = SceneNode::group("track").with_child(
            SceneNode::part("frame", self.frame, Material::Colour(FRAME_COLOUR))
                .rotate(-90.0, 1.0, 0.0, 0.0)
                .translate(0.0, 0.0, FRAME_DEPTH),
        );

        track.add_child(SceneNode::group("poles").with_children(self.poles.iter().enumerate().map(
            |(i, pole)| {
                let (sin, cos) = Self::pole_angle(i).to_radians().sin_cos();
                SceneNode::part("pole", *pole, Material::Colour(POLE_COLOUR))
                    .rotate(-90.0, 1.0, 0.0, 0.0)
                    .translate(0.0, 0.0, POLE_DEPTH)
                    .translate(cos, sin, 0.0)
            },
        )));

        if let Some(runner) = self.runner {
            track.add_child(
                SceneNode::part("runner", runner, Material::Flat(POLE_COLOUR))
                    .rotate(-90.0, 1.0, 0.0, 0.0),
            );
        }
        track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_draws_only_the_frame() {
        let mut store = BatchStore::new();
        let track = Track::new(&mut store, &TrackData::default());
        assert_eq!(track.pole_count(), 0);
        assert_eq!(track.scene_node().part_count(), 1);
    }

    #[test]
    fn one_pole_per_height() {
        let mut store = BatchStore::new();
        let data = TrackData {
            pole_heights: vec![0.5, 0.6, 0.5],
            runner: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
        };
        let track = Track::new(&mut store, &data);
        assert_eq!(track.pole_count(), 3);
        // frame + 3 poles + runner
        assert_eq!(track.scene_node().part_count(), 5);
        // equal heights share a batch: torus, two poles, runner
        assert_eq!(store.len(), 4);
        assert_eq!(Track::pole_angle(32), 90.0);
    }
}
