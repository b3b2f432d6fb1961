//! Composition of a whole frame.
//!
//! The [`Scene`] owns every ride, the shared [`BatchStore`] and the two user
//! toggles (reflection and texture set). [`Scene::compose`] walks the rides
//! in a fixed order against one transform pipeline and returns a [`Frame`]:
//!
//! 1. the camera scope is pushed and the light moved into eye space, once
//! 2. with reflection on, the scene is drawn mirrored below the floor
//! 3. the ground quad is drawn, half transparent when reflecting
//! 4. the scene itself is drawn
//! 5. the camera scope is popped, leaving only the base matrix

use cgmath::{Matrix4, Vector4};

use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::{Material, TextureSlot},
        matrix_stack::{TransformPipeline, eye_space_light},
        model::ModelVertex,
        primitives::make_fan,
        scene_graph::{SceneNode, traverse},
    },
    models::{Model, carousel::Carousel, track::Track, wheel::Wheel},
    render::{DrawList, Pass},
    resources::{texture::TEXTURE_SETS, track_data::TrackData},
};

/// Height of the ground plane; the reflection mirrors about it.
pub const FLOOR_HEIGHT: f32 = -0.65;
pub const GROUND_HALF_EXTENT: f32 = 20.0;
/// Times the grass texture repeats across the ground.
pub const GROUND_TEXTURE_REPEAT: f32 = 50.0;
pub const SCENE_POSITION: [f32; 3] = [0.0, 0.0, -2.5];
/// Carousel position relative to the scene position.
pub const CAROUSEL_OFFSET: [f32; 3] = [3.0, 0.0, 0.0];
pub const LIGHT_POSITION: [f32; 4] = [2.0, 8.0, 5.0, 1.0];
pub const REFLECTING_GROUND_ALPHA: f32 = 0.5;

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    pub draws: DrawList,
    pub light_eye_position: Vector4<f32>,
    pub projection: Matrix4<f32>,
    pub texture_set: usize,
}

pub struct Scene {
    store: BatchStore,
    wheel: Wheel,
    carousel: Carousel,
    track: Track,
    ground: BatchHandle,
    reflecting: bool,
    texture_set: usize,
}

impl Scene {
    pub fn new(track_data: &TrackData) -> Self {
        let mut store = BatchStore::new();
        let wheel = Wheel::new(&mut store);
        let carousel = Carousel::new(&mut store);
        let track = Track::new(&mut store, track_data);
        let ground = store.insert(make_fan("ground", ground_vertices()));
        log::info!("scene set up with {} batches", store.len());
        Self {
            store,
            wheel,
            carousel,
            track,
            ground,
            reflecting: false,
            texture_set: 0,
        }
    }

    pub fn batches(&self) -> &BatchStore {
        &self.store
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// One animation tick for every ride.
    pub fn update(&mut self) {
        self.wheel.update();
        self.carousel.update();
        self.track.update();
    }

    pub fn reflecting(&self) -> bool {
        self.reflecting
    }

    pub fn set_reflecting(&mut self, reflecting: bool) {
        self.reflecting = reflecting;
    }

    pub fn toggle_reflection(&mut self) {
        self.reflecting = !self.reflecting;
        log::debug!("reflection {}", if self.reflecting { "on" } else { "off" });
    }

    pub fn texture_set(&self) -> usize {
        self.texture_set
    }

    pub fn set_texture_set(&mut self, set: usize) {
        self.texture_set = set % TEXTURE_SETS;
    }

    pub fn cycle_textures(&mut self) {
        self.set_texture_set(self.texture_set + 1);
        log::debug!("texture set {}", self.texture_set);
    }

    /// The ground is see-through while the reflection is drawn under it.
    pub fn ground_alpha(&self) -> f32 {
        if self.reflecting {
            REFLECTING_GROUND_ALPHA
        } else {
            1.0
        }
    }

    /// The rides at their park positions.
    pub fn scene_root(&self) -> SceneNode {
        let [x, y, z] = SCENE_POSITION;
        let [cx, cy, cz] = CAROUSEL_OFFSET;
        SceneNode::group("park")
            .translate(x, y, z)
            .with_child(self.wheel.scene_node())
            .with_child(self.track.scene_node())
            .with_child(
                SceneNode::group("carousel mount")
                    .translate(cx, cy, cz)
                    .with_child(self.carousel.scene_node()),
            )
    }

    fn ground_node(&self) -> SceneNode {
        SceneNode::part(
            "ground",
            self.ground,
            Material::Modulated(TextureSlot::Ground, [1.0, 1.0, 1.0, self.ground_alpha()]),
        )
    }

    /// Records the frame seen through `camera` into an ordered draw list.
    ///
    /// # Panics
    ///
    /// Panics if the traversal leaves the transform stack unbalanced.
    pub fn compose(&self, camera: &Matrix4<f32>, projection: Matrix4<f32>) -> Frame {
        let mut pipeline = TransformPipeline::new(projection);
        let mut draws = DrawList::new();
        let scene = self.scene_root();

        let stack = &mut pipeline.model_view;
        stack.load_identity();
        let light_eye_position = stack.scoped(|stack| {
            stack.mult(*camera);
            let light = eye_space_light(Vector4::from(LIGHT_POSITION), &stack.top());

            if self.reflecting {
                stack.scoped(|stack| {
                    stack.scale(1.0, -1.0, 1.0);
                    stack.translate(0.0, -2.0 * FLOOR_HEIGHT, 0.0);
                    traverse(&scene, stack, Pass::Reflected, &mut draws);
                });
            }
            traverse(&self.ground_node(), stack, Pass::Ground, &mut draws);
            traverse(&scene, stack, Pass::Scene, &mut draws);
            light
        });
        assert_eq!(stack.depth(), 1, "transform stack not back at its base after a frame");

        Frame {
            draws,
            light_eye_position,
            projection: pipeline.projection_matrix(),
            texture_set: self.texture_set,
        }
    }
}

/// The 40 x 40 ground square at floor height, wound counter-clockwise seen
/// from above.
fn ground_vertices() -> Vec<ModelVertex> {
    let e = GROUND_HALF_EXTENT;
    let r = GROUND_TEXTURE_REPEAT;
    let up = [0.0, 1.0, 0.0];
    vec![
        ModelVertex::new([-e, FLOOR_HEIGHT, e], up, [0.0, 0.0]),
        ModelVertex::new([e, FLOOR_HEIGHT, e], up, [r, 0.0]),
        ModelVertex::new([e, FLOOR_HEIGHT, -e], up, [r, r]),
        ModelVertex::new([-e, FLOOR_HEIGHT, -e], up, [0.0, r]),
    ]
}

#[cfg(test)]
mod tests {
    use cgmath::SquareMatrix;

    use super::*;

    fn scene() -> Scene {
        Scene::new(&TrackData::default())
    }

    #[test]
    fn ground_alpha_follows_reflection() {
        let mut scene = scene();
        assert_eq!(scene.ground_alpha(), 1.0);
        scene.toggle_reflection();
        assert_eq!(scene.ground_alpha(), 0.5);
        scene.toggle_reflection();
        assert_eq!(scene.ground_alpha(), 1.0);
    }

    #[test]
    fn texture_set_cycles() {
        let mut scene = scene();
        scene.cycle_textures();
        assert_eq!(scene.texture_set(), 1);
        scene.cycle_textures();
        assert_eq!(scene.texture_set(), 0);
        scene.set_texture_set(5);
        assert_eq!(scene.texture_set(), 1);
    }

    #[test]
    fn ground_is_drawn_between_reflection_and_scene() {
        let mut scene = scene();
        scene.set_reflecting(true);
        let frame = scene.compose(&Matrix4::identity(), Matrix4::identity());
        let passes: Vec<Pass> = frame.draws.calls().iter().map(|c| c.pass).collect();
        let ground = passes.iter().position(|p| *p == Pass::Ground).unwrap();
        assert!(passes[..ground].iter().all(|p| *p == Pass::Reflected));
        assert!(passes[ground + 1..].iter().all(|p| *p == Pass::Scene));
    }
}
