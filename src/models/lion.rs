use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::{Material, TextureSlot},
        primitives::{make_cylinder, make_sphere},
        scene_graph::SceneNode,
    },
    models::{Model, car::BAR_LENGTH},
};

/// The lion was sketched at a size of 10 units; this brings it to the scale
/// of the other creatures.
pub const LION_SCALE: f32 = 0.004;
pub const HEAD_RADIUS: f32 = 10.0 * LION_SCALE;
pub const BODY_RADIUS: f32 = 10.0 * LION_SCALE;
pub const BODY_LENGTH: f32 = 10.0 * LION_SCALE;

#[derive(Clone, Copy, Debug)]
pub struct Lion {
    head: BatchHandle,
    body: BatchHandle,
}

impl Lion {
    pub fn new(store: &mut BatchStore) -> Self {
        Self {
            head: store.insert(make_sphere(HEAD_RADIUS, 30, 15)),
            body: store.insert(make_cylinder(BODY_RADIUS, BODY_RADIUS, BODY_LENGTH, 30, 30)),
        }
    }
}

impl Model for Lion {
    fn scene_node(&self) -> SceneNode {
        SceneNode::group("lion")
            .with_child(
                SceneNode::part("head", self.head, Material::Textured(TextureSlot::Car(0)))
                    .translate(0.0, 0.0, -0.5 * BAR_LENGTH),
            )
            .with_child(
                SceneNode::part("body", self.body, Material::Textured(TextureSlot::Car(1)))
                    .rotate(90.0, 1.0, 0.0, 0.0),
            )
    }
}
