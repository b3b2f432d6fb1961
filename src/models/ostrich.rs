use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::Material,
        primitives::{make_cylinder, make_sphere},
        scene_graph::SceneNode,
    },
    models::Model,
};

pub const BODY_COLOUR: [f32; 4] = [0.375, 0.2, 0.067, 1.0];
pub const SKIN_COLOUR: [f32; 4] = [0.97, 0.8, 0.79, 1.0];
pub const BEAK_COLOUR: [f32; 4] = [0.8, 0.8, 0.0, 1.0];

#[derive(Clone, Copy, Debug)]
pub struct Ostrich {
    head: BatchHandle,
    beak: BatchHandle,
    neck: BatchHandle,
    body: BatchHandle,
    tailfeather: BatchHandle,
    leg: BatchHandle,
}

impl Ostrich {
    pub fn new(store: &mut BatchStore) -> Self {
        Self {
            head: store.insert(make_sphere(0.04, 30, 15)),
            beak: store.insert(make_cylinder(0.02, 0.0, 0.03, 15, 15)),
            neck: store.insert(make_cylinder(0.015, 0.015, 0.3, 15, 15)),
            body: store.insert(make_sphere(0.1, 30, 15)),
            tailfeather: store.insert(make_cylinder(0.09, 0.0, 0.02, 15, 15)),
            leg: store.insert(make_cylinder(0.01, 0.01, 0.25, 15, 15)),
        }
    }

    fn feather(&self) -> SceneNode {
        SceneNode::part("tailfeather", self.tailfeather, Material::Colour(BODY_COLOUR))
    }
}

impl Model for Ostrich {
    fn scene_node(&self) -> SceneNode {
        let skin = Material::Colour(SKIN_COLOUR);
        SceneNode::group("ostrich")
            .translate(0.0, -0.2, 0.0)
            .with_child(SceneNode::part("body", self.body, Material::Colour(BODY_COLOUR)))
            .with_child(
                SceneNode::group("feather")
                    .rotate(-90.0, 1.0, 0.0, 0.0)
                    .with_child(self.feather().translate(-0.05, 0.0, 0.09).rotate(-12.0, 0.0, 1.0, 0.0)),
            )
            .with_child(
                SceneNode::group("feather")
                    .rotate(-90.0, 0.0, 0.0, 1.0)
                    .with_child(self.feather().translate(0.0, 0.0, 0.09).rotate(-12.0, 0.0, 1.0, 0.0)),
            )
            .with_child(
                SceneNode::group("feather")
                    .rotate(-90.0, 0.0, 0.0, 1.0)
                    .rotate(-135.0, 0.0, 1.0, 0.0)
                    .with_child(self.feather().translate(-0.05, 0.0, 0.09).rotate(-12.0, 0.0, 1.0, 0.0)),
            )
            .with_child(
                SceneNode::part("neck", self.neck, skin)
                    .rotate(90.0, 0.0, 1.0, 0.0)
                    .rotate(-65.0, 1.0, 0.0, 0.0),
            )
            .with_child(SceneNode::part("head", self.head, skin).translate(0.14, 0.3, 0.0))
            .with_child(
                SceneNode::part("beak", self.beak, Material::Colour(BEAK_COLOUR))
                    .translate(0.175, 0.3, 0.0)
                    .rotate(90.0, 0.0, 1.0, 0.0),
            )
            .with_child(SceneNode::part("leg", self.leg, skin).rotate(105.0, 1.0, 0.0, 0.0))
            .with_child(SceneNode::part("leg", self.leg, skin).rotate(75.0, 1.0, 0.0, 0.0))
    }
}
