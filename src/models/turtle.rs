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
pub const LIMB_COLOUR: [f32; 4] = [0.25, 0.4, 0.25, 1.0];
pub const SHELL_COLOUR: [f32; 4] = [0.4, 0.3, 0.1, 1.0];

#[derive(Clone, Copy, Debug)]
pub struct Turtle {
    head: BatchHandle,
    body: BatchHandle,
    shell: BatchHandle,
    limb: BatchHandle,
    tail: BatchHandle,
}

impl Turtle {
    pub fn new(store: &mut BatchStore) -> Self {
        Self {
            head: store.insert(make_sphere(0.025, 30, 30)),
            body: store.insert(make_cylinder(0.09, 0.09, 0.02, 30, 15)),
            shell: store.insert(make_cylinder(0.1, 0.0, 0.02, 30, 15)),
            // arms and legs are the same cone
            limb: store.insert(make_cylinder(0.01, 0.0, 0.025, 30, 15)),
            tail: store.insert(make_cylinder(0.01, 0.0, 0.035, 30, 15)),
        }
    }
}

impl Model for Turtle {
    fn scene_node(&self) -> SceneNode {
        let limb = Material::Colour(LIMB_COLOUR);
        let shell = Material::Colour(SHELL_COLOUR);
        let mut turtle = SceneNode::group("turtle")
            .translate(0.0, -0.1, 0.0)
            .with_child(
                SceneNode::part("body", self.body, Material::Colour(BODY_COLOUR))
                    .rotate(90.0, 1.0, 0.0, 0.0),
            )
            .with_child(SceneNode::part("shell", self.shell, shell).rotate(-90.0, 1.0, 0.0, 0.0))
            .with_child(
                SceneNode::part("shell", self.shell, shell)
                    .rotate(90.0, 1.0, 0.0, 0.0)
                    .translate(0.0, 0.0, 0.02),
            )
            .with_child(SceneNode::part("head", self.head, limb).translate(0.11, 0.0, 0.0));

        // arms in front, legs behind; the far side is flipped over
        for (name, x) in [("arm", 0.04), ("leg", -0.04)] {
            turtle.add_child(SceneNode::part(name, self.limb, limb).translate(x, -0.01, 0.08));
            turtle.add_child(
                SceneNode::part(name, self.limb, limb)
                    .translate(x, -0.01, -0.08)
                    .rotate(180.0, 1.0, 0.0, 0.0),
            );
        }

        turtle.with_child(
            SceneNode::part("tail", self.tail, limb)
                .translate(-0.09, -0.01, 0.0)
                .rotate(-90.0, 0.0, 1.0, 0.0),
        )
    }
}
