//! A blocky unicorn stacked together from cubes.

use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::Material,
        primitives::make_cube,
        scene_graph::SceneNode,
    },
    models::Model,
};

pub const COLOUR: [f32; 4] = [0.375, 0.2, 0.067, 1.0];

const LEG_STEP: f32 = 0.02;

#[derive(Clone, Copy, Debug)]
pub struct Unicorn {
    neck: BatchHandle,
    head: BatchHandle,
    body: BatchHandle,
    leg: BatchHandle,
}

impl Unicorn {
    pub fn new(store: &mut BatchStore) -> Self {
        Self {
            neck: store.insert(make_cube(0.05)),
            head: store.insert(make_cube(0.045)),
            body: store.insert(make_cube(0.1)),
            leg: store.insert(make_cube(0.04)),
        }
    }

    fn block(&self, name: &'static str, batch: BatchHandle) -> SceneNode {
        SceneNode::part(name, batch, Material::Colour(COLOUR))
    }

    /// A leg segment hinged 22 degrees at `pivot`.
    fn bent_leg(&self, pivot: (f32, f32), angle: f32, at: (f32, f32, f32)) -> SceneNode {
        self.block("leg", self.leg)
            .translate(pivot.0, pivot.1, 0.0)
            .rotate(angle, 0.0, 0.0, 1.0)
            .translate(at.0, at.1, at.2)
    }

    fn straight_leg(&self, at: (f32, f32, f32)) -> SceneNode {
        self.block("leg", self.leg).translate(at.0, at.1, at.2)
    }

    fn legs(&self) -> Vec<SceneNode> {
        let mut legs = Vec::with_capacity(32);
        let step = |i: usize| i as f32 * LEG_STEP;

        // front right
        legs.extend((0..4).map(|i| self.straight_leg((0.3, -0.2 + step(i), 0.05))));
        legs.extend((4..8).map(|i| self.bent_leg((0.15, 0.2), -22.0, (0.3, -0.5 + step(i), 0.05))));
        // front left
        legs.extend((0..4).map(|i| self.bent_leg((0.05, -0.2), 22.0, (0.3, -0.1 + step(i), -0.05))));
        legs.extend((4..8).map(|i| self.straight_leg((0.375, -0.375 + step(i), -0.05))));
        // hind right
        legs.extend((0..4).map(|i| self.bent_leg((-0.3, -0.2), 22.0, (0.3, -0.1 + step(i), 0.05))));
        legs.extend((4..8).map(|i| self.straight_leg((0.025, -0.375 + step(i), 0.05))));
        // hind left
        legs.extend((0..4).map(|i| self.straight_leg((0.0, -0.2 + step(i), -0.05))));
        legs.extend((4..8).map(|i| self.bent_leg((-0.15, 0.2), -22.0, (0.3, -0.5 + step(i), -0.05))));
        legs
    }
}

impl Model for Unicorn {
    fn scene_node(&self) -> SceneNode {
        let neck = (0..2).map(|i| {
            self.block("neck", self.neck)
                .translate(0.2, -0.2, 0.0)
                .rotate(45.0, 0.0, 0.0, 1.0)
                .translate(0.4 + i as f32 * 0.05, 0.05, 0.0)
        });
        let head = (0..3).map(|i| {
            self.block("head", self.head)
                .translate(0.02, 0.25, 0.0)
                .rotate(-22.0, 0.0, 0.0, 1.0)
                .translate(0.5 + i as f32 * 0.045, 0.1, 0.0)
        });
        let body = (0..4).map(|i| self.block("body", self.body).translate(i as f32 * 0.1, 0.0, 0.0));

        SceneNode::group("unicorn")
            .with_children(neck)
            .with_children(head)
            .with_children(body)
            .with_children(self.legs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_from_41_blocks() {
        let mut store = BatchStore::new();
        let unicorn = Unicorn::new(&mut store);
        assert_eq!(unicorn.scene_node().part_count(), 2 + 3 + 4 + 32);
        assert_eq!(store.len(), 4);
    }
}
