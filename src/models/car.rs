//! A gondola hanging from the Ferris wheel.

use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::{Material, TextureSlot},
        primitives::{make_cylinder, make_sphere},
        scene_graph::SceneNode,
    },
    models::Model,
};

pub const BAR_RADIUS: f32 = 0.003;
pub const BAR_LENGTH: f32 = 0.1;
pub const ROOF_RADIUS: f32 = 0.045;
pub const ROOF_LENGTH: f32 = 0.02;
pub const POLE_RADIUS: f32 = 0.005;
pub const POLE_LENGTH: f32 = 0.1;
pub const FLOOR_RADIUS: f32 = 0.0375;
pub const FLOOR_SCALE: [f32; 3] = [1.0, 1.0, 0.4];
pub const WALL_RADIUS: f32 = 0.04;
pub const WALL_LENGTH: f32 = 0.04;

#[derive(Clone, Copy, Debug)]
pub struct Car {
    bar: BatchHandle,
    roof: BatchHandle,
    pole: BatchHandle,
    floor: BatchHandle,
    wall: BatchHandle,
    /// Wall texture index within the active set.
    wall_texture: usize,
    /// Rotation of the wheel plus this car's position on it, in degrees.
    total_rotation: f32,
}

impl Car {
    pub fn new(store: &mut BatchStore, wall_texture: usize) -> Self {
        Self {
            bar: store.insert(make_cylinder(BAR_RADIUS, BAR_RADIUS, BAR_LENGTH, 10, 10)),
            roof: store.insert(make_cylinder(0.0, ROOF_RADIUS, ROOF_LENGTH, 10, 10)),
            pole: store.insert(make_cylinder(POLE_RADIUS, POLE_RADIUS, POLE_LENGTH, 10, 10)),
            floor: store.insert(make_sphere(FLOOR_RADIUS, 10, 10)),
            wall: store.insert(make_cylinder(WALL_RADIUS, WALL_RADIUS, WALL_LENGTH, 10, 10)),
            wall_texture,
            total_rotation: 0.0,
        }
    }

    /// The car is turned back by this much so it keeps hanging upright.
    pub fn set_total_rotation(&mut self, degrees: f32) {
        self.total_rotation = degrees;
    }

    pub fn total_rotation(&self) -> f32 {
        self.total_rotation
    }
}

impl Model for Car {
    fn scene_node(&self) -> SceneNode {
        let textured = |i| Material::Textured(TextureSlot::Car(i));

        let hanging = SceneNode::group("car body")
            .rotate(-self.total_rotation, 0.0, 0.0, 1.0)
            .rotate(90.0, 1.0, 0.0, 0.0)
            .with_child(SceneNode::part("roof", self.roof, textured(1)))
            .with_child(SceneNode::part("pole", self.pole, textured(2)))
            .with_child(
                SceneNode::part("floor", self.floor, textured(3))
                    .translate(0.0, 0.0, POLE_LENGTH)
                    .scale(FLOOR_SCALE[0], FLOOR_SCALE[1], FLOOR_SCALE[2]),
            )
            .with_child(
                SceneNode::part(
                    "wall",
                    self.wall,
                    Material::Textured(TextureSlot::Wall(self.wall_texture)),
                )
                .translate(0.0, 0.0, POLE_LENGTH)
                .rotate(90.0, 0.0, 0.0, 1.0)
                .rotate(180.0, 0.0, 1.0, 0.0),
            );

        SceneNode::group("car")
            .with_child(
                SceneNode::part("bar", self.bar, textured(0)).translate(0.0, 0.0, -0.5 * BAR_LENGTH),
            )
            .with_child(hanging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_has_five_parts_in_order() {
        let mut store = BatchStore::new();
        let car = Car::new(&mut store, 2);
        let node = car.scene_node();
        assert_eq!(node.part_count(), 5);
        let wall = node.find("wall").and_then(|n| n.part).unwrap();
        assert_eq!(wall.material, Material::Textured(TextureSlot::Wall(2)));
        let floor = node.find("floor").and_then(|n| n.part).unwrap();
        assert_eq!(floor.material, Material::Textured(TextureSlot::Car(3)));
    }

    #[test]
    fn cars_share_batches() {
        let mut store = BatchStore::new();
        let a = Car::new(&mut store, 0);
        let before = store.len();
        let b = Car::new(&mut store, 1);
        assert_eq!(store.len(), before);
        assert_eq!(a.wall, b.wall);
        assert_ne!(a.bar, a.pole);
    }
}
