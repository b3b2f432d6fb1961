//! The carousel: a round platform with a centre column, a conical roof and
//! four ride poles, each carrying one creature.

use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::Material,
        primitives::{make_cylinder, make_disk},
        scene_graph::SceneNode,
    },
    models::{
        Model, lion::Lion, ostrich::Ostrich, turtle::Turtle, unicorn::Unicorn, wrap_degrees,
    },
};

pub const COLOUR: [f32; 4] = [0.8, 0.8, 0.2, 1.0];
pub const ROOF_RADIUS: f32 = 1.0;
pub const ROOF_LENGTH: f32 = 0.25;
pub const CENTRE_RADIUS: f32 = 0.275;
pub const CENTRE_LENGTH: f32 = 1.0;
pub const BOTTOM_RADIUS: f32 = 1.0;
pub const BOTTOM_LENGTH: f32 = 0.1;
pub const NBR_RIDE_POLES: usize = 4;
pub const RIDE_POLE_RADIUS: f32 = 0.02;
pub const RIDE_POLE_LENGTH: f32 = 0.9;
/// Ride poles stand on a circle of this radius.
pub const RIDE_POLE_DISTANCE: f32 = 1.0 / 1.2;

pub const BOTTOM_DEPTH: f32 = -0.7;
pub const BOTTOM_CAP_DEPTH: f32 = -0.6;
pub const ROOF_HEIGHT: f32 = 0.2;
/// Height on the pole where the creatures sit.
pub const MOUNT_HEIGHT: f32 = -0.25;
pub const CREATURE_SCALE: f32 = 0.5;
/// Degrees the platform turns per tick.
pub const ROTATION_INCREMENT: f32 = 1.0;

#[derive(Clone, Debug)]
pub struct Carousel {
    roof: BatchHandle,
    centre: BatchHandle,
    bottom: BatchHandle,
    bottom_cap: BatchHandle,
    pole: BatchHandle,
    ostrich: Ostrich,
    turtle: Turtle,
    unicorn: Unicorn,
    lion: Lion,
    rotation: f32,
}

impl Carousel {
    pub fn new(store: &mut BatchStore) -> Self {
        Self {
            roof: store.insert(make_cylinder(ROOF_RADIUS, 0.0, ROOF_LENGTH, 30, 30)),
            centre: store.insert(make_cylinder(CENTRE_RADIUS, CENTRE_RADIUS, CENTRE_LENGTH, 10, 10)),
            bottom: store.insert(make_cylinder(BOTTOM_RADIUS, BOTTOM_RADIUS, BOTTOM_LENGTH, 30, 30)),
            bottom_cap: store.insert(make_disk(0.0, BOTTOM_RADIUS, 30, 30)),
            pole: store.insert(make_cylinder(
                RIDE_POLE_RADIUS,
                RIDE_POLE_RADIUS,
                RIDE_POLE_LENGTH,
                10,
                10,
            )),
            ostrich: Ostrich::new(store),
            turtle: Turtle::new(store),
            unicorn: Unicorn::new(store),
            lion: Lion::new(store),
            rotation: 0.0,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    fn pole_angle(i: usize) -> f32 {
        i as f32 * 360.0 / NBR_RIDE_POLES as f32
    }

    fn rider(&self, i: usize) -> SceneNode {
        match i % NBR_RIDE_POLES {
            0 => self.ostrich.scene_node(),
            1 => self.turtle.scene_node(),
            2 => self.unicorn.scene_node(),
            _ => self.lion.scene_node(),
        }
    }
}

impl Model for Carousel {
    fn update(&mut self) {
        self.rotation = wrap_degrees(self.rotation + ROTATION_INCREMENT);
    }

    fn scene_node(&self) -> SceneNode {
        let colour = Material::Colour(COLOUR);

        // the structure is modelled along +Z, tilt it upright
        let mut carousel = SceneNode::group("carousel")
            .rotate(-90.0, 1.0, 0.0, 0.0)
            .rotate(self.rotation, 0.0, 0.0, 1.0)
            .with_child(SceneNode::part("bottom", self.bottom, colour).translate(0.0, 0.0, BOTTOM_DEPTH))
            .with_child(
                SceneNode::part("bottom cap", self.bottom_cap, colour)
                    .translate(0.0, 0.0, BOTTOM_CAP_DEPTH),
            )
            .with_child(SceneNode::part("centre", self.centre, colour).translate(0.0, 0.0, BOTTOM_DEPTH));

        for i in 0..NBR_RIDE_POLES {
            let angle = Self::pole_angle(i);
            let (sin, cos) = angle.to_radians().sin_cos();
            let (x, y) = (cos * RIDE_POLE_DISTANCE, sin * RIDE_POLE_DISTANCE);
            carousel.add_child(
                SceneNode::part("ride pole", self.pole, colour)
                    .translate(x, y, 0.0)
                    .translate(0.0, 0.0, BOTTOM_DEPTH),
            );
            // back to Y up, facing along the direction of travel
            carousel.add_child(
                SceneNode::group("rider")
                    .translate(x, y, MOUNT_HEIGHT)
                    .rotate(90.0, 1.0, 0.0, 0.0)
                    .rotate(angle + 90.0, 0.0, 1.0, 0.0)
                    .scale(CREATURE_SCALE, CREATURE_SCALE, CREATURE_SCALE)
                    .with_child(self.rider(i)),
            );
        }

        carousel.with_child(SceneNode::part("roof", self.roof, colour).translate(0.0, 0.0, ROOF_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_one_creature_per_pole() {
        let mut store = BatchStore::new();
        let carousel = Carousel::new(&mut store);
        let node = carousel.scene_node();
        assert!(node.find("ostrich").is_some());
        assert!(node.find("turtle").is_some());
        assert!(node.find("unicorn").is_some());
        assert!(node.find("lion").is_some());
        let riders = node.children.iter().filter(|c| c.name == "rider").count();
        assert_eq!(riders, NBR_RIDE_POLES);
    }

    #[test]
    fn platform_turns_one_degree_per_tick() {
        let mut store = BatchStore::new();
        let mut carousel = Carousel::new(&mut store);
        for _ in 0..365 {
            carousel.update();
        }
        assert_eq!(carousel.rotation(), 5.0);
    }
}
