//! The Ferris wheel: two rings joined by an axle, 48 spokes, textured hub
//! caps, a four-legged stand and 24 cars.

use crate::{
    data_structures::{
        batch::{BatchHandle, BatchStore},
        material::{Material, TextureSlot},
        primitives::{make_cylinder, make_disk, make_torus},
        scene_graph::SceneNode,
    },
    models::{Model, car::Car, wrap_degrees},
};

pub const NBR_CARS: usize = 24;

pub const RING_MAJOR_RADIUS: f32 = 0.5;
pub const RING_MINOR_RADIUS: f32 = 0.005;
pub const AXLE_COLOUR: [f32; 4] = [0.3, 0.3, 0.9, 1.0];
pub const AXLE_RADIUS: f32 = 0.07;
pub const AXLE_LENGTH: f32 = 0.1;
pub const CAP_RADIUS: f32 = 0.075;
pub const SPOKE_RADIUS: f32 = 0.005;
pub const SPOKE_LENGTH: f32 = 0.5;
pub const STAND_RADIUS: f32 = 0.01;
pub const STAND_LENGTH: f32 = 0.85;

pub const WHEEL_WIDTH: f32 = 0.1;
pub const CAP_ELEVATION: f32 = 0.511 * WHEEL_WIDTH;
pub const SPOKE_ELEVATION: f32 = 0.45 * WHEEL_WIDTH;
pub const STAND_X_ROTATION: f32 = 45.0;
pub const STAND_Y_ROTATION: f32 = 135.0;
pub const STAND_Y_OFFSET: f32 = -0.05;
pub const STAND_Z_OFFSET: f32 = 0.04;

pub const INITIAL_ROTATION: f32 = 0.0;
/// Degrees turned per tick.
pub const ROTATION_INCREMENT: f32 = 2.0;

#[derive(Clone, Debug)]
pub struct Wheel {
    ring: BatchHandle,
    axle: BatchHandle,
    cap: BatchHandle,
    spoke: BatchHandle,
    stand: BatchHandle,
    cars: Vec<Car>,
    rotation: f32,
}

impl Wheel {
    pub fn new(store: &mut BatchStore) -> Self {
        let cars = (0..NBR_CARS).map(|i| Car::new(store, i % 4)).collect();
        let mut wheel = Self {
            ring: store.insert(make_torus(RING_MAJOR_RADIUS, RING_MINOR_RADIUS, 90, 20)),
            axle: store.insert(make_cylinder(AXLE_RADIUS, AXLE_RADIUS, AXLE_LENGTH, 20, 20)),
            cap: store.insert(make_disk(0.0, CAP_RADIUS, 30, 30)),
            spoke: store.insert(make_cylinder(SPOKE_RADIUS, SPOKE_RADIUS, SPOKE_LENGTH, 10, 10)),
            stand: store.insert(make_cylinder(STAND_RADIUS, STAND_RADIUS, STAND_LENGTH, 20, 20)),
            cars,
            rotation: INITIAL_ROTATION,
        };
        wheel.place_cars();
        wheel
    }

    /// Current rotation in degrees, always in `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    fn car_angle(i: usize) -> f32 {
        i as f32 * 360.0 / NBR_CARS as f32
    }

    fn place_cars(&mut self) {
        let rotation = self.rotation;
        for (i, car) in self.cars.iter_mut().enumerate() {
            car.set_total_rotation(rotation + Self::car_angle(i));
        }
    }

    fn ring_side(&self, i: usize) -> SceneNode {
        // -1 for the far ring, +1 for the near one
        let side = if i == 0 { -1.0 } else { 1.0 };

        let ring = SceneNode::part("ring", self.ring, Material::Textured(TextureSlot::Wheel(1)))
            .translate(0.0, 0.0, side * 0.5 * WHEEL_WIDTH);
        let cap = SceneNode::part("cap", self.cap, Material::Textured(TextureSlot::Cap))
            .translate(0.0, 0.0, side * CAP_ELEVATION)
            .rotate(-self.rotation, 0.0, 0.0, 1.0);
        let spokes = SceneNode::group("spokes")
            .translate(0.0, 0.0, side * SPOKE_ELEVATION)
            .with_children((0..NBR_CARS).map(|j| {
                SceneNode::part("spoke", self.spoke, Material::Textured(TextureSlot::Wheel(0)))
                    .rotate(Self::car_angle(j), 0.0, 0.0, 1.0)
                    .rotate(90.0, 0.0, 1.0, 0.0)
            }));

        SceneNode::group("ring side")
            .with_child(ring)
            .with_child(cap)
            .with_child(spokes)
    }

    fn stand_leg(&self, i: usize, j: usize) -> SceneNode {
        let (i, j) = (i as f32, j as f32);
        SceneNode::part("stand", self.stand, Material::Textured(TextureSlot::Wheel(2)))
            .translate(0.0, STAND_Y_OFFSET, STAND_Z_OFFSET * (2.0 * i - 1.0))
            .rotate((STAND_Y_ROTATION - 90.0 * i) * (2.0 * j - 1.0), 0.0, 1.0, 0.0)
            .rotate(STAND_X_ROTATION, 1.0, 0.0, 0.0)
    }
}

impl Model for Wheel {
    fn update(&mut self) {
        self.rotation = wrap_degrees(self.rotation + ROTATION_INCREMENT);
        self.place_cars();
    }

    fn scene_node(&self) -> SceneNode {
        let mut spinning = SceneNode::group("spinning wheel")
            .rotate(self.rotation, 0.0, 0.0, 1.0)
            .with_child(
                SceneNode::part("axle", self.axle, Material::Colour(AXLE_COLOUR))
                    .translate(0.0, 0.0, -0.5 * AXLE_LENGTH),
            )
            .with_child(self.ring_side(0))
            .with_child(self.ring_side(1));
        for (i, car) in self.cars.iter().enumerate() {
            spinning.add_child(
                SceneNode::group("car mount")
                    .rotate(Self::car_angle(i), 0.0, 0.0, 1.0)
                    .translate(SPOKE_LENGTH, 0.0, 0.0)
                    .with_child(car.scene_node()),
            );
        }

        let stand = SceneNode::group("stand")
            .with_children((0..2).flat_map(|i| (0..2).map(move |j| (i, j))).map(|(i, j)| self.stand_leg(i, j)));

        SceneNode::group("wheel").with_child(spinning).with_child(stand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_and_cars_follow() {
        let mut store = BatchStore::new();
        let mut wheel = Wheel::new(&mut store);
        for _ in 0..181 {
            wheel.update();
            assert!((0.0..360.0).contains(&wheel.rotation()));
        }
        assert_eq!(wheel.rotation(), 2.0);
        assert_eq!(wheel.cars()[3].total_rotation(), 2.0 + 45.0);
    }

    #[test]
    fn part_count_matches_the_ride() {
        let mut store = BatchStore::new();
        let wheel = Wheel::new(&mut store);
        // axle + 2 x (ring, cap, 24 spokes) + 24 cars x 5 + 4 stand legs
        assert_eq!(wheel.scene_node().part_count(), 1 + 2 * 26 + 24 * 5 + 4);
    }

    #[test]
    fn drawing_does_not_animate() {
        let mut store = BatchStore::new();
        let wheel = Wheel::new(&mut store);
        let _ = wheel.scene_node();
        let _ = wheel.scene_node();
        assert_eq!(wheel.rotation(), INITIAL_ROTATION);
    }
}
