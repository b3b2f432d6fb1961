//! The rides and creatures of the park.
//!
//! Every model builds its batches once in its constructor, keeps a few scalars
//! of animation state, and describes itself each frame as a [`SceneNode`]
//! subtree. Drawing never changes a model; only [`Model::update`] does.

use crate::data_structures::scene_graph::SceneNode;

pub mod car;
pub mod carousel;
pub mod lion;
pub mod ostrich;
pub mod track;
pub mod turtle;
pub mod unicorn;
pub mod wheel;

pub trait Model {
    /// Advances the animation by one tick.
    fn update(&mut self) {}

    /// This frame's subtree, parts in drawing order.
    fn scene_node(&self) -> SceneNode;
}

/// Keeps an angle in degrees inside `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_wrap_into_one_turn() {
        assert_eq!(wrap_degrees(362.0), 2.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert!(wrap_degrees(-1e-7) < 360.0);
    }
}
