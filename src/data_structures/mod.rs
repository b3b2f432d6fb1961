//! Scene data structures: batches, transforms, materials and the scene graph.
//!
//! - `batch` holds immutable vertex data and the store that deduplicates it
//! - `primitives` is the factory building batches from shape parameters
//! - `matrix_stack` contains the scoped transform stack and light helpers
//! - `material` describes how a part is shaded
//! - `scene_graph` is the explicit tree every model describes itself with
//! - `model` uploads batches as GPU meshes
//! - `instance` holds per-draw data and the instance buffer
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod batch;
pub mod instance;
pub mod material;
pub mod matrix_stack;
pub mod model;
pub mod primitives;
pub mod scene_graph;
pub mod texture;
