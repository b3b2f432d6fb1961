//! firewheel
//!
//! A small amusement park rendered the way fixed-function demos were built:
//! every part is drawn inside a scoped model-view transform, a point light is
//! moved into eye space once per frame and an optional pass mirrors the whole
//! scene below a see-through ground. The scene description is plain CPU code,
//! the wgpu backend replays what it records.
//!
//! High-level modules
//! - `camera`: first-person camera, projection and the camera uniform
//! - `config`: runtime settings and their defaults
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: batches, the primitive factory, the transform stack,
//!   materials and the scene graph
//! - `flow`: the event loop and the flow abstraction
//! - `input`: key bindings
//! - `models`: the Ferris wheel, its cars, the carousel, the track and the
//!   creatures riding the carousel
//! - `park`: the park flow tying the scene to the GPU
//! - `pipelines`: the scene shader and its pipelines
//! - `resources`: texture and coaster data loading
//! - `render`: draw lists and their grouping into instanced draws
//! - `scene`: composition of a whole frame
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod input;
pub mod models;
pub mod park;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
