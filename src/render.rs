//! Render composition and pipeline batching.
//!
//! The scene graph traversal records [`DrawCall`]s into a [`DrawList`] in
//! exactly the order the parts were visited. Consecutive calls that share a
//! pass, batch and material are grouped into one [`Run`] and later issued as
//! a single instanced draw, so the 48 spokes of the wheel cost one draw per
//! ring instead of 24.
//!
//! # Key types
//!
//! - [`Pass`] selects the pipeline state (winding, blending) of a draw
//! - [`DrawList`] is the CPU side record of one frame
//! - [`Render`] hands GPU resources of a frame to the event loop

use std::ops::Range;

use cgmath::Matrix4;

use crate::data_structures::{
    batch::{BatchHandle, Topology},
    instance::InstanceRaw,
    material::Material,
    model::Mesh,
};

/// The three stages of a frame, drawn in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pass {
    /// The scene mirrored below the ground plane, wound clockwise.
    Reflected,
    /// The blended ground quad.
    Ground,
    /// The scene itself.
    Scene,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::Reflected, Pass::Ground, Pass::Scene];

    pub fn front_face(&self) -> wgpu::FrontFace {
        match self {
            Pass::Reflected => wgpu::FrontFace::Cw,
            Pass::Ground | Pass::Scene => wgpu::FrontFace::Ccw,
        }
    }

    pub fn blend(&self) -> wgpu::BlendState {
        match self {
            Pass::Ground => wgpu::BlendState::ALPHA_BLENDING,
            Pass::Reflected | Pass::Scene => wgpu::BlendState::REPLACE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub pass: Pass,
    pub batch: BatchHandle,
    pub material: Material,
    pub model_view: Matrix4<f32>,
}

/// Consecutive draw calls sharing pass, batch and material.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub pass: Pass,
    pub batch: BatchHandle,
    pub material: Material,
    pub instances: Range<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn count(&self, pass: Pass) -> usize {
        self.calls.iter().filter(|c| c.pass == pass).count()
    }

    /// One instance record per call, in draw order.
    pub fn instances(&self) -> Vec<InstanceRaw> {
        self.calls.iter().map(InstanceRaw::from).collect()
    }

    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for (idx, call) in self.calls.iter().enumerate() {
            let idx = idx as u32;
            match runs.last_mut() {
                Some(run)
                    if run.pass == call.pass
                        && run.batch == call.batch
                        && run.material == call.material =>
                {
                    run.instances.end = idx + 1;
                }
                _ => runs.push(Run {
                    pass: call.pass,
                    batch: call.batch,
                    material: call.material,
                    instances: idx..idx + 1,
                }),
            }
        }
        runs
    }
}

/// Data for one instanced draw: a mesh, its material bind group and a slice
/// of the frame's instance buffer.
pub struct Instanced<'a> {
    pub pass: Pass,
    pub mesh: &'a Mesh,
    pub material: &'a wgpu::BindGroup,
    pub instance: &'a wgpu::Buffer,
    pub instances: Range<u32>,
}

impl Instanced<'_> {
    pub fn topology(&self) -> Topology {
        self.mesh.topology
    }
}

/// Specifies what a flow wants drawn this frame.
///
/// - `None` renders nothing
/// - `Instanced(Vec<Instanced>)` renders runs in the given order
/// - `Composed(Vec<Render>)` concatenates renders
pub enum Render<'a> {
    None,
    Instanced(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Flattens the render tree and orders it by pass. The sort is stable, so
    /// the traversal order inside a pass is kept.
    pub(crate) fn into_draws(self) -> Vec<Instanced<'a>> {
        let mut draws = Vec::new();
        self.collect(&mut draws);
        draws.sort_by_key(|draw| draw.pass);
        draws
    }

    fn collect(self, out: &mut Vec<Instanced<'a>>) {
        match self {
            Render::None => (),
            Render::Instanced(mut vec) => out.append(&mut vec),
            Render::Composed(renders) => renders.into_iter().for_each(|r| r.collect(out)),
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Matrix4, SquareMatrix};

    use super::*;

    fn call(pass: Pass, batch: usize, colour: f32) -> DrawCall {
        DrawCall {
            pass,
            batch: BatchHandle(batch),
            material: Material::Colour([colour, 0.0, 0.0, 1.0]),
            model_view: Matrix4::identity(),
        }
    }

    #[test]
    fn consecutive_identical_parts_share_a_run() {
        let mut list = DrawList::new();
        for _ in 0..24 {
            list.push(call(Pass::Scene, 1, 0.5));
        }
        list.push(call(Pass::Scene, 2, 0.5));
        list.push(call(Pass::Scene, 1, 0.5));

        let runs = list.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].instances, 0..24);
        assert_eq!(runs[1].instances, 24..25);
        assert_eq!(runs[2].instances, 25..26);
    }

    #[test]
    fn material_or_pass_change_splits_runs() {
        let mut list = DrawList::new();
        list.push(call(Pass::Scene, 1, 0.5));
        list.push(call(Pass::Scene, 1, 0.6));
        list.push(call(Pass::Reflected, 1, 0.6));
        assert_eq!(list.runs().len(), 3);
        assert_eq!(list.count(Pass::Reflected), 1);
    }

    #[test]
    fn instances_follow_draw_order() {
        let mut list = DrawList::new();
        list.push(call(Pass::Scene, 1, 0.25));
        list.push(call(Pass::Ground, 1, 0.75));
        let raw = list.instances();
        assert_eq!(raw[0].colour[0], 0.25);
        assert_eq!(raw[1].colour[0], 0.75);
    }
}
