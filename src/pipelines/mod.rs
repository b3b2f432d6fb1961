//! Render pipelines of the scene.
//!
//! One shader serves every draw; pipelines differ only in the state the
//! fixed-function stages need: winding (reflected pass), blending (ground)
//! and primitive topology (the runner is drawn as lines).

use std::collections::HashMap;

use crate::{data_structures::batch::Topology, render::Pass};

pub mod basic;
pub mod light;
pub mod transparent;

const TOPOLOGIES: [wgpu::PrimitiveTopology; 2] = [
    wgpu::PrimitiveTopology::TriangleList,
    wgpu::PrimitiveTopology::LineList,
];

#[derive(Debug)]
pub struct Pipelines {
    by_pass: HashMap<(Pass, wgpu::PrimitiveTopology), wgpu::RenderPipeline>,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let layout = basic::mk_scene_layout(
            device,
            texture_bind_group_layout,
            camera_bind_group_layout,
            light_bind_group_layout,
        );
        let mut by_pass = HashMap::new();
        for pass in Pass::ALL {
            for topology in TOPOLOGIES {
                let pipeline = match pass {
                    Pass::Ground => {
                        transparent::mk_transparent_pipeline(device, config, &layout, topology)
                    }
                    Pass::Reflected | Pass::Scene => {
                        basic::mk_basic_pipeline(device, config, &layout, pass, topology)
                    }
                };
                by_pass.insert((pass, topology), pipeline);
            }
        }
        Self { by_pass }
    }

    pub fn get(&self, pass: Pass, topology: Topology) -> Option<&wgpu::RenderPipeline> {
        self.by_pass.get(&(pass, topology.gpu_topology()))
    }
}
