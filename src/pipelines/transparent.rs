use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
    pipelines::basic::{mk_render_pipeline, scene_shader},
    render::Pass,
};

/**
 * The ground pass: alpha blended over whatever the reflected pass left in the
 * colour buffer.
 *
 * The reflection is only visible through the ground because the ground's
 * alpha drops to 0.5 while reflecting; the blend state itself never changes.
 */
pub fn mk_transparent_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    layout: &wgpu::PipelineLayout,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    mk_render_pipeline(
        device,
        layout,
        config.format,
        Some(Pass::Ground.blend()),
        Some(Texture::DEPTH_FORMAT),
        &[ModelVertex::desc(), InstanceRaw::desc()],
        topology,
        Pass::Ground.front_face(),
        scene_shader(),
    )
}
