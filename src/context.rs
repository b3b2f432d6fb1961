use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use cgmath::Vector4;
use wgpu::util::DeviceExt;
use winit::{
    dpi::PhysicalSize,
    window::{Fullscreen, Window},
};

use crate::{
    camera::{self, CameraResources, CameraUniform, Projection},
    config::{Config, FIELD_OF_VIEW, Z_FAR, Z_NEAR},
    data_structures::texture,
    pipelines::{
        Pipelines,
        light::{LightResources, LightUniform},
    },
    resources::texture::texture_layout,
    scene::LIGHT_POSITION,
};

/// The GPU and window state shared by every flow.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub texture_layout: wgpu::BindGroupLayout,
    pub clear_colour: wgpu::Color,
    pub tick_duration_millis: u64,
    pub asset_dir: PathBuf,
    windowed_size: (u32, u32),
    fullscreen: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>, settings: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("wgpu setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to the window")?;
        log::debug!("adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("cannot open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colours and textures are authored in sRGB.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface supports no texture format")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let projection = Projection::new(
            config.width,
            config.height,
            cgmath::Deg(FIELD_OF_VIEW),
            Z_NEAR,
            Z_FAR,
        );
        let camera = mk_camera_resources(&device, &projection);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let light = LightResources::new(&device, LightUniform::new(Vector4::from(LIGHT_POSITION)));

        let texture_layout = texture_layout(&device);
        let pipelines = Pipelines::new(
            &device,
            &config,
            &texture_layout,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );

        let mut ctx = Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            light,
            pipelines,
            texture_layout,
            clear_colour: settings.clear_colour,
            tick_duration_millis: settings.tick_duration_millis,
            asset_dir: settings.asset_dir.clone(),
            windowed_size: settings.window_size,
            fullscreen: false,
        };
        if settings.fullscreen {
            ctx.set_fullscreen(true);
        }
        Ok(ctx)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Borderless fullscreen on the current monitor. Leaving it restores the
    /// configured window size.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        self.fullscreen = fullscreen;
        if fullscreen {
            self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        } else {
            self.window.set_fullscreen(None);
            let (width, height) = self.windowed_size;
            // the resize arrives as a window event when the platform applies it
            let _ = self.window.request_inner_size(PhysicalSize::new(width, height));
        }
        log::debug!("fullscreen {}", fullscreen);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.set_fullscreen(!self.fullscreen);
    }

    /// Uploads the projection to the camera uniform.
    pub fn write_camera(&mut self) {
        self.camera.uniform.update_proj(&self.projection);
        self.queue.write_buffer(
            &self.camera.buffer,
            0,
            bytemuck::cast_slice(&[self.camera.uniform]),
        );
    }
}

fn mk_camera_resources(device: &wgpu::Device, projection: &Projection) -> CameraResources {
    let mut uniform = CameraUniform::new();
    uniform.update_proj(projection);

    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some("camera_bind_group"),
    });

    CameraResources {
        camera: camera::Camera::new(),
        uniform,
        buffer,
        bind_group,
        bind_group_layout,
    }
}

/// What a flow constructor may use while it loads its resources.
///
/// Device and queue are cheap handles, so this is a cloned view of the
/// context rather than a borrow.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub texture_layout: wgpu::BindGroupLayout,
    pub asset_dir: PathBuf,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            texture_layout: ctx.texture_layout.clone(),
            asset_dir: ctx.asset_dir.clone(),
        }
    }
}
