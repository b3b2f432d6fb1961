//! Flow control and application event loop.
//!
//! A "flow" is a self-contained part of the application that handles user
//! input, advances its simulation and hands renderable data to the engine
//! each frame. The engine owns the window, the GPU [`Context`] and the
//! fixed-rate tick that drives animation.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow`] is the trait for scenes that handle events and rendering
//! - [`Out`] lets a hook change the [`Context`] or end the application
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Pass window events to every flow (`on_window_events`)
//! 2. Collect each flow's [`Render`] and replay it pass by pass
//! 3. Present the frame
//! 4. Call `on_tick` once the tick duration has elapsed, then `on_update`

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use anyhow::Context as _;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    config::Config,
    context::{Context, InitContext},
    data_structures::{model::DrawModel, texture::Texture},
    render::Render,
};

/// Output of every lifecycle hook.
///
/// `Out::Configure` modifies the Context at runtime, for instance to move the
/// camera, change the tick speed or switch to fullscreen.
///
/// `Out::Exit` closes the window and leaves the event loop.
///
/// `Empty` is the default output when nothing needs to happen.
pub enum Out {
    Configure(Box<dyn FnOnce(&mut Context)>),
    Exit,
    Empty,
}

impl Out {
    pub fn configure(f: impl FnOnce(&mut Context) + 'static) -> Self {
        Self::Configure(Box::new(f))
    }
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

impl Debug for Out {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configure(_) => f.write_str("Configure(|&mut Context| -> {...})"),
            Self::Exit => f.write_str("Exit"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// Trait for implementing a renderable scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once after the flow is constructed
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_render()` is called each frame and specifies how to render `self`
/// 4. `on_tick()` is called every `tick_duration_millis`
/// 5. `on_update()` is called every frame after rendering
pub trait GraphicsFlow {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context) -> Out;

    /// Update state every frame with the elapsed time `dt`.
    fn on_update(&mut self, ctx: &Context, dt: Duration) -> Out;

    /// Advance the simulation by one logical tick.
    fn on_tick(&mut self, ctx: &Context) -> Out;

    /// Handle window events (keyboard, resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent) -> Out;

    /// Upload this frame's data and return what to draw.
    ///
    /// The context is mutable so a flow can write uniforms it owns a share
    /// of, such as the light.
    fn on_render<'a>(&'a mut self, ctx: &mut Context) -> Render<'a>;
}

impl Debug for dyn GraphicsFlow + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`, so flows can load their resources concurrently.
pub type FlowConstructor = Box<
    dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn GraphicsFlow>>>>>,
>;

/// GPU context and surface status.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config)
            .await
            .context("cannot create the main context")?;
        Ok(Self {
            ctx,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx.write_camera();
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(
        &mut self,
        graphics_flows: &mut [Box<dyn GraphicsFlow>],
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let renders: Vec<Render> = graphics_flows
            .iter_mut()
            .map(|flow| flow.on_render(&mut self.ctx))
            .collect();
        let draws = Render::Composed(renders).into_draws();

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            for draw in &draws {
                if draw.instances.is_empty() {
                    log::warn!("skipping a draw of {} without instances", draw.mesh.name);
                    continue;
                }
                let Some(pipeline) = self.ctx.pipelines.get(draw.pass, draw.topology()) else {
                    log::error!("no pipeline for {:?} {:?}", draw.pass, draw.topology());
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(1, draw.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    draw.mesh,
                    draw.instances.clone(),
                    draw.material,
                    &self.ctx.camera.bind_group,
                    &self.ctx.light.bind_group,
                );
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub(crate) struct App {
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent>,
    config: Config,
    state: Option<AppState>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow>>,
    // Taken on the first `resumed`.
    constructors: Option<Vec<FlowConstructor>>,
    last_time: Instant,
    time_since_tick: Duration,
}

impl App {
    fn new(
        event_loop: &EventLoop<FlowEvent>,
        config: Config,
        constructors: Vec<FlowConstructor>,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        let async_runtime =
            tokio::runtime::Runtime::new().context("cannot start the async runtime")?;
        Ok(Self {
            async_runtime,
            proxy,
            config,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
            time_since_tick: Duration::from_millis(0),
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let Some(constructors) = self.constructors.take() else {
            // resumed again after a suspend, everything is still alive
            return Ok(());
        };

        let (width, height) = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(width, height));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("cannot open the window")?,
        );

        let config = self.config.clone();
        let init_future = async move {
            let app_state = AppState::new(window, &config).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // device and queue are handles, the conversion only clones refs
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows = futures::future::join_all(flow_futures)
                .await
                .into_iter()
                .collect::<anyhow::Result<Vec<_>>>()?;
            anyhow::Ok((app_state, flows))
        };

        let (mut app_state, flows) = self.async_runtime.block_on(init_future)?;
        self.graphics_flows = flows;
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);
        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_init(&mut app_state.ctx);
            handle_flow_output(&mut app_state.ctx, &self.proxy, out);
        }
        app_state.ctx.window.request_redraw();
        self.state = Some(app_state);
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) enum FlowEvent {
    Exit,
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.init(event_loop) {
            log::error!("App initialization failed: {:#}", e);
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Exit => event_loop.exit(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        self.graphics_flows.iter_mut().for_each(|f| {
            let out = f.on_window_events(&state.ctx, &event);
            handle_flow_output(&mut state.ctx, &self.proxy, out);
        });

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                self.time_since_tick += dt;

                match state.render(&mut self.graphics_flows) {
                    Ok(_) => {
                        // at most one tick per frame, a slow frame never replays ticks
                        if self.time_since_tick
                            >= Duration::from_millis(state.ctx.tick_duration_millis)
                        {
                            self.graphics_flows.iter_mut().for_each(|f| {
                                let out = f.on_tick(&state.ctx);
                                handle_flow_output(&mut state.ctx, &self.proxy, out);
                            });
                            self.time_since_tick = Duration::from_millis(0);
                        }
                        self.graphics_flows.iter_mut().for_each(|f| {
                            let out = f.on_update(&state.ctx, dt);
                            handle_flow_output(&mut state.ctx, &self.proxy, out);
                        });
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn handle_flow_output(ctx: &mut Context, proxy: &EventLoopProxy<FlowEvent>, out: Out) {
    match out {
        Out::Configure(f) => f(ctx),
        Out::Exit => {
            if let Err(e) = proxy.send_event(FlowEvent::Exit) {
                log::error!("cannot request exit, the event loop is gone: {}", e);
            }
        }
        Out::Empty => (),
    }
}

/// Opens the window and runs `constructors`' flows until the window closes.
pub fn run(config: Config, constructors: Vec<FlowConstructor>) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let mut app = App::new(&event_loop, config, constructors)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
