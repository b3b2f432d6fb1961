//! The amusement park as a [`GraphicsFlow`].
//!
//! [`Firewheel`] owns the [`Scene`] and its GPU side: one mesh per batch,
//! the texture bank and the per-frame instance buffer. Each frame the scene
//! is composed into a draw list, the list is uploaded as instances and its
//! runs are handed to the event loop as one instanced draw each.

use instant::Duration;
use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::PhysicalKey,
};

use crate::{
    camera::{MOVE_STEP, TURN_STEP},
    config::Config,
    context::{Context, InitContext},
    data_structures::{instance::InstanceBuffer, model::Mesh},
    flow::{FlowConstructor, GraphicsFlow, Out},
    input::{Action, action_for},
    render::{Instanced, Render, Run},
    resources::{texture::TextureBank, track_data::load_track_data},
    scene::Scene,
};

/// Enough for the whole park drawn twice.
const INITIAL_INSTANCE_CAPACITY: usize = 1024;

pub struct Firewheel {
    scene: Scene,
    /// Indexed by batch handle. Empty batches have no mesh.
    meshes: Vec<Option<Mesh>>,
    textures: TextureBank,
    instances: InstanceBuffer,
}

impl Firewheel {
    pub async fn new(init: InitContext, config: &Config) -> anyhow::Result<Self> {
        let track_data = load_track_data(&init.asset_dir).await?;
        let mut scene = Scene::new(&track_data);
        scene.set_reflecting(config.reflecting);
        scene.set_texture_set(config.texture_set);

        let meshes = scene
            .batches()
            .iter()
            .map(|(_, batch)| {
                if batch.is_empty() {
                    log::warn!("batch {} has no vertices and is not drawn", batch.name());
                    None
                } else {
                    Some(Mesh::from_batch(&init.device, batch))
                }
            })
            .collect();

        let textures =
            TextureBank::load(&init.asset_dir, &init.device, &init.queue, &init.texture_layout)
                .await?;
        let instances = InstanceBuffer::new(&init.device, INITIAL_INSTANCE_CAPACITY);

        Ok(Self {
            scene,
            meshes,
            textures,
            instances,
        })
    }

    /// A constructor for [`crate::flow::run`] that starts the park with
    /// `config`'s reflection and texture set.
    pub fn constructor(config: Config) -> FlowConstructor {
        Box::new(move |init| {
            Box::pin(async move {
                let flow: Box<dyn GraphicsFlow> = Box::new(Firewheel::new(init, &config).await?);
                Ok::<_, anyhow::Error>(flow)
            })
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn instanced(&self, run: &Run) -> Option<Instanced<'_>> {
        let mesh = self.meshes.get(run.batch.index())?.as_ref()?;
        Some(Instanced {
            pass: run.pass,
            mesh,
            material: self
                .textures
                .bind_group(&run.material, self.scene.texture_set()),
            instance: self.instances.buffer(),
            instances: run.instances.clone(),
        })
    }
}

impl GraphicsFlow for Firewheel {
    fn on_init(&mut self, ctx: &mut Context) -> Out {
        log::info!(
            "park ready: {} meshes, reflection {}, texture set {}",
            self.meshes.iter().flatten().count(),
            self.scene.reflecting(),
            self.scene.texture_set()
        );
        ctx.write_camera();
        Out::Empty
    }

    fn on_update(&mut self, _ctx: &Context, _dt: Duration) -> Out {
        Out::Empty
    }

    fn on_tick(&mut self, _ctx: &Context) -> Out {
        self.scene.update();
        Out::Empty
    }

    fn on_window_events(&mut self, _ctx: &Context, event: &WindowEvent) -> Out {
        let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    repeat,
                    ..
                },
            ..
        } = event
        else {
            return Out::Empty;
        };
        let Some(action) = action_for(*code) else {
            return Out::Empty;
        };
        match action {
            // toggles fire once per press, camera keys keep moving while held
            Action::ToggleReflection if !repeat => self.scene.toggle_reflection(),
            Action::CycleTextures if !repeat => self.scene.cycle_textures(),
            Action::ToggleFullscreen if !repeat => {
                return Out::configure(|ctx| ctx.toggle_fullscreen());
            }
            Action::Quit => return Out::Exit,
            Action::MoveForward => {
                return Out::configure(|ctx| ctx.camera.camera.move_forward(MOVE_STEP));
            }
            Action::MoveBackward => {
                return Out::configure(|ctx| ctx.camera.camera.move_forward(-MOVE_STEP));
            }
            Action::TurnLeft => {
                return Out::configure(|ctx| ctx.camera.camera.rotate_world_y(TURN_STEP));
            }
            Action::TurnRight => {
                return Out::configure(|ctx| ctx.camera.camera.rotate_world_y(-TURN_STEP));
            }
            _ => (),
        }
        Out::Empty
    }

    fn on_render<'a>(&'a mut self, ctx: &mut Context) -> Render<'a> {
        let frame = self.scene.compose(
            &ctx.camera.camera.calc_matrix(),
            ctx.projection.calc_matrix(),
        );
        ctx.light.update(&ctx.queue, frame.light_eye_position);
        self.instances
            .write(&ctx.device, &ctx.queue, &frame.draws.instances());

        let this: &'a Self = self;
        let draws = frame
            .draws
            .runs()
            .iter()
            .filter_map(|run| this.instanced(run))
            .collect();
        Render::Instanced(draws)
    }
}
