use log::info;

use super::animation::{projection_matrix, FrameUpdater, FrameUniforms};
use super::gl_api::{Gl, ShaderApi};
use super::mesh::GpuMesh;
use super::scene::{SceneDescriptor, SceneKind};
use super::shaders::ShaderProgram;
use crate::config::AppConfig;
use crate::utils::error::Result;
use crate::utils::fps::FrameCounter;

/// Draws one scene per frame. Owns every GL object the scene needs.
///
/// Must be created and used on the thread whose GL context is current.
pub struct Renderer {
    api: Gl,
    kind: SceneKind,
    program: Option<ShaderProgram>,
    mesh: Option<GpuMesh>,
    updater: Option<FrameUpdater>,
    clear_color: [f32; 4],
    fps: FrameCounter,
}

impl Renderer {
    pub fn new(
        scene: &SceneDescriptor,
        config: &AppConfig,
        framebuffer: (u32, u32),
        now: f64,
    ) -> Result<Self> {
        let mut api = Gl;

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::Viewport(0, 0, framebuffer.0 as i32, framebuffer.1 as i32);
        }

        let mesh = scene.mesh.as_ref().map(GpuMesh::upload);
        let program = scene
            .shaders
            .as_ref()
            .map(|source| ShaderProgram::build(&mut api, source))
            .transpose()?;

        let updater = scene.animated.then(|| {
            let projection = projection_matrix(&config.render, framebuffer.0, framebuffer.1);
            FrameUpdater::new(config.animation.clone(), projection)
        });

        info!(
            "Scene '{}' ready ({}x{} framebuffer)",
            scene.kind, framebuffer.0, framebuffer.1
        );

        Ok(Self {
            api,
            kind: scene.kind,
            program,
            mesh,
            updater,
            clear_color: config.render.clear_color,
            fps: FrameCounter::new(now),
        })
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn resize(&mut self, width: u32, height: u32, config: &AppConfig) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
        if let Some(updater) = &mut self.updater {
            updater.set_projection(projection_matrix(&config.render, width, height));
        }
    }

    /// Advances the animation and draws one frame. `now` is in seconds.
    pub fn render_frame(&mut self, now: f64) {
        if let Some(frames) = self.fps.tick(now) {
            info!("{} fps", frames);
        }

        let uniforms: Option<FrameUniforms> = self.updater.as_mut().map(FrameUpdater::update);

        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        let (Some(program), Some(mesh)) = (&self.program, &self.mesh) else {
            return;
        };

        program.set_used(&mut self.api);
        if let Some(uniforms) = uniforms {
            uniforms.apply(&mut self.api, program);
        }
        mesh.draw();
        self.api.use_program(0);
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(program) = self.program.take() {
            program.delete(&mut self.api);
        }
    }
}
