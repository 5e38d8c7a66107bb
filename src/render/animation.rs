use glam::{Mat4, Vec3};

use super::gl_api::ShaderApi;
use super::shaders::ShaderProgram;
use crate::config::{AnimationConfig, RenderConfig};

/// Scalar animation state carried from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Oscillating offset, kept within `[-max_offset, max_offset]`.
    pub offset: f32,
    /// `true` while `offset` is increasing.
    pub direction: bool,
    /// Rotation in degrees.
    pub angle: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            offset: 0.0,
            direction: true,
            angle: 0.0,
        }
    }
}

impl AnimationState {
    pub fn advance(&mut self, config: &AnimationConfig) {
        if self.direction {
            self.offset += config.offset_step;
        } else {
            self.offset -= config.offset_step;
        }

        if self.offset.abs() >= config.max_offset {
            self.direction = !self.direction;
            self.offset = self.offset.clamp(-config.max_offset, config.max_offset);
        }

        // Wraps to angle_reset, never to zero.
        self.angle += config.angle_step;
        if self.angle >= config.angle_limit {
            self.angle = config.angle_reset;
        }
    }

    #[cfg(test)]
    pub fn next(mut self, config: &AnimationConfig) -> Self {
        self.advance(config);
        self
    }
}

/// Fixed translate/rotate/scale applied to the model, right to left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub translation: Vec3,
    pub axis: Vec3,
    pub scale: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::new(0.0, 0.0, -2.5),
            axis: Vec3::Y,
            scale: Vec3::new(0.4, 0.4, 1.0),
        }
    }
}

impl ModelTransform {
    pub fn matrix(&self, angle_degrees: f32) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_axis_angle(self.axis.normalize(), angle_degrees.to_radians())
            * Mat4::from_scale(self.scale)
    }
}

/// Perspective projection for a framebuffer of `width` x `height` pixels.
pub fn projection_matrix(config: &RenderConfig, width: u32, height: u32) -> Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    Mat4::perspective_rh_gl(config.fov_degrees.to_radians(), aspect, config.near, config.far)
}

/// Values pushed to the program before each draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub model: Mat4,
    pub projection: Mat4,
    pub offset: f32,
}

impl FrameUniforms {
    pub const MODEL: &'static str = "model";
    pub const PROJECTION: &'static str = "projection";
    pub const OFFSET: &'static str = "offset";

    /// Pushes each value to its uniform when the program declares it.
    pub fn apply<A: ShaderApi>(&self, api: &mut A, program: &ShaderProgram) {
        if let Some(location) = program.uniform(Self::MODEL) {
            api.uniform_mat4(location, &self.model);
        }
        if let Some(location) = program.uniform(Self::PROJECTION) {
            api.uniform_mat4(location, &self.projection);
        }
        if let Some(location) = program.uniform(Self::OFFSET) {
            api.uniform_1f(location, self.offset);
        }
    }
}

/// Owns the animation state and turns it into per-frame uniforms.
#[derive(Debug, Clone)]
pub struct FrameUpdater {
    state: AnimationState,
    config: AnimationConfig,
    transform: ModelTransform,
    projection: Mat4,
}

impl FrameUpdater {
    pub fn new(config: AnimationConfig, projection: Mat4) -> Self {
        Self {
            state: AnimationState::default(),
            config,
            transform: ModelTransform::default(),
            projection,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    /// Advances one frame and returns the uniforms for it.
    pub fn update(&mut self) -> FrameUniforms {
        self.state.advance(&self.config);
        self.current()
    }

    /// Uniforms for the current state without advancing.
    pub fn current(&self) -> FrameUniforms {
        FrameUniforms {
            model: self.transform.matrix(self.state.angle),
            projection: self.projection,
            offset: self.state.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::gl_api::testing::FakeGl;
    use crate::render::shaders::ShaderSource;
    use crate::render::sources::{PYRAMID_FRAGMENT_SRC, PYRAMID_VERTEX_SRC};
    use glam::Vec4;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_offset_stays_bounded_and_flips_at_bound() {
        let config = AnimationConfig::default();
        let mut state = AnimationState::default();
        let mut flips = Vec::new();

        for frame in 1..=10_000u32 {
            let before = state;
            state.advance(&config);

            assert!(
                state.offset.abs() <= config.max_offset,
                "frame {frame}: offset {} out of bounds",
                state.offset
            );

            if state.direction != before.direction {
                // A flip happens exactly on the frame the bound is reached.
                assert_eq!(state.offset.abs(), config.max_offset);
                flips.push(frame);
            } else {
                assert!(state.offset.abs() < config.max_offset);
            }
        }

        // 0.7 / 0.0005 = 1400 frames to the first bound, 2800 between flips.
        assert!(flips.len() >= 3);
        assert!((1399..=1401).contains(&flips[0]), "first flip at {}", flips[0]);
        let gap = flips[1] - flips[0];
        assert!((2798..=2802).contains(&gap), "gap {gap}");
    }

    #[test]
    fn test_angle_wraps_to_reset_value() {
        let config = AnimationConfig::default();
        let mut state = AnimationState::default();
        let mut wrapped = false;

        for _ in 0..40_000 {
            let before = state.angle;
            state.advance(&config);
            assert!(state.angle >= config.angle_reset - EPS);
            assert!(state.angle < config.angle_limit);
            if state.angle < before {
                assert_eq!(state.angle, 0.01);
                wrapped = true;
            }
        }
        assert!(wrapped);
    }

    #[test]
    fn test_angle_reset_is_exact_not_modulo() {
        let config = AnimationConfig::default();
        let state = AnimationState {
            offset: 0.0,
            direction: true,
            angle: 359.995,
        }
        .next(&config);
        assert_eq!(state.angle, 0.01);
    }

    #[test]
    fn test_reverse_direction_decreases_offset() {
        let config = AnimationConfig::default();
        let state = AnimationState {
            offset: -0.6998,
            direction: false,
            angle: 0.0,
        }
        .next(&config);
        assert!(state.direction);
        assert_eq!(state.offset, -0.7);
    }

    #[test]
    fn test_model_matrix_without_rotation() {
        let model = ModelTransform::default().matrix(0.0);
        let expected = Mat4::from_cols(
            Vec4::new(0.4, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 0.4, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, -2.5, 1.0),
        );
        assert!(model.abs_diff_eq(expected, EPS), "{model:?}");
    }

    #[test]
    fn test_model_matrix_applies_scale_then_rotation_then_translation() {
        let model = ModelTransform::default().matrix(90.0);
        // +X scaled to 0.4, rotated about +Y onto -Z, then pushed back by 2.5.
        let p = model.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -2.9), 1e-5), "{p:?}");
        let q = model.transform_point3(Vec3::Y);
        assert!(q.abs_diff_eq(Vec3::new(0.0, 0.4, -2.5), 1e-5), "{q:?}");
    }

    #[test]
    fn test_projection_uses_float_aspect() {
        let config = RenderConfig::default();
        let projection = projection_matrix(&config, 800, 600);
        let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0);
        assert!(projection.abs_diff_eq(expected, EPS));
        // Degenerate framebuffer sizes (minimised window) stay finite.
        assert!(projection_matrix(&config, 0, 0).is_finite());
    }

    #[test]
    fn test_updater_pushes_declared_uniforms() {
        let mut api = FakeGl::default();
        let source = ShaderSource::new(PYRAMID_VERTEX_SRC, PYRAMID_FRAGMENT_SRC);
        let program = ShaderProgram::build(&mut api, &source).unwrap();

        let projection = projection_matrix(&RenderConfig::default(), 800, 600);
        let mut updater = FrameUpdater::new(AnimationConfig::default(), projection);
        let uniforms = updater.update();
        uniforms.apply(&mut api, &program);

        assert_eq!(updater.state().angle, 0.01);
        assert_eq!(updater.state().offset, 0.0005);

        let model_loc = program.uniform("model").unwrap();
        let projection_loc = program.uniform("projection").unwrap();
        assert_eq!(
            api.matrices,
            vec![(model_loc, uniforms.model), (projection_loc, projection)]
        );
        // The pyramid program has no `offset` uniform, so nothing else is written.
        assert!(api.floats.is_empty());
    }

    #[test]
    fn test_offset_uniform_pushed_when_declared() {
        let mut api = FakeGl::default();
        let source = ShaderSource::new(
            "#version 330\nlayout (location = 0) in vec3 pos;\nuniform float offset;\nvoid main() { gl_Position = vec4(pos.x + offset, pos.yz, 1.0); }\n",
            PYRAMID_FRAGMENT_SRC,
        );
        let program = ShaderProgram::build(&mut api, &source).unwrap();

        let mut updater = FrameUpdater::new(AnimationConfig::default(), Mat4::IDENTITY);
        updater.update();
        let uniforms = updater.update();
        uniforms.apply(&mut api, &program);

        assert!(api.matrices.is_empty());
        assert_eq!(api.floats, vec![(program.uniform("offset").unwrap(), 0.001)]);
    }
}
