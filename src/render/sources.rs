//! GLSL sources for the built-in scenes.

/// Position-only pass-through used by the flat triangle.
pub const TRIANGLE_VERTEX_SRC: &str = r#"
#version 330

layout (location = 0) in vec3 pos;

void main() {
    gl_Position = vec4(pos, 1.0);
}
"#;

pub const TRIANGLE_FRAGMENT_SRC: &str = r#"
#version 330

out vec4 color;

void main() {
    color = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

/// Transforms by `projection * model` and colours each vertex by its
/// position clamped to `[0, 1]`.
pub const PYRAMID_VERTEX_SRC: &str = r#"
#version 330

layout (location = 0) in vec3 pos;

out vec4 vCol;

uniform mat4 model;
uniform mat4 projection;

void main() {
    gl_Position = projection * model * vec4(pos, 1.0);
    vCol = vec4(clamp(pos, 0.0, 1.0), 1.0);
}
"#;

pub const PYRAMID_FRAGMENT_SRC: &str = r#"
#version 330

in vec4 vCol;

out vec4 color;

void main() {
    color = vCol;
}
"#;
