use std::collections::HashMap;
use std::ffi::CString;

use gl::types::*;

use super::gl_api::ShaderApi;
use crate::utils::error::{RenderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

/// Vertex and fragment stage text of one program.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    fn stages(&self) -> [(ShaderStage, &str); 2] {
        [
            (ShaderStage::Vertex, self.vertex.as_str()),
            (ShaderStage::Fragment, self.fragment.as_str()),
        ]
    }

    /// Every uniform declared by either stage, in declaration order.
    pub fn declared_uniforms(&self) -> Vec<String> {
        let mut names = declared_uniforms(&self.vertex);
        for name in declared_uniforms(&self.fragment) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Scans GLSL text for `uniform <type> <name>[, <name>...];` declarations.
///
/// Uniform blocks are skipped; array suffixes and initialisers are stripped.
pub fn declared_uniforms(source: &str) -> Vec<String> {
    let code: String = source
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");

    let mut names = Vec::new();
    for statement in code.split(';') {
        if statement.contains('{') && statement.contains("uniform") {
            let after_brace = statement.rsplit('{').next().unwrap_or("");
            if !after_brace.split_whitespace().any(|t| t == "uniform") {
                continue;
            }
        }

        let tokens: Vec<&str> = statement.split_whitespace().collect();
        let Some(pos) = tokens.iter().rposition(|t| *t == "uniform") else {
            continue;
        };

        let mut rest = tokens[pos + 1..]
            .iter()
            .skip_while(|t| matches!(**t, "lowp" | "mediump" | "highp"));
        if rest.next().is_none() {
            continue;
        }
        let declarators = rest.copied().collect::<Vec<_>>().join(" ");

        for declarator in declarators.split(',') {
            let name = declarator
                .split(['[', '='])
                .next()
                .unwrap_or("")
                .trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// A linked and validated program with its resolved uniform locations.
#[derive(Debug)]
pub struct ShaderProgram {
    id: GLuint,
    uniforms: HashMap<String, GLint>,
}

impl ShaderProgram {
    pub fn build<A: ShaderApi>(api: &mut A, source: &ShaderSource) -> Result<Self> {
        let program = api.create_program();
        if program == 0 {
            log::error!("Error creating shader program");
            return Err(RenderError::ProgramCreation);
        }

        let mut shaders = Vec::with_capacity(2);
        for (stage, text) in source.stages() {
            match Self::compile_shader(api, stage, text) {
                Ok(shader) => {
                    api.attach_shader(program, shader);
                    shaders.push(shader);
                }
                Err(err) => {
                    for shader in shaders {
                        api.delete_shader(shader);
                    }
                    api.delete_program(program);
                    return Err(err);
                }
            }
        }

        let linked = Self::link_program(api, program);

        for shader in shaders {
            api.detach_shader(program, shader);
            api.delete_shader(shader);
        }

        if let Err(err) = linked {
            api.delete_program(program);
            return Err(err);
        }

        let mut uniforms = HashMap::new();
        for name in source.declared_uniforms() {
            let cname = CString::new(name.as_str())?;
            let location = api.uniform_location(program, &cname);
            if location == -1 {
                log::warn!("Uniform '{}' not found in shader", name);
                continue;
            }
            uniforms.insert(name, location);
        }

        log::debug!(
            "Built shader program {} with {} active uniforms",
            program,
            uniforms.len()
        );

        Ok(ShaderProgram {
            id: program,
            uniforms,
        })
    }

    fn compile_shader<A: ShaderApi>(api: &mut A, stage: ShaderStage, text: &str) -> Result<GLuint> {
        let source = CString::new(text)?;
        let shader = api.create_shader(stage.gl_enum());
        api.shader_source(shader, &source);
        api.compile_shader(shader);

        if api.shader_iv(shader, gl::COMPILE_STATUS) == 0 {
            let len = api.shader_iv(shader, gl::INFO_LOG_LENGTH);
            let log = api.shader_info_log(shader, len);
            api.delete_shader(shader);
            return Err(RenderError::Compilation {
                stage: stage.name(),
                kind: stage.gl_enum(),
                log: log.trim_end().to_string(),
            });
        }

        Ok(shader)
    }

    fn link_program<A: ShaderApi>(api: &mut A, program: GLuint) -> Result<()> {
        api.link_program(program);
        if let Some(log) = Self::failed_status(api, program, gl::LINK_STATUS) {
            return Err(RenderError::Linking(log));
        }

        // Some drivers only report certain errors at validation time.
        api.validate_program(program);
        if let Some(log) = Self::failed_status(api, program, gl::VALIDATE_STATUS) {
            return Err(RenderError::Validation(log));
        }

        Ok(())
    }

    fn failed_status<A: ShaderApi>(api: &A, program: GLuint, status: GLenum) -> Option<String> {
        if api.program_iv(program, status) != 0 {
            return None;
        }
        let len = api.program_iv(program, gl::INFO_LOG_LENGTH);
        Some(api.program_info_log(program, len).trim_end().to_string())
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used<A: ShaderApi>(&self, api: &mut A) {
        api.use_program(self.id);
    }

    /// Location of an active uniform, `None` if undeclared or optimised out.
    pub fn uniform(&self, name: &str) -> Option<GLint> {
        self.uniforms.get(name).copied()
    }

    #[cfg(test)]
    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.uniforms.keys().map(String::as_str)
    }

    pub fn delete<A: ShaderApi>(self, api: &mut A) {
        api.delete_program(self.id);
    }
}
