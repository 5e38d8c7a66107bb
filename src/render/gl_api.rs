use std::ffi::CStr;
use std::ptr;

use gl::types::*;
use glam::Mat4;

/// The slice of the OpenGL API used to build programs and push uniforms.
///
/// [`Gl`] forwards to the loaded `gl` function pointers; tests substitute a
/// recording fake.
pub trait ShaderApi {
    fn create_program(&mut self) -> GLuint;
    fn create_shader(&mut self, kind: GLenum) -> GLuint;
    fn shader_source(&mut self, shader: GLuint, source: &CStr);
    fn compile_shader(&mut self, shader: GLuint);
    fn shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint;
    /// Fetches the info log into a buffer of exactly `len` bytes.
    fn shader_info_log(&self, shader: GLuint, len: GLint) -> String;
    fn attach_shader(&mut self, program: GLuint, shader: GLuint);
    fn detach_shader(&mut self, program: GLuint, shader: GLuint);
    fn delete_shader(&mut self, shader: GLuint);

    fn link_program(&mut self, program: GLuint);
    fn validate_program(&mut self, program: GLuint);
    fn program_iv(&self, program: GLuint, pname: GLenum) -> GLint;
    fn program_info_log(&self, program: GLuint, len: GLint) -> String;
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn use_program(&mut self, program: GLuint);
    fn delete_program(&mut self, program: GLuint);

    fn uniform_mat4(&mut self, location: GLint, matrix: &Mat4);
    fn uniform_1f(&mut self, location: GLint, value: f32);
}

/// Production [`ShaderApi`]. Requires a current context with the `gl`
/// function pointers loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gl;

fn read_info_log(len: GLint, fetch: impl FnOnce(GLint, *mut GLsizei, *mut GLchar)) -> String {
    let mut buffer = vec![0u8; len.max(0) as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.clamp(0, len.max(0)) as usize);
    String::from_utf8_lossy(&buffer).into_owned()
}

impl ShaderApi for Gl {
    fn create_program(&mut self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn create_shader(&mut self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&mut self, shader: GLuint, source: &CStr) {
        unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null()) };
    }

    fn compile_shader(&mut self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { gl::GetShaderiv(shader, pname, &mut value) };
        value
    }

    fn shader_info_log(&self, shader: GLuint, len: GLint) -> String {
        read_info_log(len, |len, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, len, written, buf)
        })
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn delete_shader(&mut self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn link_program(&mut self, program: GLuint) {
        unsafe { gl::LinkProgram(program) };
    }

    fn validate_program(&mut self, program: GLuint) {
        unsafe { gl::ValidateProgram(program) };
    }

    fn program_iv(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { gl::GetProgramiv(program, pname, &mut value) };
        value
    }

    fn program_info_log(&self, program: GLuint, len: GLint) -> String {
        read_info_log(len, |len, written, buf| unsafe {
            gl::GetProgramInfoLog(program, len, written, buf)
        })
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn use_program(&mut self, program: GLuint) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&mut self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn uniform_mat4(&mut self, location: GLint, matrix: &Mat4) {
        let columns = matrix.to_cols_array();
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, columns.as_ptr()) };
    }

    fn uniform_1f(&mut self, location: GLint, value: f32) {
        unsafe { gl::Uniform1f(location, value) };
    }
}
