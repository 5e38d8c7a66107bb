use std::ffi::NulError;

use gl::types::GLenum;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Context creation failed: {0}")]
    Context(String),

    #[error("Failed to create shader program object")]
    ProgramCreation,

    #[error("Error compiling the {stage} shader ({kind}): {log}")]
    Compilation {
        stage: &'static str,
        kind: GLenum,
        log: String,
    },

    #[error("Error linking shader program: {0}")]
    Linking(String),

    #[error("Error validating shader program: {0}")]
    Validation(String),

    #[error("Null byte in shader source: {0}")]
    Nul(#[from] NulError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown scene: {0}")]
    UnknownScene(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
