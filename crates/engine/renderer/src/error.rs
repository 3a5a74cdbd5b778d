//! Error types for the grid renderer

use thiserror::Error;

/// Errors raised while setting up or reading back GL resources
#[derive(Error, Debug)]
pub enum RenderError {
    /// GLSL compile failure, with the driver's info log
    #[error("Shader compilation error: {0}")]
    ShaderCompile(String),

    /// Program link failure, with the driver's info log
    #[error("Program link error: {0}")]
    ProgramLink(String),

    /// Failed to create a GL object (buffer, VAO, program)
    #[error("Failed to create {what}: {reason}")]
    Resource { what: &'static str, reason: String },

    /// Rendering was requested before `init_gl`
    #[error("Renderer used before init_gl")]
    NotInitialized,

    /// Framebuffer readback produced an unusable image
    #[error("Framebuffer capture failed: {0}")]
    Capture(String),

    /// Image encoding or file error while saving a capture
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl RenderError {
    pub(crate) fn resource(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Resource {
            what,
            reason: reason.into(),
        }
    }
}
