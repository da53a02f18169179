//! Render back end abstraction
//!
//! The frame renderer talks to the GPU only through [`RenderBackend`]. The
//! OpenGL implementation lives in [`crate::render::gl`]; the
//! [`RecordingBackend`](crate::render::RecordingBackend) records calls
//! instead, for headless runs and tests.

use std::path::Path;

use thiserror::Error;

use crate::assets::{AssetError, MeshData};
use crate::foundation::math::{Mat3, Mat4, Vec3};
use crate::render::{PostEffect, ShaderType};

/// Handle to a model owned by the back end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelHandle(pub u32);

/// Handle to raw geometry owned by the back end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(pub u32);

/// Result of loading a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedModel {
    pub handle: ModelHandle,
    /// The model has textures with transparent pixels
    pub transparent: bool,
}

/// A value for a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        Self::Mat3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

/// Stencil configuration for the next draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilMode {
    /// Always pass, leave the buffer untouched
    Ignore,
    /// Always pass and write 1 where the draw lands
    Write,
    /// Pass only where the buffer is not 1, without writing
    OutlineFringe,
}

/// Render errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Shader compilation failed for {path}: {log}")]
    ShaderCompile { path: String, log: String },

    #[error("Shader link failed for {0:?}: {1}")]
    ShaderLink(ShaderType, String),

    #[error("No shader paths configured for {0:?}")]
    MissingShader(ShaderType),

    #[error("Framebuffer incomplete: status {0:#x}")]
    Framebuffer(u32),

    #[error("Unknown model handle {0:?}")]
    UnknownModel(ModelHandle),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Resource creation, available during scene setup
pub trait ResourceLoader {
    /// Import a model file
    fn load_model(&mut self, path: &Path) -> Result<LoadedModel, RenderError>;

    /// Upload raw geometry
    fn create_geometry(&mut self, mesh: &MeshData) -> Result<GeometryHandle, RenderError>;
}

/// The operations the frame renderer needs from a graphics API
pub trait RenderBackend: ResourceLoader {
    /// Bind the target (offscreen when post-processing) and clear it
    fn begin_frame(&mut self, clear_color: [f32; 4], offscreen: bool);

    /// Make `shader` the current program
    fn use_shader(&mut self, shader: ShaderType);

    /// Set a uniform on the current program
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn set_depth_test(&mut self, enabled: bool);

    fn set_blending(&mut self, enabled: bool);

    fn set_stencil(&mut self, mode: StencilMode);

    /// Draw every mesh of a model with the current program
    fn draw_model(&mut self, model: ModelHandle);

    /// Draw raw geometry with the current program
    fn draw_geometry(&mut self, geometry: GeometryHandle, vertex_count: usize);

    /// Resolve the offscreen target through `effect` into the window
    fn present_post_process(&mut self, effect: PostEffect);

    /// Framebuffer size changed
    fn resize(&mut self, width: u32, height: u32);

    /// Current framebuffer size in pixels
    fn viewport(&self) -> (u32, u32);
}
