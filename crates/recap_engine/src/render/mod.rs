//! Rendering
//!
//! The backend-agnostic front end (camera, light uniforms, pass ordering)
//! talks to a [`RenderBackend`]. [`gl::GlBackend`] drives OpenGL 3.3;
//! [`RecordingBackend`] records the calls for headless runs.

pub mod backend;
pub mod camera;
pub mod commands;
pub mod gl;
pub mod lighting;
pub mod renderer;
pub mod shader;

pub use backend::{
    GeometryHandle, LoadedModel, ModelHandle, RenderBackend, RenderError, ResourceLoader,
    StencilMode, UniformValue,
};
pub use camera::Camera;
pub use commands::{RecordingBackend, RenderCommand};
pub use lighting::LightUniforms;
pub use renderer::{DrawPlan, FrameRenderer};
pub use shader::{PostEffect, ShaderType};
