//! Headless back end that records what the renderer asks for

use std::path::{Path, PathBuf};

use crate::assets::MeshData;
use crate::render::backend::{
    GeometryHandle, LoadedModel, ModelHandle, RenderBackend, RenderError, ResourceLoader,
    StencilMode, UniformValue,
};
use crate::render::{PostEffect, ShaderType};

/// One recorded back end call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    BeginFrame { offscreen: bool },
    UseShader(ShaderType),
    SetUniform { name: String, value: UniformValue },
    DepthTest(bool),
    Blending(bool),
    Stencil(StencilMode),
    DrawModel(ModelHandle),
    DrawGeometry(GeometryHandle),
    PostProcess(PostEffect),
}

/// Render back end that performs no GPU work
///
/// Models "load" from any path; paths containing `transparent` produce
/// transparent models so scenes can exercise the sorted pass.
#[derive(Debug)]
pub struct RecordingBackend {
    commands: Vec<RenderCommand>,
    models: Vec<PathBuf>,
    geometries: usize,
    viewport: (u32, u32),
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(1600, 900)
    }
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            models: Vec::new(),
            geometries: 0,
            viewport: (width, height),
        }
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Models in draw order
    pub fn drawn_models(&self) -> Vec<ModelHandle> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::DrawModel(model) => Some(*model),
                _ => None,
            })
            .collect()
    }

    /// Last value recorded for uniform `name`
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|command| match command {
            RenderCommand::SetUniform { name: set, value } if set == name => Some(*value),
            _ => None,
        })
    }

    pub fn model_path(&self, model: ModelHandle) -> Option<&Path> {
        self.models.get(model.0 as usize).map(PathBuf::as_path)
    }
}

impl ResourceLoader for RecordingBackend {
    fn load_model(&mut self, path: &Path) -> Result<LoadedModel, RenderError> {
        let handle = ModelHandle(self.models.len() as u32);
        self.models.push(path.to_path_buf());
        Ok(LoadedModel {
            handle,
            transparent: path.to_string_lossy().contains("transparent"),
        })
    }

    fn create_geometry(&mut self, _mesh: &MeshData) -> Result<GeometryHandle, RenderError> {
        let handle = GeometryHandle(self.geometries as u32);
        self.geometries += 1;
        Ok(handle)
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_frame(&mut self, _clear_color: [f32; 4], offscreen: bool) {
        self.commands.push(RenderCommand::BeginFrame { offscreen });
    }

    fn use_shader(&mut self, shader: ShaderType) {
        self.commands.push(RenderCommand::UseShader(shader));
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.commands.push(RenderCommand::SetUniform {
            name: name.to_string(),
            value,
        });
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.commands.push(RenderCommand::DepthTest(enabled));
    }

    fn set_blending(&mut self, enabled: bool) {
        self.commands.push(RenderCommand::Blending(enabled));
    }

    fn set_stencil(&mut self, mode: StencilMode) {
        self.commands.push(RenderCommand::Stencil(mode));
    }

    fn draw_model(&mut self, model: ModelHandle) {
        self.commands.push(RenderCommand::DrawModel(model));
    }

    fn draw_geometry(&mut self, geometry: GeometryHandle, _vertex_count: usize) {
        self.commands.push(RenderCommand::DrawGeometry(geometry));
    }

    fn present_post_process(&mut self, effect: PostEffect) {
        self.commands.push(RenderCommand::PostProcess(effect));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}
