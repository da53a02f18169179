//! OpenGL 3.3 core back end
//!
//! Requires a current context with function pointers loaded through
//! `gl::load_with` (see [`crate::platform::GlfwPlatform`]).

#![allow(unsafe_code)]

pub mod framebuffer;
pub mod mesh;
pub mod program;
pub mod texture;

use std::collections::BTreeMap;
use std::path::Path;

use crate::assets::{primitives, ImageData, MeshData, ModelData, TextureKind};
use crate::config::{RenderConfig, WindowConfig};
use crate::render::backend::{
    GeometryHandle, LoadedModel, ModelHandle, RenderBackend, RenderError, ResourceLoader,
    StencilMode, UniformValue,
};
use crate::render::{PostEffect, ShaderType};

use self::framebuffer::Framebuffer;
use self::mesh::GpuMesh;
use self::program::ShaderProgram;
use self::texture::Texture;

struct GlMesh {
    mesh: GpuMesh,
    textures: Vec<(TextureKind, usize)>,
}

struct GlModel {
    meshes: Vec<GlMesh>,
    textures: Vec<Texture>,
}

/// Render back end issuing OpenGL calls
pub struct GlBackend {
    programs: BTreeMap<ShaderType, ShaderProgram>,
    current: ShaderType,
    models: Vec<GlModel>,
    geometries: Vec<GpuMesh>,
    default_texture: Texture,
    screen_quad: GpuMesh,
    framebuffer: Option<Framebuffer>,
    post_processing: bool,
    viewport: (u32, u32),
}

impl GlBackend {
    /// Build every configured program and the global GL state
    ///
    /// Shader and texture failures are logged and leave the affected
    /// resource unusable; rendering continues with degraded visuals.
    pub fn new(render: &RenderConfig, window: &WindowConfig, viewport: (u32, u32)) -> Self {
        let mut programs = BTreeMap::new();
        for kind in ShaderType::ALL {
            let program = match render.shaders.get(&kind) {
                Some(paths) => ShaderProgram::from_files(kind, Path::new(&paths.vertex), Path::new(&paths.fragment)),
                None => Err(RenderError::MissingShader(kind)),
            };
            let program = program.unwrap_or_else(|e| {
                log::error!("{}", e);
                ShaderProgram::unusable()
            });
            programs.insert(kind, program);
        }

        let default_image = ImageData::from_file(&render.default_texture).unwrap_or_else(|e| {
            log::warn!("Default texture unavailable ({}), using plain white", e);
            ImageData::white()
        });

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::Enable(gl::STENCIL_TEST);
            gl::StencilOp(gl::KEEP, gl::KEEP, gl::REPLACE);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            if window.wireframe {
                gl::PolygonMode(gl::FRONT_AND_BACK, gl::LINE);
            }
        }

        let mut backend = Self {
            programs,
            current: ShaderType::Default,
            models: Vec::new(),
            geometries: Vec::new(),
            default_texture: Texture::from_image(&default_image),
            screen_quad: GpuMesh::upload(&primitives::screen_quad()),
            framebuffer: None,
            post_processing: render.post_processing,
            viewport: (0, 0),
        };
        backend.resize(viewport.0, viewport.1);
        backend
    }

    fn program(&mut self) -> Option<&mut ShaderProgram> {
        self.programs.get_mut(&self.current)
    }

    fn bind_textures(&mut self, model: usize, mesh: usize) {
        let Some(model) = self.models.get(model) else {
            return;
        };
        let Some(mesh) = model.meshes.get(mesh) else {
            return;
        };

        let mut assignments = Vec::new();
        let mut counters = [0_u32; 2];
        for (unit, &(kind, image)) in mesh.textures.iter().enumerate() {
            let counter = &mut counters[kind as usize];
            *counter += 1;
            let name = format!("material.{}{}", kind.sampler_prefix(), counter);
            if let Some(texture) = model.textures.get(image) {
                texture.bind(unit as u32);
                assignments.push((name, unit as i32));
            }
        }

        let unit_count = assignments.len() as u32;
        for kind in [TextureKind::Diffuse, TextureKind::Specular] {
            if counters[kind as usize] == 0 {
                let unit = unit_count + kind as u32;
                self.default_texture.bind(unit);
                assignments.push((format!("material.{}1", kind.sampler_prefix()), unit as i32));
            }
        }

        if let Some(program) = self.program() {
            for (name, unit) in assignments {
                program.set_uniform(&name, UniformValue::Int(unit));
            }
        }
    }
}

impl ResourceLoader for GlBackend {
    fn load_model(&mut self, path: &Path) -> Result<LoadedModel, RenderError> {
        let data = ModelData::load_obj(path)?;
        let textures = data.images.iter().map(Texture::from_image).collect();
        let meshes = data
            .meshes
            .iter()
            .map(|mesh| GlMesh {
                mesh: GpuMesh::upload(&mesh.mesh),
                textures: mesh.textures.iter().map(|t| (t.kind, t.image)).collect(),
            })
            .collect();

        let handle = ModelHandle(self.models.len() as u32);
        self.models.push(GlModel { meshes, textures });
        Ok(LoadedModel {
            handle,
            transparent: data.transparent,
        })
    }

    fn create_geometry(&mut self, mesh: &MeshData) -> Result<GeometryHandle, RenderError> {
        let handle = GeometryHandle(self.geometries.len() as u32);
        self.geometries.push(GpuMesh::upload(mesh));
        Ok(handle)
    }
}

impl RenderBackend for GlBackend {
    fn begin_frame(&mut self, clear_color: [f32; 4], offscreen: bool) {
        match (&self.framebuffer, offscreen) {
            (Some(framebuffer), true) => framebuffer.bind(),
            _ => Framebuffer::unbind(),
        }
        let [r, g, b, a] = clear_color;
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::StencilMask(0xFF);
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT);
        }
    }

    fn use_shader(&mut self, shader: ShaderType) {
        self.current = shader;
        if let Some(program) = self.programs.get(&shader) {
            program.bind();
        }
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        if let Some(program) = self.program() {
            program.set_uniform(name, value);
        }
    }

    fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }
        }
    }

    fn set_blending(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::BLEND);
            } else {
                gl::Disable(gl::BLEND);
            }
        }
    }

    fn set_stencil(&mut self, mode: StencilMode) {
        unsafe {
            match mode {
                StencilMode::Ignore => {
                    gl::StencilFunc(gl::ALWAYS, 0, 0xFF);
                    gl::StencilMask(0x00);
                }
                StencilMode::Write => {
                    gl::StencilFunc(gl::ALWAYS, 1, 0xFF);
                    gl::StencilMask(0xFF);
                }
                StencilMode::OutlineFringe => {
                    gl::StencilFunc(gl::NOTEQUAL, 1, 0xFF);
                    gl::StencilMask(0x00);
                }
            }
        }
    }

    fn draw_model(&mut self, model: ModelHandle) {
        let index = model.0 as usize;
        let mesh_count = match self.models.get(index) {
            Some(model) => model.meshes.len(),
            None => {
                log::warn!("{}", RenderError::UnknownModel(model));
                return;
            }
        };

        for mesh in 0..mesh_count {
            self.bind_textures(index, mesh);
            self.models[index].meshes[mesh].mesh.draw();
        }
    }

    fn draw_geometry(&mut self, geometry: GeometryHandle, _vertex_count: usize) {
        match self.geometries.get(geometry.0 as usize) {
            Some(mesh) => {
                self.default_texture.bind(0);
                mesh.draw();
            }
            None => log::warn!("Unknown geometry handle {:?}", geometry),
        }
    }

    fn present_post_process(&mut self, effect: PostEffect) {
        let Some(framebuffer) = &self.framebuffer else {
            return;
        };

        Framebuffer::unbind();
        unsafe {
            gl::Disable(gl::DEPTH_TEST);
            gl::ClearColor(1.0, 1.0, 1.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        framebuffer.color().bind(0);

        self.use_shader(ShaderType::PostProcess);
        self.set_uniform("screenTexture", UniformValue::Int(0));
        self.set_uniform("effect", UniformValue::Int(effect.uniform_value()));
        self.screen_quad.draw();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.viewport {
            return;
        }
        self.viewport = (width, height);
        unsafe { gl::Viewport(0, 0, width as i32, height as i32) };

        if self.post_processing && width > 0 && height > 0 {
            self.framebuffer = match Framebuffer::new(width, height) {
                Ok(framebuffer) => Some(framebuffer),
                Err(e) => {
                    log::error!("Post-processing disabled: {}", e);
                    None
                }
            };
        }
    }

    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}
