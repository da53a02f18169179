//! Asset loading: images, OBJ models and built-in meshes
//!
//! Everything here is CPU-side. The render back end uploads the results.

pub mod image_loader;
pub mod model_loader;
pub mod primitives;

pub use image_loader::ImageData;
pub use model_loader::{ModelData, ModelMesh, TextureKind, TextureRef};

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Interleaved vertex layout shared by every mesh
///
/// Attribute locations: 0 = position, 1 = normal, 2 = texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }
}

/// Indexed triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    /// Empty for non-indexed meshes
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices a draw call submits
    pub fn draw_count(&self) -> usize {
        if self.indices.is_empty() {
            self.vertices.len()
        } else {
            self.indices.len()
        }
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
