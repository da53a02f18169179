//! OBJ model import via `tobj`
//!
//! Faces are triangulated and re-indexed so positions, normals and texture
//! coordinates share one index buffer. Material textures are decoded once per
//! path and shared between meshes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::assets::{AssetError, ImageData, MeshData, Vertex};

/// Role of a texture within a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    /// Sampler prefix inside the `material` uniform struct
    pub const fn sampler_prefix(self) -> &'static str {
        match self {
            Self::Diffuse => "diffuse",
            Self::Specular => "specular",
        }
    }
}

/// A mesh's use of one of the model's decoded images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRef {
    pub kind: TextureKind,
    /// Index into [`ModelData::images`]
    pub image: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ModelMesh {
    pub mesh: MeshData,
    pub textures: Vec<TextureRef>,
}

/// Every mesh of an imported model plus its decoded textures
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub meshes: Vec<ModelMesh>,
    pub images: Vec<ImageData>,
    /// Set when any texture carries transparent pixels
    pub transparent: bool,
}

impl ModelData {
    /// Import an OBJ file and the textures named by its materials
    ///
    /// Missing or undecodable textures are logged and skipped; the mesh then
    /// renders with the default texture.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, materials) = tobj::load_obj(path, &options)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        let materials = materials.unwrap_or_else(|e| {
            log::warn!("No materials for {}: {}", path.display(), e);
            Vec::new()
        });

        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut data = Self::default();
        let mut loaded: BTreeMap<PathBuf, Option<usize>> = BTreeMap::new();

        for model in &models {
            let mut textures = Vec::new();
            if let Some(material) = model.mesh.material_id.and_then(|id| materials.get(id)) {
                let named = [
                    (TextureKind::Diffuse, material.diffuse_texture.as_deref()),
                    (TextureKind::Specular, material.specular_texture.as_deref()),
                ];
                for (kind, file) in named {
                    let Some(file) = file else { continue };
                    let texture_path = directory.join(file);
                    let image = *loaded
                        .entry(texture_path.clone())
                        .or_insert_with(|| data.decode_texture(&texture_path));
                    if let Some(image) = image {
                        textures.push(TextureRef { kind, image });
                    }
                }
            }

            data.meshes.push(ModelMesh {
                mesh: convert_mesh(&model.mesh),
                textures,
            });
        }

        if data.meshes.is_empty() {
            return Err(AssetError::InvalidData(format!(
                "{} contains no meshes",
                path.display()
            )));
        }

        log::info!(
            "Loaded model {:?}: {} meshes, {} textures{}",
            path,
            data.meshes.len(),
            data.images.len(),
            if data.transparent { ", transparent" } else { "" }
        );
        Ok(data)
    }

    fn decode_texture(&mut self, path: &Path) -> Option<usize> {
        match ImageData::from_file(path) {
            Ok(image) => {
                self.transparent |= image.has_alpha;
                self.images.push(image);
                Some(self.images.len() - 1)
            }
            Err(e) => {
                log::error!("Texture skipped: {}", e);
                None
            }
        }
    }
}

/// Interleave a `tobj` mesh; missing normals or texture coordinates become zero
fn convert_mesh(mesh: &tobj::Mesh) -> MeshData {
    let vertex_count = mesh.positions.len() / 3;
    let vertices = (0..vertex_count)
        .map(|i| {
            let position = [
                mesh.positions[3 * i],
                mesh.positions[3 * i + 1],
                mesh.positions[3 * i + 2],
            ];
            let normal = mesh
                .normals
                .get(3 * i..3 * i + 3)
                .map_or([0.0, 0.0, 0.0], |n| [n[0], n[1], n[2]]);
            let tex_coords = mesh
                .texcoords
                .get(2 * i..2 * i + 2)
                .map_or([0.0, 0.0], |t| [t[0], t[1]]);
            Vertex::new(position, normal, tex_coords)
        })
        .collect();

    MeshData {
        vertices,
        indices: mesh.indices.clone(),
    }
}
