//! Configuration system
//!
//! Engine settings are plain serde types. Any of them can be loaded from or
//! saved to a TOML or RON file through the [`Config`] trait.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::render::{PostEffect, ShaderType};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(path, &contents)
    }

    /// Parse configuration text, picking the format from the file extension
    fn parse(path: &str, contents: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window and context settings
    pub window: WindowConfig,
    /// Projection settings
    pub camera: CameraConfig,
    /// Movement and mouse-look tuning
    pub input: InputConfig,
    /// Draw submission settings
    pub render: RenderConfig,
    /// Component pool sizing
    pub pool: PoolConfig,
}

impl Config for EngineConfig {}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
    /// Whether to start in fullscreen on the primary monitor
    pub fullscreen: bool,
    /// Draw polygons as lines
    pub wireframe: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Recap".to_string(),
            width: 1600,
            height: 900,
            fullscreen: false,
            wireframe: false,
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Input tuning shared with scene handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Units per second for movement actions
    pub move_speed: f32,
    /// Degrees of rotation per pixel of cursor travel
    pub mouse_sensitivity: f32,
    /// Clamp camera pitch to +/- 89 degrees
    pub constrain_pitch: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            mouse_sensitivity: 0.1,
            constrain_pitch: true,
        }
    }
}

/// Vertex and fragment source paths of one shader program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderPaths {
    /// Path to the vertex shader source
    pub vertex: String,
    /// Path to the fragment shader source
    pub fragment: String,
}

impl ShaderPaths {
    /// Create a shader path pair
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Render configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Clear color (RGBA)
    pub clear_color: [f32; 4],
    /// Enable alpha blending and draw transparent models back to front
    pub blending: bool,
    /// Render into an offscreen target and resolve through the effect shader
    pub post_processing: bool,
    /// Effect applied by the post-processing pass
    pub post_effect: PostEffect,
    /// Material shininess uploaded to the default shader
    pub shininess: f32,
    /// Scale applied to the silhouette drawn behind outlined models
    pub outline_scale: f32,
    /// Texture bound when a mesh has none
    pub default_texture: String,
    /// Shader sources per program
    pub shaders: BTreeMap<ShaderType, ShaderPaths>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let mut shaders = BTreeMap::new();
        shaders.insert(
            ShaderType::Default,
            ShaderPaths::new("resources/shaders/default.vert", "resources/shaders/default.frag"),
        );
        shaders.insert(
            ShaderType::LightSource,
            ShaderPaths::new("resources/shaders/light_source.vert", "resources/shaders/simple_color.frag"),
        );
        shaders.insert(
            ShaderType::Outline,
            ShaderPaths::new("resources/shaders/light_source.vert", "resources/shaders/simple_color.frag"),
        );
        shaders.insert(
            ShaderType::PostProcess,
            ShaderPaths::new("resources/shaders/screen.vert", "resources/shaders/screen.frag"),
        );

        Self {
            clear_color: [0.1, 0.1, 0.1, 1.0],
            blending: true,
            post_processing: false,
            post_effect: PostEffect::None,
            shininess: 64.0,
            outline_scale: 1.1,
            default_texture: "resources/textures/white.png".to_string(),
            shaders,
        }
    }
}

/// Component pool sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Slots allocated at startup
    pub initial_capacity: usize,
    /// Slots appended whenever every slot is in use
    pub growth_step: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 100,
            growth_step: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let text = r#"
            [window]
            title = "Test"
            width = 800

            [pool]
            initial_capacity = 4
            growth_step = 2
        "#;
        let config = EngineConfig::parse("engine.toml", text).unwrap();

        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 900);
        assert_eq!(config.pool.initial_capacity, 4);
        assert_eq!(config.pool.growth_step, 2);
        assert!((config.input.move_speed - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ron_parses_render_section() {
        let text = "(render: (blending: false, post_processing: true, post_effect: Grayscale))";
        let config = EngineConfig::parse("engine.ron", text).unwrap();

        assert!(!config.render.blending);
        assert!(config.render.post_processing);
        assert_eq!(config.render.post_effect, PostEffect::Grayscale);
        assert!(config.render.shaders.contains_key(&ShaderType::Outline));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let result = EngineConfig::parse("engine.json", "{}");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
