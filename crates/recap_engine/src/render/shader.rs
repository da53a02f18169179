//! Shader program and post-processing effect identifiers

use serde::{Deserialize, Serialize};

/// The programs the renderer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ShaderType {
    /// Lit, textured models
    #[default]
    Default,
    /// Unlit geometry for visible light sources
    LightSource,
    /// Flat color silhouette behind outlined models
    Outline,
    /// Full-screen effect pass
    PostProcess,
}

impl ShaderType {
    pub const ALL: [Self; 4] = [Self::Default, Self::LightSource, Self::Outline, Self::PostProcess];

    /// Whether the program consumes the light uniforms
    pub const fn is_lit(self) -> bool {
        matches!(self, Self::Default)
    }
}

/// Effect applied when resolving the offscreen target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PostEffect {
    #[default]
    None,
    Inversion,
    Grayscale,
    Sharpen,
    Blur,
    EdgeDetect,
}

impl PostEffect {
    /// Value of the `effect` uniform in the post-processing shader
    pub const fn uniform_value(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Inversion => 1,
            Self::Grayscale => 2,
            Self::Sharpen => 3,
            Self::Blur => 4,
            Self::EdgeDetect => 5,
        }
    }
}
