//! Shader selection component

use crate::ecs::component::ComponentHeader;
use crate::render::ShaderType;

/// Overrides the program an entity is drawn with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderComponent {
    pub(crate) header: ComponentHeader,
    pub shader: ShaderType,
}

impl ShaderComponent {
    pub fn new(shader: ShaderType) -> Self {
        Self {
            shader,
            ..Default::default()
        }
    }
}
