//! Model component: an imported model plus its draw flags

use crate::ecs::component::ComponentHeader;
use crate::foundation::math::Vec3;
use crate::render::{LoadedModel, ModelHandle};

/// Outline color used when none is given
pub const DEFAULT_OUTLINE_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct ModelComponent {
    pub(crate) header: ComponentHeader,

    /// `None` until a model has been loaded
    pub model: Option<ModelHandle>,

    /// Drawn back-to-front after every opaque entity
    pub transparent: bool,

    /// Drawn with a stencil outline
    pub outlined: bool,

    pub outline_color: Vec3,
}

impl Default for ModelComponent {
    fn default() -> Self {
        Self {
            header: ComponentHeader::default(),
            model: None,
            transparent: false,
            outlined: false,
            outline_color: DEFAULT_OUTLINE_COLOR,
        }
    }
}

impl ModelComponent {
    /// Bind a loaded model, inheriting its transparency
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: Some(model.handle),
            transparent: model.transparent,
            ..Default::default()
        }
    }

    /// Builder pattern: Force the transparency flag
    pub fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }
}
