//! Geometry component: a raw mesh handle without materials

use crate::ecs::component::ComponentHeader;
use crate::render::GeometryHandle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryComponent {
    pub(crate) header: ComponentHeader,

    /// `None` until a mesh has been uploaded
    pub geometry: Option<GeometryHandle>,

    pub vertex_count: usize,
}

impl GeometryComponent {
    pub fn new(geometry: GeometryHandle, vertex_count: usize) -> Self {
        Self {
            geometry: Some(geometry),
            vertex_count,
            ..Default::default()
        }
    }
}
