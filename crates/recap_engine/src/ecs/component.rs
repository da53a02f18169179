//! Component registry
//!
//! The engine knows a closed set of component kinds. Each kind is a plain
//! struct implementing [`Component`], which binds the type to its
//! [`ComponentKind`] tag and to its column inside [`ComponentColumns`], so the
//! tag and the backing array cannot disagree.

use super::components::{
    CameraComponent, GeometryComponent, InputComponent, ModelComponent, PointLightComponent,
    ShaderComponent, SpotLightComponent, TransformComponent,
};

/// The closed set of component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Position, velocity, scale and orientation
    Transform,
    /// Bound logical actions
    Input,
    /// Camera attached to the entity
    Camera,
    /// Shader override used when drawing
    Shader,
    /// Point light source
    PointLight,
    /// Spot light source
    SpotLight,
    /// Imported model binding
    Model,
    /// Raw geometry handle
    Geometry,
}

impl ComponentKind {
    /// Every kind, in column order
    pub const ALL: [Self; 8] = [
        Self::Transform,
        Self::Input,
        Self::Camera,
        Self::Shader,
        Self::PointLight,
        Self::SpotLight,
        Self::Model,
        Self::Geometry,
    ];

    /// Whether this kind feeds the scene light counters
    pub const fn is_light(self) -> bool {
        matches!(self, Self::PointLight | Self::SpotLight)
    }
}

/// Bookkeeping carried by every component row
///
/// `owner_id` is a plain back-reference to the slot holding the row. It is a
/// relation only and must never be used as a lifetime anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentHeader {
    pub(crate) active: bool,
    pub(crate) owner_id: usize,
}

impl ComponentHeader {
    /// Whether the component is present on its entity
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Slot of the entity owning this row
    pub const fn owner_id(&self) -> usize {
        self.owner_id
    }
}

/// A component kind stored in the pool
pub trait Component: Default + 'static {
    /// Kind tag of this component type
    const KIND: ComponentKind;

    /// Shared bookkeeping of this row
    fn header(&self) -> &ComponentHeader;

    /// Mutable bookkeeping of this row
    fn header_mut(&mut self) -> &mut ComponentHeader;

    /// Column holding every row of this kind
    fn column(columns: &ComponentColumns) -> &[Self];

    /// Mutable column holding every row of this kind
    fn column_mut(columns: &mut ComponentColumns) -> &mut Vec<Self>;

    /// Whether the component is present on its entity
    fn is_active(&self) -> bool {
        self.header().is_active()
    }

    /// Slot of the entity owning this row
    fn owner_id(&self) -> usize {
        self.header().owner_id()
    }
}

/// A default row stamped with its slot
fn vacant_row<T: Component>(slot: usize) -> T {
    let mut row = T::default();
    row.header_mut().owner_id = slot;
    row
}

fn grow_column<T: Component>(column: &mut Vec<T>, capacity: usize) {
    let start = column.len();
    column.extend((start..capacity).map(vacant_row::<T>));
}

fn reset_row<T: Component>(column: &mut [T], slot: usize) {
    column[slot] = vacant_row(slot);
}

macro_rules! register_components {
    ($($ty:ty => $kind:ident, $field:ident;)*) => {
        /// Structure-of-arrays storage: one column per component kind, all
        /// indexed by entity slot
        #[derive(Debug, Default)]
        pub struct ComponentColumns {
            $($field: Vec<$ty>,)*
        }

        impl ComponentColumns {
            /// Grow every column to `capacity` rows
            pub(crate) fn grow(&mut self, capacity: usize) {
                $(grow_column(&mut self.$field, capacity);)*
            }

            /// Reset every kind at `slot` to its default, inactive row
            pub(crate) fn reset(&mut self, slot: usize) {
                $(reset_row(&mut self.$field, slot);)*
            }

            /// Kinds active at `slot`, in column order
            pub(crate) fn active_kinds(&self, slot: usize) -> Vec<ComponentKind> {
                let mut kinds = Vec::new();
                $(
                    if self.$field.get(slot).is_some_and(Component::is_active) {
                        kinds.push(ComponentKind::$kind);
                    }
                )*
                kinds
            }

            /// Whether every row at `slot` names `slot` as its owner
            pub(crate) fn owners_match(&self, slot: usize) -> bool {
                true $(&& self.$field.get(slot).is_some_and(|row| row.owner_id() == slot))*
            }
        }

        $(
            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn header(&self) -> &ComponentHeader {
                    &self.header
                }

                fn header_mut(&mut self) -> &mut ComponentHeader {
                    &mut self.header
                }

                fn column(columns: &ComponentColumns) -> &[Self] {
                    &columns.$field
                }

                fn column_mut(columns: &mut ComponentColumns) -> &mut Vec<Self> {
                    &mut columns.$field
                }
            }
        )*
    };
}

register_components! {
    TransformComponent => Transform, transforms;
    InputComponent => Input, inputs;
    CameraComponent => Camera, cameras;
    ShaderComponent => Shader, shaders;
    PointLightComponent => PointLight, point_lights;
    SpotLightComponent => SpotLight, spot_lights;
    ModelComponent => Model, models;
    GeometryComponent => Geometry, geometries;
}
