//! Entity models.
//!
//! An entity model is the record type every entity of a store is built
//! from. It declares, once, the closed set of component types an entity may
//! carry. Each entity holds each declared type either present or absent, so
//! `Without` filters can actually exclude something.
//!
//! Models are declared with [`entity_model!`](crate::entity_model):
//!
//! ```rust
//! use serde::Serialize;
//! use ecs_component::{entity_model, Component, EntityModel};
//!
//! #[derive(Debug, Serialize)]
//! struct Position { x: f32, y: f32 }
//! impl Component for Position {
//!     fn type_name() -> &'static str { "Position" }
//! }
//!
//! #[derive(Debug, Serialize)]
//! struct Npc;
//! impl Component for Npc {
//!     fn type_name() -> &'static str { "Npc" }
//! }
//!
//! entity_model! {
//!     pub struct Actor {
//!         position: Position,
//!         npc: Npc,
//!     }
//! }
//!
//! let full = Actor::new(Position { x: 1.0, y: 2.0 }, Npc);
//! assert!(full.get::<Npc>().is_some());
//!
//! let player = Actor::default().with(Position { x: 0.0, y: 0.0 });
//! assert!(player.get::<Npc>().is_none());
//! ```

use std::fmt;

use crate::component::{Component, ComponentMeta, ComponentTypeId, ComponentValue};

/// A record type holding one optional slot per declared component type.
///
/// Implemented by [`entity_model!`](crate::entity_model); implementing it by
/// hand is possible but the macro keeps `declared`, `contains` and
/// `slots_mut` in agreement.
pub trait EntityModel: Default + fmt::Debug + Send + Sync + 'static {
    /// The declared component types, in declaration order.
    fn declared() -> Vec<ComponentMeta>;

    /// Whether this entity currently holds a component of the given type.
    ///
    /// Always `false` for a type that is not declared by the model.
    fn contains(&self, type_id: ComponentTypeId) -> bool;

    /// Lends every present component as a disjoint mutable reference.
    fn slots_mut(&mut self) -> Slots<'_>;

    /// The first declared component sharing its name with an earlier one.
    ///
    /// Component identity is derived from the name, so a model declaring
    /// two types under one name cannot tell them apart. Queries refuse to
    /// bind against such a model.
    fn name_collision() -> Option<ComponentMeta> {
        let declared = Self::declared();
        declared
            .iter()
            .enumerate()
            .find(|(i, meta)| declared[..*i].iter().any(|earlier| earlier.type_id == meta.type_id))
            .map(|(_, meta)| *meta)
    }

    /// The component types present on this entity, in declaration order.
    fn components(&self) -> Vec<ComponentMeta> {
        Self::declared()
            .into_iter()
            .filter(|meta| self.contains(meta.type_id))
            .collect()
    }

    fn get<T: Component>(&self) -> Option<&T>
    where
        Self: Has<T>,
    {
        self.slot().as_ref()
    }

    fn get_mut<T: Component>(&mut self) -> Option<&mut T>
    where
        Self: Has<T>,
    {
        self.slot_mut().as_mut()
    }

    /// Builder: sets the `T` slot. Intended for construction before the
    /// entity is pushed into a store.
    #[must_use]
    fn with<T: Component>(mut self, value: T) -> Self
    where
        Self: Has<T>,
    {
        *self.slot_mut() = Some(value);
        self
    }
}

/// Compile-time membership: the model declares component type `T`.
///
/// Typed queries require `Model: Has<T>` for every filtered or projected
/// type, so naming an undeclared type fails to compile. A model that
/// declares the same type twice also fails to compile, through conflicting
/// implementations of this trait.
pub trait Has<T: Component>: EntityModel {
    fn slot(&self) -> &Option<T>;

    fn slot_mut(&mut self) -> &mut Option<T>;
}

/// Disjoint mutable borrows of one entity's present components, keyed by
/// component type.
///
/// Each slot can be taken once, which is what keeps two projected
/// references from aliasing the same value.
#[derive(Debug, Default)]
pub struct Slots<'a> {
    entries: Vec<(ComponentTypeId, Option<&'a mut dyn ComponentValue>)>,
}

impl<'a> Slots<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, value: &'a mut dyn ComponentValue) {
        let type_id = value.component_meta().type_id;
        self.entries.push((type_id, Some(value)));
    }

    /// Number of slots, taken or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes the component of the given type, if present and not yet taken.
    pub fn take(&mut self, type_id: ComponentTypeId) -> Option<&'a mut dyn ComponentValue> {
        self.entries
            .iter_mut()
            .find(|(id, _)| *id == type_id)?
            .1
            .take()
    }

    pub fn take_typed<T: Component>(&mut self) -> Option<&'a mut T> {
        self.take(T::component_type_id())?.downcast_mut::<T>()
    }
}

/// Declares an entity model.
///
/// Generates the record struct (one private `Option` slot per component),
/// a `new` constructor taking every component in declared order, and the
/// [`EntityModel`] and [`Has`] implementations.
#[macro_export]
macro_rules! entity_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        $vis struct $name {
            $( $field: ::core::option::Option<$ty>, )+
        }

        impl $name {
            /// Creates an entity holding every declared component.
            #[allow(clippy::too_many_arguments)]
            #[must_use]
            $vis fn new($( $field: $ty ),+) -> Self {
                Self {
                    $( $field: ::core::option::Option::Some($field), )+
                }
            }
        }

        impl $crate::EntityModel for $name {
            fn declared() -> ::std::vec::Vec<$crate::ComponentMeta> {
                ::std::vec![$( <$ty as $crate::Component>::meta(), )+]
            }

            fn contains(&self, type_id: $crate::ComponentTypeId) -> bool {
                $(
                    if type_id == <$ty as $crate::Component>::component_type_id() {
                        return self.$field.is_some();
                    }
                )+
                false
            }

            fn slots_mut(&mut self) -> $crate::Slots<'_> {
                let mut slots = $crate::Slots::new();
                $(
                    if let ::core::option::Option::Some(value) = self.$field.as_mut() {
                        slots.push(value);
                    }
                )+
                slots
            }
        }

        $(
            impl $crate::Has<$ty> for $name {
                fn slot(&self) -> &::core::option::Option<$ty> {
                    &self.$field
                }

                fn slot_mut(&mut self) -> &mut ::core::option::Option<$ty> {
                    &mut self.$field
                }
            }
        )+
    };
}
