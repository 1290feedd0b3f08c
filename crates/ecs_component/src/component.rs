//! Core [`Component`] trait, component identity and type-erased access.
//!
//! Every value an entity carries implements [`Component`]. Components are
//! told apart by their [`ComponentTypeId`], which is derived from the
//! component's **string name** using the FNV-1a 64-bit hash. Name-based
//! identity is what lets a query be declared by component names (for
//! example in a JSON file) and resolved against the entity model later.

use std::any::Any;
use std::fmt;

use serde::Serialize;

/// A unique identifier for a component type, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component's string name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Static description of a component type: its id and its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ComponentMeta {
    /// The unique type identifier.
    pub type_id: ComponentTypeId,
    /// The human-readable name of the component (e.g. `"Position"`).
    pub name: &'static str,
}

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use ecs_component::Component;
///
/// #[derive(Debug, Serialize)]
/// struct Health {
///     hp: i32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: fmt::Debug + Send + Sync + 'static + Serialize {
    /// A human-readable name for this component type.
    ///
    /// Names must be unique within one entity model.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }

    /// Returns the [`ComponentMeta`] descriptor for this component type.
    fn meta() -> ComponentMeta {
        ComponentMeta {
            type_id: Self::component_type_id(),
            name: Self::type_name(),
        }
    }
}

/// Object-safe view of a component value.
///
/// Blanket-implemented for every [`Component`]; lets the name-based query
/// path hand out component references without knowing their types.
pub trait ComponentValue: Any + fmt::Debug + Send + Sync {
    /// The [`ComponentMeta`] of the concrete component type.
    fn component_meta(&self) -> ComponentMeta;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Serialise the value to a JSON tree.
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

impl<T: Component> ComponentValue for T {
    fn component_meta(&self) -> ComponentMeta {
        T::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl dyn ComponentValue + '_ {
    /// Returns `true` if the value is a `T`.
    #[must_use]
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[must_use]
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, PartialEq)]
    struct Health {
        hp: i32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Serialize)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[test]
    fn test_component_type_id_matches_from_name() {
        assert_eq!(Health::component_type_id(), ComponentTypeId::from_name("Health"));
        assert_eq!(ComponentTypeId::of::<Health>(), Health::component_type_id());
    }

    #[test]
    fn test_component_type_id_differs_between_types() {
        assert_ne!(Health::component_type_id(), Velocity::component_type_id());
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of empty string is the offset basis itself.
        assert_eq!(
            ComponentTypeId::from_name(""),
            ComponentTypeId(0xcbf2_9ce4_8422_2325)
        );
        // FNV-1a 64-bit of "a".
        assert_eq!(
            ComponentTypeId::from_name("a"),
            ComponentTypeId(0xaf63_dc4c_8601_ec8c)
        );
    }

    #[test]
    fn test_component_meta() {
        let meta = Health::meta();
        assert_eq!(meta.name, "Health");
        assert_eq!(meta.type_id, Health::component_type_id());
    }

    #[test]
    fn test_erased_downcast() {
        let mut health = Health { hp: 100 };
        let value: &mut dyn ComponentValue = &mut health;

        assert!(value.is::<Health>());
        assert!(value.downcast_ref::<Velocity>().is_none());
        assert_eq!(value.component_meta().name, "Health");

        value.downcast_mut::<Health>().unwrap().hp = 40;
        assert_eq!(health, Health { hp: 40 });
    }

    #[test]
    fn test_erased_to_json() {
        let health = Health { hp: 80 };
        let value: &dyn ComponentValue = &health;
        assert_eq!(value.to_json().unwrap(), serde_json::json!({ "hp": 80 }));
    }
}
