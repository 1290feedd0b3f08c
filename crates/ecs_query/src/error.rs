//! Query binding errors.

use std::fmt;

use ecs_component::{ComponentMeta, EntityModel};

/// Which part of a query a component name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// The data descriptor: components projected to the handler.
    Data,
    /// The filter list.
    Filter,
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorKind::Data => f.write_str("data"),
            DescriptorKind::Filter => f.write_str("filter"),
        }
    }
}

/// Errors raised while binding a query, before any entity is visited.
///
/// A bound query cannot fail during execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// A descriptor names a component the entity model does not declare.
    #[error("unknown component '{name}' in {origin} descriptor")]
    UnknownComponent {
        name: String,
        origin: DescriptorKind,
    },

    /// The data descriptor requests the same component twice.
    #[error("component '{name}' requested more than once in data descriptor")]
    DuplicateData { name: String },

    /// The entity model declares two component types under one name, so
    /// their ids collide.
    #[error("entity model declares more than one component named '{name}'")]
    DuplicateComponentName { name: String },

    /// The data descriptor requests nothing.
    #[error("data descriptor is empty")]
    EmptyData,
}

/// Rejects a model whose component names collide.
pub(crate) fn ensure_unique_names<M: EntityModel>() -> Result<(), BindError> {
    match M::name_collision() {
        Some(meta) => Err(BindError::DuplicateComponentName {
            name: meta.name.to_owned(),
        }),
        None => Ok(()),
    }
}

/// Rejects a data descriptor naming one component twice; two projected
/// references to one value would alias.
pub(crate) fn ensure_distinct(data: &[ComponentMeta]) -> Result<(), BindError> {
    for (i, meta) in data.iter().enumerate() {
        if data[i + 1..].iter().any(|other| other.type_id == meta.type_id) {
            return Err(BindError::DuplicateData {
                name: meta.name.to_owned(),
            });
        }
    }
    Ok(())
}
