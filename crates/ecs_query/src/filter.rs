//! Presence filters.
//!
//! A query carries an ordered list of [`QueryFilter`]s. An entity passes
//! when every filter holds; evaluation stops at the first failing filter
//! and an empty list passes every entity.

use serde::Serialize;

use ecs_component::{Component, ComponentMeta, EntityModel, Has};

/// A presence test on one component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryFilter {
    /// Only match entities that have this component.
    With(ComponentMeta),
    /// Only match entities that do NOT have this component.
    Without(ComponentMeta),
}

impl QueryFilter {
    /// `With<T>` for a component declared by model `M`.
    #[must_use]
    pub fn with<M, T>() -> Self
    where
        M: Has<T>,
        T: Component,
    {
        QueryFilter::With(T::meta())
    }

    /// `Without<T>` for a component declared by model `M`.
    #[must_use]
    pub fn without<M, T>() -> Self
    where
        M: Has<T>,
        T: Component,
    {
        QueryFilter::Without(T::meta())
    }

    /// The component this filter tests.
    #[must_use]
    pub fn component(&self) -> ComponentMeta {
        match self {
            QueryFilter::With(meta) | QueryFilter::Without(meta) => *meta,
        }
    }

    /// Evaluate the filter against one entity.
    #[must_use]
    pub fn matches<M: EntityModel>(&self, entity: &M) -> bool {
        match self {
            QueryFilter::With(meta) => entity.contains(meta.type_id),
            QueryFilter::Without(meta) => !entity.contains(meta.type_id),
        }
    }
}

/// Conjunction of `filters`, short-circuiting on the first miss.
#[must_use]
pub fn matches_filters<M: EntityModel>(filters: &[QueryFilter], entity: &M) -> bool {
    filters.iter().all(|filter| filter.matches(entity))
}
