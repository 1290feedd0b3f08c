//! The typed query engine.
//!
//! A [`Query`] binds a data descriptor `D`, an ordered filter list and a
//! mutable borrow of an [`EntityStore`]. Each [`Query::execute`] call is a
//! single pass in insertion order: filter, project, call the handler, next
//! entity. Nothing is buffered and no cursor survives between passes.
//!
//! ```rust
//! use ecs_component::{entity_model, Component, EntityStore};
//! use ecs_query::QueryExt;
//! use serde::Serialize;
//!
//! #[derive(Debug, Serialize)]
//! struct Position { x: f32, y: f32 }
//! impl Component for Position { fn type_name() -> &'static str { "Position" } }
//!
//! #[derive(Debug, Serialize)]
//! struct Velocity { dx: f32, dy: f32 }
//! impl Component for Velocity { fn type_name() -> &'static str { "Velocity" } }
//!
//! entity_model! {
//!     struct Body { position: Position, velocity: Velocity }
//! }
//!
//! let mut store = EntityStore::new();
//! store.push(Body::new(Position { x: 1.0, y: 2.0 }, Velocity { dx: 0.5, dy: 0.0 }));
//!
//! let mut query = store
//!     .query::<(&mut Position, &Velocity)>()
//!     .unwrap()
//!     .with::<Position>();
//! let matched = query.execute(|(pos, vel)| {
//!     pos.x += vel.dx;
//!     pos.y += vel.dy;
//! });
//! assert_eq!(matched, 1);
//! ```

use std::marker::PhantomData;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use ecs_component::{Component, ComponentMeta, EntityModel, EntityStore, Has};

use crate::descriptor::QueryDescriptor;
use crate::dynamic::DynamicQuery;
use crate::error::{BindError, ensure_distinct, ensure_unique_names};
use crate::fetch::{Fetch, data_components};
use crate::filter::{QueryFilter, matches_filters};

/// A query over an entity store, bound to data descriptor `D`.
pub struct Query<'s, M: EntityModel, D: Fetch<M>> {
    store: &'s mut EntityStore<M>,
    data: Vec<ComponentMeta>,
    filters: Vec<QueryFilter>,
    _data: PhantomData<fn() -> D>,
}

impl<'s, M: EntityModel, D: Fetch<M>> Query<'s, M, D> {
    /// Binds `D` to `store` with an empty filter list.
    ///
    /// Fails if the model declares two components under one name, or if
    /// `D` names one component twice.
    pub fn bind(store: &'s mut EntityStore<M>) -> Result<Self, BindError> {
        ensure_unique_names::<M>()?;
        let data = data_components::<M, D>();
        ensure_distinct(&data)?;
        debug!(data = data.len(), entities = store.len(), "query bound");
        Ok(Self {
            store,
            data,
            filters: Vec::new(),
            _data: PhantomData,
        })
    }

    /// Appends a `With<T>` filter.
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self
    where
        M: Has<T>,
    {
        self.filters.push(QueryFilter::with::<M, T>());
        self
    }

    /// Appends a `Without<T>` filter.
    #[must_use]
    pub fn without<T: Component>(mut self) -> Self
    where
        M: Has<T>,
    {
        self.filters.push(QueryFilter::without::<M, T>());
        self
    }

    /// The projected component types, in projection order.
    #[must_use]
    pub fn data(&self) -> &[ComponentMeta] {
        &self.data
    }

    #[must_use]
    pub fn filters(&self) -> &[QueryFilter] {
        &self.filters
    }

    /// Number of entities the next pass would hand to the handler.
    #[must_use]
    pub fn count(&self) -> usize {
        self.store
            .iter()
            .filter(|(_, entity)| is_match(&self.filters, &self.data, *entity))
            .count()
    }

    /// Runs one pass, calling `handler` once per matching entity in store
    /// order. Returns the number of handler calls.
    ///
    /// Projected references borrow the query, so the store cannot be
    /// structurally changed while any of them is alive.
    pub fn execute<'q, F>(&'q mut self, mut handler: F) -> usize
    where
        F: FnMut(D::Item<'q>),
    {
        self.execute_while(|item| {
            handler(item);
            ControlFlow::Continue(())
        })
    }

    /// Like [`Query::execute`], but stops after the first handler call that
    /// returns [`ControlFlow::Break`].
    pub fn execute_while<'q, F>(&'q mut self, mut handler: F) -> usize
    where
        F: FnMut(D::Item<'q>) -> ControlFlow<()>,
    {
        let Self {
            store,
            data,
            filters,
            ..
        } = self;

        let mut visited = 0usize;
        let mut matched = 0usize;
        let mut stopped = false;

        for (entity, record) in store.iter_mut() {
            visited += 1;
            if !is_match(filters, data, record) {
                continue;
            }

            let mut slots = record.slots_mut();
            let Some(item) = D::fetch(&mut slots) else {
                continue;
            };

            matched += 1;
            trace!(%entity, "entity matched");
            if handler(item).is_break() {
                stopped = true;
                break;
            }
        }

        debug!(visited, matched, stopped, "query pass finished");
        matched
    }
}

/// Filters first, in order; then the implicit presence of every projected
/// component.
pub(crate) fn is_match<M: EntityModel>(
    filters: &[QueryFilter],
    data: &[ComponentMeta],
    entity: &M,
) -> bool {
    matches_filters(filters, entity) && data.iter().all(|meta| entity.contains(meta.type_id))
}

/// Query constructors on [`EntityStore`].
pub trait QueryExt<M: EntityModel> {
    /// Binds a typed query over this store; see [`Query::bind`].
    fn query<D: Fetch<M>>(&mut self) -> Result<Query<'_, M, D>, BindError>;

    /// Binds a query declared by component names.
    fn query_dynamic(
        &mut self,
        descriptor: &QueryDescriptor,
    ) -> Result<DynamicQuery<'_, M>, BindError>;
}

impl<M: EntityModel> QueryExt<M> for EntityStore<M> {
    fn query<D: Fetch<M>>(&mut self) -> Result<Query<'_, M, D>, BindError> {
        Query::bind(self)
    }

    fn query_dynamic(
        &mut self,
        descriptor: &QueryDescriptor,
    ) -> Result<DynamicQuery<'_, M>, BindError> {
        Ok(descriptor.bind::<M>()?.attach(self))
    }
}
