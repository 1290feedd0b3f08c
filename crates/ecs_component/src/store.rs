//! Entity storage.
//!
//! The [`EntityStore`] owns every entity record of one [`EntityModel`], in
//! insertion order. Queries borrow the store for the duration of a pass and
//! never own entities themselves.

use tracing::trace;

use crate::entity::{Entity, EntityAllocator};
use crate::model::EntityModel;

/// An ordered, append-only collection of entities.
#[derive(Debug)]
pub struct EntityStore<M: EntityModel> {
    allocator: EntityAllocator,
    /// `entities[i]` holds the entity with handle `i + 1`.
    entities: Vec<(Entity, M)>,
}

impl<M: EntityModel> EntityStore<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: Vec::new(),
        }
    }

    /// Appends an entity and returns its handle.
    pub fn push(&mut self, record: M) -> Entity {
        let entity = self.allocator.allocate();
        trace!(%entity, components = record.components().len(), "entity stored");
        self.entities.push((entity, record));
        entity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&M> {
        self.entities
            .get(entity.index()?)
            .filter(|(e, _)| *e == entity)
            .map(|(_, record)| record)
    }

    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut M> {
        self.entities
            .get_mut(entity.index()?)
            .filter(|(e, _)| *e == entity)
            .map(|(_, record)| record)
    }

    /// Iterates entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &M)> {
        self.entities.iter().map(|(entity, record)| (*entity, record))
    }

    /// Iterates entities mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut M)> {
        self.entities
            .iter_mut()
            .map(|(entity, record)| (*entity, record))
    }
}

impl<M: EntityModel> Default for EntityStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityModel> Extend<M> for EntityStore<M> {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl<M: EntityModel> FromIterator<M> for EntityStore<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
