//! Execution of name-bound queries.
//!
//! A [`BoundQuery`] is the resolved form of a
//! [`QueryDescriptor`](crate::QueryDescriptor): component ids instead of
//! names, validated against one entity model. Attached to a store it
//! becomes a [`DynamicQuery`], whose handler receives each match as a
//! [`Row`], an ordered argument list of type-erased component references.

use std::marker::PhantomData;
use std::ops::ControlFlow;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use ecs_component::{Component, ComponentMeta, ComponentValue, EntityModel, EntityStore};

use crate::filter::QueryFilter;
use crate::query::is_match;

/// A descriptor resolved against entity model `M`.
#[derive(Debug)]
pub struct BoundQuery<M: EntityModel> {
    data: Vec<ComponentMeta>,
    filters: Vec<QueryFilter>,
    _model: PhantomData<fn() -> M>,
}

impl<M: EntityModel> Clone for BoundQuery<M> {
    fn clone(&self) -> Self {
        Self::new(self.data.clone(), self.filters.clone())
    }
}

impl<M: EntityModel> BoundQuery<M> {
    pub(crate) fn new(data: Vec<ComponentMeta>, filters: Vec<QueryFilter>) -> Self {
        Self {
            data,
            filters,
            _model: PhantomData,
        }
    }

    #[must_use]
    pub fn data(&self) -> &[ComponentMeta] {
        &self.data
    }

    #[must_use]
    pub fn filters(&self) -> &[QueryFilter] {
        &self.filters
    }

    /// Runs one pass over `store` without keeping it attached.
    pub fn execute<'s, F>(&self, store: &'s mut EntityStore<M>, mut handler: F) -> usize
    where
        F: FnMut(Row<'s>),
    {
        run_pass(store, &self.data, &self.filters, |row| {
            handler(row);
            ControlFlow::Continue(())
        })
    }

    /// Attach the query to a store.
    #[must_use]
    pub fn attach(self, store: &mut EntityStore<M>) -> DynamicQuery<'_, M> {
        DynamicQuery { store, bound: self }
    }
}

/// A name-bound query attached to an entity store.
pub struct DynamicQuery<'s, M: EntityModel> {
    store: &'s mut EntityStore<M>,
    bound: BoundQuery<M>,
}

impl<M: EntityModel> DynamicQuery<'_, M> {
    #[must_use]
    pub fn bound(&self) -> &BoundQuery<M> {
        &self.bound
    }

    /// Number of entities the next pass would hand to the handler.
    #[must_use]
    pub fn count(&self) -> usize {
        self.store
            .iter()
            .filter(|(_, entity)| is_match(&self.bound.filters, &self.bound.data, *entity))
            .count()
    }

    /// Runs one pass in store order, calling `handler` with a [`Row`] per
    /// matching entity. Returns the number of handler calls.
    pub fn execute<'q, F>(&'q mut self, mut handler: F) -> usize
    where
        F: FnMut(Row<'q>),
    {
        self.execute_while(|row| {
            handler(row);
            ControlFlow::Continue(())
        })
    }

    /// Like [`DynamicQuery::execute`], stopping at the first
    /// [`ControlFlow::Break`].
    pub fn execute_while<'q, F>(&'q mut self, handler: F) -> usize
    where
        F: FnMut(Row<'q>) -> ControlFlow<()>,
    {
        run_pass(&mut *self.store, &self.bound.data, &self.bound.filters, handler)
    }
}

fn run_pass<'q, M, F>(
    store: &'q mut EntityStore<M>,
    data: &[ComponentMeta],
    filters: &[QueryFilter],
    mut handler: F,
) -> usize
where
    M: EntityModel,
    F: FnMut(Row<'q>) -> ControlFlow<()>,
{
    let mut visited = 0usize;
    let mut matched = 0usize;
    let mut stopped = false;

    for (entity, record) in store.iter_mut() {
        visited += 1;
        if !is_match(filters, data, record) {
            continue;
        }

        let mut slots = record.slots_mut();
        let Some(values) = data
            .iter()
            .map(|meta| slots.take(meta.type_id))
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };

        matched += 1;
        trace!(%entity, "entity matched");
        if handler(Row { values }).is_break() {
            stopped = true;
            break;
        }
    }

    debug!(visited, matched, stopped, "dynamic query pass finished");
    matched
}

/// The projected components of one entity, in data-descriptor order.
#[derive(Debug)]
pub struct Row<'a> {
    values: Vec<&'a mut dyn ComponentValue>,
}

impl Row<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, if it exists and is a `T`.
    #[must_use]
    pub fn get<T: Component>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    #[must_use]
    pub fn get_mut<T: Component>(&mut self, index: usize) -> Option<&mut T> {
        self.values.get_mut(index)?.downcast_mut::<T>()
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<&dyn ComponentValue> {
        self.values.get(index).map(|value| &**value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ComponentValue> {
        self.values.iter().map(|value| &**value)
    }

    /// Component names, in row order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.values.iter().map(|value| value.component_meta().name)
    }

    /// The row as a JSON object keyed by component name.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        let mut object = Map::new();
        for value in self.iter() {
            object.insert(value.component_meta().name.to_owned(), value.to_json()?);
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use ecs_component::EntityModel;

    use super::*;
    use crate::descriptor::QueryDescriptor;
    use crate::test_util::{Health, Mana, Position, Velocity, full_store, mixed_store};

    #[test]
    fn test_scenario_a_by_name() {
        let mut store = full_store();
        let mut lines = Vec::new();
        let matched = QueryDescriptor::new()
            .data(["Position", "Velocity"])
            .with("Position")
            .bind()
            .unwrap()
            .attach(&mut store)
            .execute(|row| {
                let pos = row.get::<Position>(0).unwrap();
                let vel = row.get::<Velocity>(1).unwrap();
                lines.push(format!(
                    "Position: {{{}, {}}}, Velocity: {{{}, {}}}",
                    pos.x, pos.y, vel.dx, vel.dy
                ));
            });

        assert_eq!(matched, 3);
        assert_eq!(
            lines,
            vec![
                "Position: {1, 2}, Velocity: {0.1, 0.2}",
                "Position: {3, 4}, Velocity: {0.3, 0.4}",
                "Position: {5, 6}, Velocity: {0.5, 0.6}",
            ]
        );
    }

    #[test]
    fn test_scenario_b_by_name() {
        let mut store = full_store();
        let mut query = QueryDescriptor::new()
            .data(["Position", "Velocity"])
            .without("Position")
            .bind()
            .unwrap()
            .attach(&mut store);
        assert_eq!(query.bound().data(), &[Position::meta(), Velocity::meta()]);
        assert_eq!(query.bound().filters(), &[QueryFilter::Without(Position::meta())]);
        assert_eq!(query.count(), 0);
        assert_eq!(query.execute(|_| panic!("no entity should match")), 0);
    }

    #[test]
    fn test_scenario_c_by_name() {
        let mut store = full_store();
        let mut hps = Vec::new();
        QueryDescriptor::new()
            .data(["Health"])
            .bind()
            .unwrap()
            .attach(&mut store)
            .execute(|row| {
                assert_eq!(row.len(), 1);
                hps.push(row.get::<Health>(0).unwrap().hp);
            });
        assert_eq!(hps, vec![100, 80, 60]);
    }

    #[test]
    fn test_row_order_follows_descriptor() {
        let mut store = full_store();
        let mut names = Vec::new();
        QueryDescriptor::new()
            .data(["Velocity", "Position"])
            .bind()
            .unwrap()
            .attach(&mut store)
            .execute_while(|row| {
                names.extend(row.names());
                assert!(row.get::<Position>(0).is_none());
                assert!(row.get::<Velocity>(0).is_some());
                ControlFlow::Break(())
            });
        assert_eq!(names, ["Velocity", "Position"]);
    }

    #[test]
    fn test_row_mutation_writes_through() {
        let mut store = full_store();
        QueryDescriptor::new()
            .data(["Health"])
            .bind()
            .unwrap()
            .attach(&mut store)
            .execute(|mut row| {
                if let Some(health) = row.get_mut::<Health>(0) {
                    health.hp /= 2;
                }
            });
        let hps: Vec<_> = store
            .iter()
            .filter_map(|(_, e)| e.get::<Health>().map(|h| h.hp))
            .collect();
        assert_eq!(hps, vec![50, 40, 30]);
    }

    #[test]
    fn test_row_to_json() {
        let mut store = mixed_store();
        let mut rows = Vec::new();
        QueryDescriptor::new()
            .data(["Health", "Npc"])
            .bind()
            .unwrap()
            .attach(&mut store)
            .execute(|row| rows.push(row.to_json().unwrap()));
        assert_eq!(
            rows,
            vec![
                serde_json::json!({ "Health": { "hp": 50 }, "Npc": null }),
                serde_json::json!({ "Health": { "hp": 30 }, "Npc": null }),
            ]
        );
    }

    #[test]
    fn test_row_rejects_wrong_type() {
        let mut store = full_store();
        let mut checked = 0;
        QueryDescriptor::new()
            .data(["Health"])
            .bind()
            .unwrap()
            .attach(&mut store)
            .execute(|row| {
                assert!(row.get::<Mana>(0).is_none());
                assert!(row.get::<Health>(1).is_none());
                assert_eq!(row.value(0).map(|v| v.component_meta()), Some(Health::meta()));
                checked += 1;
            });
        assert_eq!(checked, 3);
    }

    #[test]
    fn test_bound_execute_without_attaching() {
        let bound = QueryDescriptor::new().data(["Health"]).with("Npc").bind().unwrap();
        let mut store = mixed_store();
        let mut hps = Vec::new();
        let matched = bound.execute(&mut store, |row| hps.push(row.get::<Health>(0).unwrap().hp));
        assert_eq!(matched, 2);
        assert_eq!(hps, vec![50, 30]);
    }

    #[test]
    fn test_bound_query_is_reusable_across_stores() {
        let bound = QueryDescriptor::new()
            .data(["Position"])
            .without("Npc")
            .bind()
            .unwrap();

        let mut full = full_store();
        let mut mixed = mixed_store();
        assert_eq!(bound.clone().attach(&mut full).count(), 0);
        assert_eq!(bound.attach(&mut mixed).count(), 1);
    }
}
