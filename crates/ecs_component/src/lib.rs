//! # ecs_component
//!
//! The data side of the query engine: what a component is, how an entity
//! record holds its components, and where entities live.
//!
//! This crate provides:
//!
//! - [`Component`] trait and [`ComponentTypeId`]: name-derived component identity.
//! - [`ComponentValue`]: type-erased access to a component value.
//! - [`EntityModel`] and [`Has`]: the declared component set of an entity
//!   record, generated by [`entity_model!`].
//! - [`Entity`] and [`EntityStore`]: handles and ordered entity storage.

pub mod component;
pub mod entity;
pub mod model;
pub mod store;

pub use component::{Component, ComponentMeta, ComponentTypeId, ComponentValue};
pub use entity::{Entity, EntityAllocator};
pub use model::{EntityModel, Has, Slots};
pub use store::EntityStore;
