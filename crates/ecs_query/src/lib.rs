//! # ecs_query
//!
//! Queries over an [`EntityStore`](ecs_component::EntityStore): a data
//! descriptor naming the components to project, an ordered list of
//! `With`/`Without` presence filters, and a handler called once per
//! matching entity in store order.
//!
//! Two front ends share one matching rule:
//!
//! - [`Query`]: typed. The data descriptor is a type such as
//!   `(&mut Position, &Velocity)` and the handler receives typed references.
//! - [`DynamicQuery`]: declared by component names through a
//!   [`QueryDescriptor`], resolved at bind time, handing each match to the
//!   handler as a [`Row`].
//!
//! Both reject malformed queries with a [`BindError`] before any entity is
//! visited.

pub mod descriptor;
pub mod dynamic;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod query;

#[cfg(test)]
mod test_util;

pub use descriptor::{FilterDescriptor, QueryDescriptor};
pub use dynamic::{BoundQuery, DynamicQuery, Row};
pub use error::{BindError, DescriptorKind};
pub use fetch::Fetch;
pub use filter::{QueryFilter, matches_filters};
pub use query::{Query, QueryExt};
