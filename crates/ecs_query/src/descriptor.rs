//! Declarative query descriptors.
//!
//! A [`QueryDescriptor`] names the components a caller wants projected and
//! the presence filters to apply, by component name. It can be built in
//! code or loaded from JSON:
//!
//! ```json
//! {
//!   "data": ["Position", "Velocity"],
//!   "filters": [{ "with": "Position" }, { "without": "Npc" }]
//! }
//! ```
//!
//! Names are resolved against an entity model by [`QueryDescriptor::bind`],
//! which rejects anything the model does not declare before a single
//! entity is visited.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ecs_component::{ComponentMeta, EntityModel};

use crate::dynamic::BoundQuery;
use crate::error::{BindError, DescriptorKind, ensure_distinct, ensure_unique_names};
use crate::filter::QueryFilter;

/// A query declared by component names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Components handed to the handler, in this order.
    pub data: Vec<String>,
    /// Presence filters, evaluated in this order.
    #[serde(default)]
    pub filters: Vec<FilterDescriptor>,
}

/// A presence filter declared by component name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDescriptor {
    With(String),
    Without(String),
}

impl QueryDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the data descriptor.
    #[must_use]
    pub fn data(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.data = names.into_iter().map(Into::into).collect();
        self
    }

    /// Append one component to the data descriptor.
    #[must_use]
    pub fn read(mut self, name: impl Into<String>) -> Self {
        self.data.push(name.into());
        self
    }

    /// Append a `With` filter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.filters.push(FilterDescriptor::With(name.into()));
        self
    }

    /// Append a `Without` filter.
    #[must_use]
    pub fn without(mut self, name: impl Into<String>) -> Self {
        self.filters.push(FilterDescriptor::Without(name.into()));
        self
    }

    /// Resolve every name against model `M`.
    ///
    /// The model's component names are checked first, then the data
    /// descriptor, then the filters in order; the first problem is reported.
    pub fn bind<M: EntityModel>(&self) -> Result<BoundQuery<M>, BindError> {
        ensure_unique_names::<M>()?;
        if self.data.is_empty() {
            return Err(BindError::EmptyData);
        }

        let declared = M::declared();
        let resolve = |name: &str, origin: DescriptorKind| {
            declared
                .iter()
                .find(|meta| meta.name == name)
                .copied()
                .ok_or_else(|| BindError::UnknownComponent {
                    name: name.to_owned(),
                    origin,
                })
        };

        let data = self
            .data
            .iter()
            .map(|name| resolve(name.as_str(), DescriptorKind::Data))
            .collect::<Result<Vec<ComponentMeta>, _>>()?;
        ensure_distinct(&data)?;

        let filters = self
            .filters
            .iter()
            .map(|filter| match filter {
                FilterDescriptor::With(name) => {
                    resolve(name.as_str(), DescriptorKind::Filter).map(QueryFilter::With)
                }
                FilterDescriptor::Without(name) => {
                    resolve(name.as_str(), DescriptorKind::Filter).map(QueryFilter::Without)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(data = ?self.data, filters = filters.len(), "descriptor bound");
        Ok(BoundQuery::new(data, filters))
    }
}
