//! Rendering of query matches.

use ecs_component::ComponentValue;
use ecs_query::Row;

use crate::components::{Health, Npc, Position, Velocity};
use crate::config::OutputFormat;

/// One output line for a matched entity.
pub fn render(row: &Row<'_>, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(row)),
        OutputFormat::Json => Ok(row.to_json()?.to_string()),
    }
}

/// `Position: {1, 2}, Velocity: {0.1, 0.2}`
fn render_text(row: &Row<'_>) -> String {
    row.iter()
        .map(|value| format!("{}: {}", value.component_meta().name, display(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn display(value: &dyn ComponentValue) -> String {
    if let Some(position) = value.downcast_ref::<Position>() {
        position.to_string()
    } else if let Some(velocity) = value.downcast_ref::<Velocity>() {
        velocity.to_string()
    } else if let Some(health) = value.downcast_ref::<Health>() {
        health.to_string()
    } else if let Some(npc) = value.downcast_ref::<Npc>() {
        npc.to_string()
    } else {
        format!("{value:?}")
    }
}
