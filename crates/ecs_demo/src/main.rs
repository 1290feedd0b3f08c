//! # ecs_demo
//!
//! Builds three sample npcs, runs one query over them and prints a line per
//! match. With no arguments it runs `{Position, Velocity}`:
//!
//! ```text
//! Position: {1, 2}, Velocity: {0.1, 0.2}
//! Position: {3, 4}, Velocity: {0.3, 0.4}
//! Position: {5, 6}, Velocity: {0.5, 0.6}
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=ecs_query=trace` to follow a pass.

mod components;
mod config;
mod output;

use std::ops::ControlFlow;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecs_query::QueryExt;

use config::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ecs_demo=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let descriptor = args.descriptor()?;
    info!(data = ?descriptor.data, filters = descriptor.filters.len(), "running query");

    let mut store = components::sample_store();
    let mut failure = None;
    let matched = store
        .query_dynamic(&descriptor)?
        .execute_while(|row| match output::render(&row, args.format) {
            Ok(line) => {
                println!("{line}");
                ControlFlow::Continue(())
            }
            Err(err) => {
                failure = Some(err);
                ControlFlow::Break(())
            }
        });

    if let Some(err) = failure {
        return Err(err.into());
    }

    info!(matched, entities = store.len(), "query finished");
    Ok(())
}
