//! Command-line configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ecs_query::QueryDescriptor;

#[derive(Debug, Parser)]
#[command(name = "ecs_demo", about = "Query a set of sample entities")]
pub struct Args {
    /// Components to project, in handler order
    #[arg(long, value_delimiter = ',', default_value = "Position,Velocity")]
    pub data: Vec<String>,

    /// Only match entities holding this component (repeatable)
    #[arg(long = "with", value_name = "NAME")]
    pub with: Vec<String>,

    /// Only match entities lacking this component (repeatable)
    #[arg(long = "without", value_name = "NAME")]
    pub without: Vec<String>,

    /// JSON query descriptor; replaces --data, --with and --without
    #[arg(long, value_name = "FILE")]
    pub query: Option<PathBuf>,

    /// How each match is printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `Name: {..}` pairs joined by commas
    Text,
    /// One JSON object per line
    Json,
}

impl Args {
    /// The query to run. `With` filters precede `Without` filters when
    /// built from flags.
    pub fn descriptor(&self) -> Result<QueryDescriptor> {
        if let Some(path) = &self.query {
            return load_descriptor(path);
        }

        let descriptor = self
            .with
            .iter()
            .fold(QueryDescriptor::new().data(&self.data), |d, name| {
                d.with(name.as_str())
            });
        Ok(self
            .without
            .iter()
            .fold(descriptor, |d, name| d.without(name.as_str())))
    }
}

fn load_descriptor(path: &Path) -> Result<QueryDescriptor> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading query file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing query file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use ecs_query::FilterDescriptor;

    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ecs_demo"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        let descriptor = args.descriptor().unwrap();
        assert_eq!(descriptor.data, vec!["Position", "Velocity"]);
        assert!(descriptor.filters.is_empty());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "ecs_demo",
            "--data",
            "Health,Position",
            "--without",
            "Npc",
            "--with",
            "Position",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        let descriptor = args.descriptor().unwrap();
        assert_eq!(descriptor.data, vec!["Health", "Position"]);
        assert_eq!(
            descriptor.filters,
            vec![
                FilterDescriptor::With("Position".into()),
                FilterDescriptor::Without("Npc".into()),
            ]
        );
    }

    #[test]
    fn test_query_file() {
        let path = std::env::temp_dir().join(format!("ecs_demo_query_{}.json", std::process::id()));
        fs::write(&path, r#"{ "data": ["Health"], "filters": [{ "with": "Npc" }] }"#).unwrap();

        let args = Args::try_parse_from(["ecs_demo", "--query", path.to_str().unwrap()]).unwrap();
        let descriptor = args.descriptor().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(descriptor, QueryDescriptor::new().data(["Health"]).with("Npc"));
    }

    #[test]
    fn test_missing_query_file() {
        let args = Args::try_parse_from(["ecs_demo", "--query", "/nonexistent/query.json"]).unwrap();
        let err = args.descriptor().unwrap_err();
        assert!(err.to_string().contains("reading query file"));
    }
}
