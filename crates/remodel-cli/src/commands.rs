use std::fs;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use remodel_cli::demo;
use remodel_cli::records::remodel_document;
use remodel_core::RemodelConfig;
use serde_json::Value;
use tracing::info;

use crate::cli::{ApplyArgs, DemoArgs};

pub fn run_apply(args: &ApplyArgs) -> Result<()> {
    let config = RemodelConfig::from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    let registry = config.build();
    info!(config = %args.config.display(), rules = registry.len(), "loaded remodel config");

    let contents = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input from {}", args.input.display()))?;
    let document: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse input from {}", args.input.display()))?;

    let output = remodel_document(&registry, document)
        .with_context(|| format!("Failed to remodel {}", args.input.display()))?;
    let rendered = if args.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(output = %path.display(), "wrote remodeled records");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

pub fn run_demo(args: &DemoArgs) -> Result<()> {
    let when = match &args.when {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --when timestamp: {raw}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let output = demo::run(when)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
