// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use anyhow::{bail, Context, Result};
use mekong_knn::backends::earth_engine::EarthEngineSession;
use mekong_knn::config::consts::DEFAULT_EXPORT_REGION;
use mekong_knn::config::load_and_validate_config;
use mekong_knn::engine::ImageRunner;
use mekong_knn::observability::init_tracing;
use mekong_knn::platform::Geometry;
use mekong_knn::traits::Session;

/// Parse `xmin,ymin,xmax,ymax`.
fn parse_region(arg: &str) -> Result<[f64; 4]> {
    let values = arg
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid region '{}'", arg))?;

    match <[f64; 4]>::try_from(values) {
        Ok(bounds) => Ok(bounds),
        Err(values) => bail!(
            "Region needs 4 values (xmin,ymin,xmax,ymax), got {}",
            values.len()
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <config.yaml|json|toml> [xmin,ymin,xmax,ymax]", args[0]);
        eprintln!("Example: {} configs/training.yaml", args[0]);
        eprintln!(
            "Example: {} configs/training.yaml 104.528,12.235,104.554,12.262",
            args[0]
        );
        std::process::exit(1);
    }

    let config = load_and_validate_config(&args[1])
        .with_context(|| format!("Failed to load config '{}'", args[1]))?;
    let bounds = match args.get(2) {
        Some(arg) => parse_region(arg)?,
        None => DEFAULT_EXPORT_REGION,
    };
    let region = Geometry::rectangle(bounds);

    let session = EarthEngineSession::connect(&config.platform)?;
    let runner = ImageRunner::new(&config, &session)?;
    let result = runner.export_models(&region).await;
    session.close().await?;

    let task_ids = result?;
    tracing::info!(
        session = session.name(),
        exports = task_ids.len(),
        "Submitted {} export job(s)",
        task_ids.len()
    );
    Ok(())
}
