//! Normalize command - batch coordinate normalization

use super::print_json;
use crate::input::read_json;
use seaway_cli::{format_count, format_point, progress, Status};
use seaway_core::{config::Config, Result};
use seaway_geo::{CoordinateToken, LenientBatch, NamedCoordinate};
use seaway_telemetry::Timer;
use std::path::Path;

/// Run normalize command
pub fn run(file: Option<&Path>, config: &Config, json: bool) -> Result<()> {
    let tokens: Vec<CoordinateToken> = read_json(file)?;
    if tokens.is_empty() && !json {
        Status::info("No coordinate candidates in input");
        return Ok(());
    }
    let normalizer = config.normalizer();

    let _timer = Timer::start("normalize");
    let batch = if config.schema.coordinates.strict {
        let parsed = normalizer.normalize_strict(&tokens)?;
        LenientBatch {
            successes: tokens
                .iter()
                .zip(parsed)
                .map(|(token, coordinate)| NamedCoordinate {
                    name: token.feature.clone(),
                    coordinate,
                })
                .collect(),
            failures: Vec::new(),
        }
    } else {
        let pb = (!json).then(|| progress::spinner("Normalizing coordinates..."));
        let batch = normalizer.normalize_lenient(&tokens);
        if let Some(pb) = pb {
            progress::finish_success(&pb, "Normalized");
        }
        batch
    };

    if json {
        return print_json(&batch);
    }

    Status::header(&format!("{} coordinates", normalizer.notation()));
    for named in &batch.successes {
        println!(
            "  {:<32} {}",
            named.name.as_deref().unwrap_or("-"),
            format_point(&named.point())
        );
    }
    println!();

    for failure in &batch.failures {
        Status::warning(&failure.error.to_string());
    }

    let summary = format!(
        "{} normalized",
        format_count(batch.successes.len(), "coordinate", "coordinates")
    );
    if batch.is_clean() {
        Status::success(&summary);
    } else {
        Status::warning(&format!("{summary}, {} skipped", batch.failures.len()));
    }

    Ok(())
}
