//! Nearby command - charted features around a position

use super::print_json;
use crate::input::read_json;
use seaway_cli::{format_count, format_distance_km, format_point, Status};
use seaway_core::{config::Config, Error, ErrorCode, Result};
use seaway_geo::batch::{features_within_radius, normalize_sections, IndexedFeature, SectionCandidates};
use seaway_geo::GeoPoint;
use seaway_telemetry::Timer;
use std::path::Path;

/// Run nearby command
///
/// Input is a JSON array of `{"section_id", "candidates"}` objects. Candidates
/// are normalized leniently with the configured notation.
pub fn run(lat: f64, lon: f64, file: Option<&Path>, config: &Config, json: bool) -> Result<()> {
    let center = GeoPoint::try_new(lat, lon)?;
    let radius_km = config.schema.search.radius_km;
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(Error::new(
            ErrorCode::InvalidInput,
            format!("Search radius must be a positive number of kilometers, got {radius_km}"),
        ));
    }

    let sections: Vec<SectionCandidates> = read_json(file)?;

    let timer = Timer::start("nearby");
    let features: Vec<IndexedFeature> = normalize_sections(&config.normalizer(), &sections)
        .into_iter()
        .flat_map(|section| section.features)
        .collect();
    let nearby = features_within_radius(&center, &features, radius_km);
    timer.stop();

    tracing::info!(
        sections = sections.len(),
        features = features.len(),
        matches = nearby.len(),
        radius_km,
        "Searched features"
    );

    if json {
        return print_json(&nearby);
    }

    Status::header(&format!(
        "Within {} of {}",
        format_distance_km(radius_km),
        format_point(&center)
    ));
    for result in &nearby {
        println!(
            "  {:<32} {:>10}  {}",
            result.feature.name,
            format_distance_km(result.distance),
            format_point(&result.feature.location)
        );
    }
    println!();
    Status::info(&format_count(nearby.len(), "feature", "features"));

    Ok(())
}
