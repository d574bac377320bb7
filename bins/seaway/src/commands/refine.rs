//! Refine command - densify a passage

use super::print_json;
use crate::input::read_json;
use seaway_cli::{format_count, format_distance_km, format_point, Status};
use seaway_core::{config::Config, Result};
use seaway_geo::GeoPoint;
use seaway_telemetry::Timer;
use std::path::Path;

/// Run refine command
pub fn run(file: Option<&Path>, config: &Config, json: bool) -> Result<()> {
    let refiner = config.refiner()?;

    let pairs: Vec<[f64; 2]> = read_json(file)?;
    let waypoints = pairs
        .into_iter()
        .map(|[lat, lon]| GeoPoint::try_new(lat, lon))
        .collect::<seaway_geo::Result<Vec<_>>>()?;

    let timer = Timer::start("refine");
    let refined = refiner.refine(&waypoints);
    timer.stop();

    tracing::info!(
        waypoints = waypoints.len(),
        points = refined.len(),
        spacing_km = refiner.spacing_km(),
        "Refined passage"
    );

    if json {
        return print_json(&refined);
    }

    Status::header("Refined passage");
    for (i, point) in refined.points().iter().enumerate() {
        println!("  {:>4}  {}", i + 1, format_point(point));
    }
    println!();
    Status::success(&format!(
        "{} over {}",
        format_count(refined.len(), "point", "points"),
        format_distance_km(refined.length_km())
    ));

    Ok(())
}
