//! Distance command - great-circle distance and initial bearing

use super::print_json;
use seaway_cli::{format_bearing, format_distance_km, format_point};
use seaway_core::Result;
use seaway_geo::{distance, initial_bearing, GeoPoint};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DistanceOutput {
    from: GeoPoint,
    to: GeoPoint,
    distance_km: f64,
    initial_bearing: f64,
}

/// Run distance command
pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64, json: bool) -> Result<()> {
    let from = GeoPoint::try_new(lat1, lon1)?;
    let to = GeoPoint::try_new(lat2, lon2)?;

    let output = DistanceOutput {
        from,
        to,
        distance_km: distance(&from, &to),
        initial_bearing: initial_bearing(&from, &to),
    };

    if json {
        return print_json(&output);
    }

    println!("From:     {}", format_point(&output.from));
    println!("To:       {}", format_point(&output.to));
    println!("Distance: {}", format_distance_km(output.distance_km));
    println!("Bearing:  {}", format_bearing(output.initial_bearing));

    Ok(())
}
