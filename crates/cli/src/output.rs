//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use seaway_geo::GeoPoint;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a distance for display, switching to meters below one kilometer
pub fn format_distance_km(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else if km < 100.0 {
        format!("{:.2} km", km)
    } else {
        format!("{:.1} km", km)
    }
}

/// Format a bearing in compass degrees
pub fn format_bearing(degrees: f64) -> String {
    format!("{:05.1}°", degrees)
}

/// Format a position with hemisphere letters, six decimals
pub fn format_point(point: &GeoPoint) -> String {
    let ns = if point.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if point.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.6}°{} {:.6}°{}",
        point.latitude.abs(),
        ns,
        point.longitude.abs(),
        ew
    )
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
