//! Parse command - strict single coordinate

use super::print_json;
use seaway_cli::format_point;
use seaway_core::{config::Config, Result};

/// Run parse command
pub fn run(coord: &str, config: &Config, json: bool) -> Result<()> {
    let parsed = config.normalizer().parse(coord)?;

    if json {
        return print_json(&parsed);
    }

    println!("{}", format_point(&parsed.point));
    Ok(())
}
