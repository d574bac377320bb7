//! Command implementations

pub mod distance;
pub mod nearby;
pub mod normalize;
pub mod parse;
pub mod refine;

use seaway_core::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
