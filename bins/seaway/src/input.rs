//! Reading command input from a file or stdin

use seaway_core::{Error, Result, ResultExt};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

fn is_stdin(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Read all input text
pub fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if !is_stdin(Some(p)) => {
            if !p.exists() {
                return Err(Error::file_not_found(p));
            }
            Ok(std::fs::read_to_string(p)?)
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Read and deserialize JSON input
pub fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let text = read_text(path)?;
    let source = match path {
        Some(p) if !is_stdin(Some(p)) => p.display().to_string(),
        _ => "stdin".to_string(),
    };

    serde_json::from_str(&text).context(format!("Reading {source}"))
}
