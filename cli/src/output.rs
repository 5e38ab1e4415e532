#![deny(missing_docs)]

//! # Output
//!
//! Shared input/output handling for the commands.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::Path;

/// Reads an input file, naming it in the error.
pub fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if !path.exists() {
        return Err(CliError::General(format!("Input file not found: {:?}", path)));
    }
    Ok(fs::read(path)?)
}

/// Writes `text` to `path`, creating parent directories, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> CliResult<()> {
    let Some(path) = path else {
        print!("{}", text);
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    log::info!("wrote {:?}", path);
    Ok(())
}
