//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`. Grammar and fetch failures
/// must be constructed explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// YAML could not be loaded or dumped.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// JSON could not be loaded or dumped.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// The RAML structure was rejected by the grammar parser.
    #[from(ignore)]
    #[display("RAML Parse Error: {_0}")]
    Parse(String),

    /// An `!include` target could not be retrieved.
    #[from(ignore)]
    #[display("Fetch Error: {_0}")]
    Fetch(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
