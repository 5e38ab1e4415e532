#![deny(missing_docs)]

//! # Decode Command
//!
//! RAML file -> document JSON.

use crate::error::{CliError, CliResult};
use crate::output::{read_input, write_output};
use raml_codec::{Codec, CodecOptions, Fetcher, RamlCodec};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Arguments for the decode command.
#[derive(clap::Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Path to the RAML document.
    pub input: PathBuf,

    /// Base URL for `!include` resolution and the document URL.
    /// Defaults to the input file's own location.
    #[clap(long, env = "RAML_BASE_URL")]
    pub base_url: Option<String>,

    /// Output path for the document JSON (stdout when omitted).
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

/// Executes the decode command.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `fetcher` - Retrieves `!include` targets.
pub fn execute(args: &DecodeArgs, fetcher: &dyn Fetcher) -> CliResult<()> {
    let bytes = read_input(&args.input)?;

    let base_url = match &args.base_url {
        Some(url) => url.clone(),
        None => file_url(&args.input)?,
    };
    log::debug!("decoding {:?} with include base {}", args.input, base_url);

    let document = RamlCodec.decode(&bytes, &CodecOptions::with_base_url(base_url), fetcher)?;
    let json = serde_json::to_string_pretty(&document)?;

    write_output(args.output.as_deref(), &format!("{}\n", json))
}

fn file_url(path: &Path) -> CliResult<String> {
    let absolute = fs::canonicalize(path)?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|_| CliError::General(format!("Cannot express {:?} as a file URL", absolute)))
}
