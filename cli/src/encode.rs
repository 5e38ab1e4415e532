#![deny(missing_docs)]

//! # Encode Command
//!
//! Document JSON -> RAML file.

use crate::error::CliResult;
use crate::output::{read_input, write_output};
use raml_codec::{Codec, CodecOptions, Document, RamlCodec};
use std::path::PathBuf;

/// Arguments for the encode command.
#[derive(clap::Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Path to the document JSON.
    pub input: PathBuf,

    /// Emitted as `baseUri` in place of the document's own URL.
    #[clap(long, env = "RAML_BASE_URL")]
    pub base_url: Option<String>,

    /// Output path for the RAML document (stdout when omitted).
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

/// Executes the encode command.
pub fn execute(args: &EncodeArgs) -> CliResult<()> {
    let bytes = read_input(&args.input)?;
    let document: Document = serde_json::from_slice(&bytes)?;

    let options = CodecOptions {
        base_url: args.base_url.clone(),
    };
    let raml = RamlCodec.encode(&document, &options)?;

    write_output(args.output.as_deref(), &raml)
}
