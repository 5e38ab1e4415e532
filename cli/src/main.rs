#![deny(missing_docs)]

//! # RAML Codec CLI
//!
//! Command Line Interface for the RAML codec.
//!
//! Supported Commands:
//! - `decode`: RAML (with `!include`s) -> document JSON.
//! - `encode`: Document JSON -> RAML 0.8.

use clap::{Parser, Subcommand};
use raml_codec::HttpFetcher;

use crate::error::CliResult;

mod decode;
mod encode;
mod error;
mod output;

#[derive(Parser, Debug)]
#[clap(author, version, about = "RAML <-> document codec")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a RAML document into document JSON.
    Decode(decode::DecodeArgs),
    /// Encode document JSON as RAML 0.8.
    Encode(encode::EncodeArgs),
}

fn main() -> CliResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Decode(args) => {
            // Session lives for this one decode only
            let fetcher = HttpFetcher::new();
            decode::execute(args, &fetcher)?;
        }
        Commands::Encode(args) => encode::execute(args)?,
    }

    Ok(())
}
