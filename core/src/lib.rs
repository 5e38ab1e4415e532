#![deny(missing_docs)]

//! # RAML Codec
//!
//! Converts between the generic hypermedia [`Document`] model and RAML 0.8 text.

/// Shared error types.
pub mod error;

/// Document, link and field model.
pub mod document;

/// Include fetching capability.
pub mod fetch;

/// `!include` and `$ref` expansion.
pub mod loader;

/// RAML grammar parsing.
pub mod raml;

/// Body schema to field expansion.
pub mod schema;

/// RAML to document mapping.
pub mod decode;

/// Document to RAML mapping.
pub mod encode;

/// Codec interface.
pub mod codec;

pub use codec::{Codec, CodecOptions, RamlCodec};
#[cfg(feature = "client")]
pub use decode::decode_raml;
pub use decode::decode_raml_with;
pub use document::{Document, Field, Link, Location, Node};
pub use encode::encode_raml;
pub use error::{AppError, AppResult};
#[cfg(feature = "client")]
pub use fetch::HttpFetcher;
pub use fetch::{Fetcher, StaticFetcher};
pub use schema::expand_schema;
