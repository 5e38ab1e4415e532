#![deny(missing_docs)]

//! # Codec Interface
//!
//! Defines the interface a document format implements, and the RAML implementation.

use crate::decode::decode_raml_with;
use crate::document::Document;
use crate::encode::encode_raml;
use crate::error::AppResult;
use crate::fetch::Fetcher;

/// Per-call codec settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Include base on decode; `baseUri` override on encode.
    pub base_url: Option<String>,
}

impl CodecOptions {
    /// Options with a base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }
}

/// A format that converts between bytes and [`Document`]s.
pub trait Codec {
    /// Media type identifier, e.g. `application/raml+yaml`.
    fn media_type(&self) -> &'static str;

    /// Short format name, e.g. `raml`.
    fn format(&self) -> &'static str;

    /// Decodes `bytes`. Any external content is retrieved through `fetcher`.
    fn decode(
        &self,
        bytes: &[u8],
        options: &CodecOptions,
        fetcher: &dyn Fetcher,
    ) -> AppResult<Document>;

    /// Encodes `document` as text.
    fn encode(&self, document: &Document, options: &CodecOptions) -> AppResult<String>;
}

/// RAML 0.8 codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RamlCodec;

impl Codec for RamlCodec {
    fn media_type(&self) -> &'static str {
        "application/raml+yaml"
    }

    fn format(&self) -> &'static str {
        "raml"
    }

    fn decode(
        &self,
        bytes: &[u8],
        options: &CodecOptions,
        fetcher: &dyn Fetcher,
    ) -> AppResult<Document> {
        decode_raml_with(bytes, options.base_url.as_deref(), fetcher)
    }

    fn encode(&self, document: &Document, options: &CodecOptions) -> AppResult<String> {
        encode_raml(document, options.base_url.as_deref())
    }
}
