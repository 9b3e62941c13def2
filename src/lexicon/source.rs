//! # Lexicon Archive Source
//!
//! ## Purpose
//! Fetches the lexicon archive from its configured HTTP location,
//! decompresses the contained JSON document, and parses it into a typed
//! `LexiconDocument`. Stateless; every call performs a full fetch.
//!
//! ## Input/Output Specification
//! - **Input**: archive URL, request timeout, user agent
//! - **Output**: parsed `LexiconDocument`
//! - **Errors**: network, decompression, and parse failures

use crate::config::SourceConfig;
use crate::errors::{DictionaryError, Result};
use crate::lexicon::LexiconDocument;
use flate2::read::GzDecoder;
use reqwest::Client;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP source for the compressed lexicon archive
pub struct ArchiveSource {
    config: SourceConfig,
    client: Client,
}

impl ArchiveSource {
    /// Create a new archive source with its own HTTP client
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DictionaryError::Network {
                details: e.to_string(),
            })?;

        Ok(Self { config, client })
    }

    /// Fetch, decompress, and parse the lexicon archive
    pub async fn fetch(&self) -> Result<LexiconDocument> {
        debug!("Fetching lexicon archive from: {}", self.config.archive_url);

        let response = self
            .client
            .get(&self.config.archive_url)
            .send()
            .await
            .map_err(|e| DictionaryError::Network {
                details: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DictionaryError::Network {
                details: format!(
                    "HTTP {} from {}",
                    response.status(),
                    self.config.archive_url
                ),
            });
        }

        let bytes = response.bytes().await.map_err(|e| DictionaryError::Network {
            details: e.to_string(),
        })?;

        let text = decompress_archive(&bytes)?;

        let document: LexiconDocument =
            serde_json::from_str(&text).map_err(|e| DictionaryError::Parsing {
                origin: "lexicon archive".to_string(),
                details: e.to_string(),
            })?;

        info!(
            "Fetched lexicon {} ({} words, dated {})",
            document.version,
            document.words.len(),
            document.dict_date
        );

        Ok(document)
    }
}

/// Decompress the archive bytes into UTF-8 JSON text
fn decompress_archive(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|e| DictionaryError::Decompression {
            details: e.to_string(),
        })?;

    Ok(text)
}
