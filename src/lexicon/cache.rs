//! # Lexicon Cache Module
//!
//! ## Purpose
//! Persistent caching of the parsed lexicon document so that subsequent
//! process starts skip the download-and-parse sequence. The cache is a
//! generic async key-value store; the dictionary engine uses it with one
//! fixed key.
//!
//! ## Input/Output Specification
//! - **Input**: parsed `LexiconDocument`, cache key
//! - **Output**: cached document retrieval, eviction
//! - **Storage**: sled embedded database, gzip compressed JSON documents,
//!   bincode metadata records
//!
//! ## Key Features
//! - Pluggable backend trait for alternative stores
//! - Optional compression for the large document payload
//! - Metadata records (version, word count, store time) for observability

use crate::config::CacheConfig;
use crate::errors::{DictionaryError, Result};
use crate::lexicon::LexiconDocument;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::debug;

/// Pluggable persistent cache for parsed lexicon documents.
///
/// Implementations must treat deletion of an absent key as success.
#[async_trait]
pub trait LexiconCache: Send + Sync {
    /// Read the cached document under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<LexiconDocument>>;

    /// Store `document` under `key`, replacing any previous value
    async fn set(&self, key: &str, document: &LexiconDocument) -> Result<()>;

    /// Evict the entry under `key`; absent keys are already cleared
    async fn del(&self, key: &str) -> Result<()>;
}

/// Metadata about a cached document, stored alongside the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheInfo {
    pub version: String,
    pub dict_date: NaiveDate,
    pub word_count: usize,
    pub stored_at: DateTime<Utc>,
}

/// Sled-backed lexicon cache
pub struct SledCache {
    config: CacheConfig,
    db: sled::Db,
    documents: sled::Tree,
    info: sled::Tree,
}

impl SledCache {
    /// Open (or create) the cache database at the configured path
    pub fn open(config: &CacheConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = sled::open(&config.db_path).map_err(|e| DictionaryError::CacheStore {
            details: format!("Failed to open cache at {:?}: {}", config.db_path, e),
        })?;

        let documents = db.open_tree("lexicon_documents")?;
        let info = db.open_tree("lexicon_info")?;

        Ok(Self {
            config: config.clone(),
            db,
            documents,
            info,
        })
    }

    /// Metadata for the entry under `key`, if present
    pub fn read_info(&self, key: &str) -> Result<Option<CacheInfo>> {
        match self.info.get(key.as_bytes())? {
            Some(raw) => Ok(Some(bincode::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(bytes)
            .map_err(|e| DictionaryError::CacheStore {
                details: format!("Compression failed: {}", e),
            })?;

        encoder.finish().map_err(|e| DictionaryError::CacheStore {
            details: format!("Compression finish failed: {}", e),
        })
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(bytes);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| DictionaryError::CacheStore {
                details: format!("Decompression failed: {}", e),
            })?;

        Ok(decompressed)
    }
}

#[async_trait]
impl LexiconCache for SledCache {
    async fn get(&self, key: &str) -> Result<Option<LexiconDocument>> {
        let Some(raw) = self.documents.get(key.as_bytes())? else {
            return Ok(None);
        };

        let json = if self.config.enable_compression {
            self.decompress(&raw)?
        } else {
            raw.to_vec()
        };

        let document: LexiconDocument =
            serde_json::from_slice(&json).map_err(|e| DictionaryError::Parsing {
                origin: "lexicon cache".to_string(),
                details: e.to_string(),
            })?;

        if let Some(info) = self.read_info(key)? {
            debug!(
                "Cache hit for '{}': lexicon {} with {} words, stored at {}",
                key, info.version, info.word_count, info.stored_at
            );
        }

        Ok(Some(document))
    }

    async fn set(&self, key: &str, document: &LexiconDocument) -> Result<()> {
        let json = serde_json::to_vec(document)?;
        let payload = if self.config.enable_compression {
            self.compress(&json)?
        } else {
            json
        };

        let info = CacheInfo {
            version: document.version.clone(),
            dict_date: document.dict_date,
            word_count: document.words.len(),
            stored_at: Utc::now(),
        };

        self.documents.insert(key.as_bytes(), payload)?;
        self.info.insert(key.as_bytes(), bincode::serialize(&info)?)?;

        self.db
            .flush_async()
            .await
            .map_err(|e| DictionaryError::CacheStore {
                details: format!("Failed to flush cache: {}", e),
            })?;

        debug!("Cached lexicon document under '{}'", key);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.documents.remove(key.as_bytes())?;
        self.info.remove(key.as_bytes())?;

        self.db
            .flush_async()
            .await
            .map_err(|e| DictionaryError::CacheStore {
                details: format!("Failed to flush cache: {}", e),
            })?;

        Ok(())
    }
}
