//! # Dictionary Contract Module
//!
//! ## Purpose
//! The polymorphic contract every dictionary implementation satisfies. Each
//! implementation declares a human-readable name and the single source
//! language it supports, and exposes the initialize/lookup/clear operations.
//!
//! Additional source-language dictionaries are expected to live alongside the
//! JMdict implementation as further implementors of this trait.

use crate::errors::Result;
use crate::{Language, WordEntry};
use async_trait::async_trait;

/// Options accepted by [`Dictionary::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Language to translate glosses into
    pub target_language: Language,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            target_language: Language::En,
        }
    }
}

/// A bilingual point-lookup dictionary.
#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Human-readable dictionary name
    fn name(&self) -> &str;

    /// The one source language this dictionary translates from
    fn source_language(&self) -> Language;

    /// Perform the full load-and-index sequence. Idempotent: the first call
    /// does the work, subsequent calls are no-ops. Fails if the lexicon
    /// cannot be fetched or parsed; no partial index is exposed.
    async fn initialize(&self) -> Result<()>;

    /// Look up a term. Initializes the dictionary first if that has not
    /// happened yet. A term absent from the indexes yields an empty list,
    /// never an error; an unsupported target language fails immediately.
    async fn lookup(&self, term: &str, options: Option<LookupOptions>) -> Result<Vec<WordEntry>>;

    /// Evict this dictionary's persisted lexicon cache entry and drop the
    /// in-memory indexes. A missing cache entry counts as already cleared.
    async fn clear(&self) -> Result<()>;
}
