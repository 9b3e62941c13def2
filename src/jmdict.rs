//! # JMdict Dictionary Module
//!
//! ## Purpose
//! The concrete Japanese-English implementation of the [`Dictionary`]
//! contract. Drives the full pipeline: cached-or-fetched lexicon load, index
//! construction, query normalization and transliteration, index probing, and
//! de-duplication of results.
//!
//! ## Input/Output Specification
//! - **Input**: lookup terms (kanji, kana, or romaji), target language option
//! - **Output**: de-duplicated `WordEntry` lists, kanji matches first
//! - **Initialization**: lazy, guarded, at most one build in flight
//!
//! ## Key Features
//! - Guarded exactly-once index construction: concurrent first callers queue
//!   behind one build instead of racing duplicate loads
//! - Persistent cache consultation before any network fetch
//! - Romaji queries transliterated to hiragana before probing

use crate::config::SourceConfig;
use crate::dictionary::{Dictionary, LookupOptions};
use crate::errors::{DictionaryError, Result};
use crate::index::IndexSet;
use crate::lexicon::{ArchiveSource, LexiconCache, LexiconDocument};
use crate::normalize;
use crate::{Language, WordEntry};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Cache key the parsed lexicon document is stored under
const LEXICON_CACHE_KEY: &str = "jmdict:lexicon_json";

/// Japanese-English dictionary backed by the JMdict lexicon
pub struct JmdictDictionary {
    source: ArchiveSource,
    cache: Arc<dyn LexiconCache>,
    indexes: RwLock<Option<Arc<IndexSet>>>,
    build_gate: Mutex<()>,
}

impl JmdictDictionary {
    /// Create a dictionary over the given archive source and cache. No I/O
    /// happens until the first `initialize` or `lookup` call.
    pub fn new(config: SourceConfig, cache: Arc<dyn LexiconCache>) -> Result<Self> {
        Ok(Self {
            source: ArchiveSource::new(config)?,
            cache,
            indexes: RwLock::new(None),
            build_gate: Mutex::new(()),
        })
    }

    /// Return the built indexes, building them first if necessary. Callers
    /// racing the first build all wait on the gate and observe the one
    /// published result.
    async fn ensure_loaded(&self) -> Result<Arc<IndexSet>> {
        if let Some(indexes) = self.indexes.read().await.as_ref() {
            return Ok(indexes.clone());
        }

        let _gate = self.build_gate.lock().await;

        // re-check: another caller may have finished the build while this one
        // waited on the gate
        if let Some(indexes) = self.indexes.read().await.as_ref() {
            return Ok(indexes.clone());
        }

        let document = self
            .load_document()
            .await
            .map_err(|e| DictionaryError::Initialization {
                details: e.to_string(),
            })?;

        let started = Instant::now();
        let built = Arc::new(IndexSet::build(&document));
        let stats = built.stats();
        info!(
            "Lexicon indexed in {}ms: {} entries over {} kanji keys and {} kana keys",
            started.elapsed().as_millis(),
            stats.entries,
            stats.kanji_keys,
            stats.kana_keys
        );

        *self.indexes.write().await = Some(built.clone());
        Ok(built)
    }

    /// Load the lexicon document from the cache, falling back to a fresh
    /// download. The freshly downloaded document is written back to the cache
    /// best-effort.
    async fn load_document(&self) -> Result<LexiconDocument> {
        let cached = match self.cache.get(LEXICON_CACHE_KEY).await {
            Ok(found) => found,
            Err(err) => {
                warn!("Lexicon cache read failed, falling back to download: {}", err);
                None
            }
        };

        if let Some(document) = cached {
            return Ok(document);
        }

        let document = self.source.fetch().await?;

        if let Err(err) = self.cache.set(LEXICON_CACHE_KEY, &document).await {
            warn!("Failed to persist lexicon to cache: {}", err);
        }

        Ok(document)
    }
}

#[async_trait]
impl Dictionary for JmdictDictionary {
    fn name(&self) -> &str {
        "JMDict"
    }

    fn source_language(&self) -> Language {
        Language::Jp
    }

    async fn initialize(&self) -> Result<()> {
        self.ensure_loaded().await.map(|_| ())
    }

    async fn lookup(&self, term: &str, options: Option<LookupOptions>) -> Result<Vec<WordEntry>> {
        let target = options.unwrap_or_default().target_language;
        if target != Language::En {
            return Err(DictionaryError::UnsupportedLanguage {
                requested: target,
                source_language: self.source_language(),
                target_language: Language::En,
            });
        }

        let indexes = self.ensure_loaded().await?;

        let query = if normalize::is_romanized(term) {
            normalize::romanized_to_kana(term)
        } else {
            term.to_string()
        };
        let key = normalize::normalize(&query);

        // kanji matches rank before kana matches; identity is (term, reading)
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut out = Vec::new();
        for entry in indexes
            .kanji_matches(&key)
            .iter()
            .chain(indexes.kana_matches(&key))
        {
            let identity = (
                entry.term.clone(),
                entry.reading.clone().unwrap_or_default(),
            );
            if seen.insert(identity) {
                out.push(entry.clone());
            }
        }

        debug!("Lookup '{}' (key '{}') -> {} entries", term, key, out.len());
        Ok(out)
    }

    async fn clear(&self) -> Result<()> {
        if let Err(err) = self.cache.del(LEXICON_CACHE_KEY).await {
            warn!("Lexicon cache delete failed, treating as cleared: {}", err);
        }

        *self.indexes.write().await = None;
        info!("Lexicon cache cleared; indexes will rebuild on next lookup");
        Ok(())
    }
}
