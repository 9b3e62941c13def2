//! # JMdict Dictionary Lookup Engine
//!
//! ## Overview
//! This library implements the bilingual dictionary lookup engine behind a
//! personal e-book library: it ingests the JMdict Japanese-English lexicon
//! (shipped as a gzip compressed JSON archive), builds in-memory indexes over
//! the multiple orthographic representations of each lexical entry (kanji and
//! kana spellings mapping to shared senses), and answers point lookups with
//! de-duplicated, stably ordered results. Romanized input is detected and
//! transliterated to hiragana before lookup.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `lexicon`: archive download, decompression, parsing, persistent caching
//! - `normalize`: lookup key normalization and romaji transliteration
//! - `index`: kanji/kana index construction from the parsed lexicon
//! - `dictionary`: the polymorphic dictionary contract
//! - `jmdict`: the concrete JMdict implementation of the contract
//! - `config`: configuration management and settings
//! - `errors`: centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: lookup terms (kanji, kana, or romaji), target language option
//! - **Output**: de-duplicated `WordEntry` lists in stable insertion order
//! - **Performance**: O(1) hash probes per lookup once indexes are built
//!
//! ## Usage
//! ```rust,no_run
//! use jmdict_lookup::lexicon::SledCache;
//! use jmdict_lookup::{Config, Dictionary, JmdictDictionary};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config.toml")?;
//!     let cache = Arc::new(SledCache::open(&config.cache)?);
//!     let dictionary = JmdictDictionary::new(config.source.clone(), cache)?;
//!     let entries = dictionary.lookup("猫", None).await?;
//!     println!("Found {} entries", entries.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod dictionary;
pub mod errors;
pub mod index;
pub mod jmdict;
pub mod lexicon;
pub mod normalize;

// Re-exports for convenience
pub use config::Config;
pub use dictionary::{Dictionary, LookupOptions};
pub use errors::{DictionaryError, Result};
pub use jmdict::JmdictDictionary;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages a dictionary can translate between, as two-letter codes.
///
/// The set is closed; supporting a new source or target language means adding
/// a variant here and a dictionary implementation that speaks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Japanese
    Jp,
}

impl Language {
    /// Two-letter code for this language
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Jp => "jp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Language::En),
            "jp" => Ok(Language::Jp),
            other => Err(DictionaryError::ValidationFailed {
                field: "language".to_string(),
                reason: format!("unknown language code '{}'", other),
            }),
        }
    }
}

/// Normalized part-of-speech categories shared by all dictionary
/// implementations. Source-specific tag vocabularies are mapped onto this
/// closed set best-effort; unmapped tags stay unset on the `Sense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Particle,
    Conjunction,
    Interjection,
    Auxiliary,
    Prefix,
    Suffix,
    Expression,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Particle => "particle",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Auxiliary => "auxiliary",
            PartOfSpeech::Prefix => "prefix",
            PartOfSpeech::Suffix => "suffix",
            PartOfSpeech::Expression => "expression",
        }
    }
}

/// A single dictionary result: one spelling of a lexical entry together with
/// the senses shared by every spelling of that entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The spelling this entry was indexed under
    pub term: String,
    /// Reading / pronunciation (kana); for kana-indexed entries this is the
    /// term itself
    pub reading: Option<String>,
    /// Source language of the term
    pub language: Language,
    /// Meanings, in source order
    pub senses: Vec<Sense>,
}

/// One sense group of a word entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    /// Normalized part of speech, if the source tags mapped onto the shared
    /// vocabulary
    pub part_of_speech: Option<PartOfSpeech>,
    /// Free-text usage notes and miscellaneous tags; absent rather than empty
    pub notes: Option<Vec<String>>,
    /// Source-specific extras, keyed by the implementation that produced them
    pub meta: Option<SenseMeta>,
}

/// Typed per-implementation sense extras. Keeping this a closed union (rather
/// than an untyped map) lets consumers match on the variant they understand
/// while the shared `Sense` shape stays stable across dictionary variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum SenseMeta {
    Jmdict(JmdictSenseMeta),
}

/// Extras carried by senses produced from the JMdict lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JmdictSenseMeta {
    /// Gloss strings filtered to the target language
    pub glosses: Vec<String>,
    /// Raw part-of-speech tags, unmapped
    pub raw_part_of_speech: Vec<String>,
    /// Kanji spellings this sense is restricted to, verbatim
    pub applies_to_kanji: Vec<String>,
    /// Kana spellings this sense is restricted to, verbatim
    pub applies_to_kana: Vec<String>,
}
