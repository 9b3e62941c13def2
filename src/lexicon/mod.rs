//! # Lexicon Module
//!
//! ## Purpose
//! Everything that produces a parsed `LexiconDocument`: the typed model of
//! the jmdict-simplified JSON shape, the HTTP archive source that fetches and
//! decompresses it, and the persistent cache that avoids re-downloading it on
//! every process start.
//!
//! ## Architecture
//! - `source`: archive fetch, decompression, and parsing
//! - `cache`: pluggable async key-value cache with a sled-backed
//!   implementation
//!
//! ## Input/Output Specification
//! - **Input**: gzip compressed JSON archive bytes
//! - **Output**: typed `LexiconDocument` ready for index construction

pub mod cache;
pub mod source;

pub use cache::{LexiconCache, SledCache};
pub use source::ArchiveSource;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The parsed lexicon: a versioned collection of word records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconDocument {
    /// Lexicon release version
    pub version: String,
    /// Gloss languages present in this build of the lexicon
    #[serde(default)]
    pub languages: Vec<String>,
    /// Whether the build was filtered to common words only
    #[serde(default)]
    pub common_only: bool,
    /// Source dictionary revision date
    pub dict_date: NaiveDate,
    /// Source dictionary revision identifiers
    #[serde(default)]
    pub dict_revisions: Vec<String>,
    /// Glossary of tag abbreviations used throughout the word list
    #[serde(default)]
    pub tags: HashMap<String, String>,
    /// The word list
    pub words: Vec<LexiconWord>,
}

/// One lexical entry: a set of spellings sharing a set of senses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconWord {
    /// Stable entry identifier
    pub id: String,
    /// Logographic (kanji) spellings
    #[serde(default)]
    pub kanji: Vec<KanjiSpelling>,
    /// Phonetic (kana) spellings
    #[serde(default)]
    pub kana: Vec<KanaSpelling>,
    /// Sense groups
    #[serde(default)]
    pub sense: Vec<WordSense>,
}

/// A kanji spelling of a word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanjiSpelling {
    pub text: String,
    #[serde(default)]
    pub common: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A kana spelling of a word, optionally restricted to specific kanji
/// spellings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanaSpelling {
    pub text: String,
    #[serde(default)]
    pub common: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub applies_to_kanji: Vec<String>,
}

/// One sense group of a lexical entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSense {
    #[serde(default)]
    pub part_of_speech: Vec<String>,
    #[serde(default)]
    pub applies_to_kanji: Vec<String>,
    #[serde(default)]
    pub applies_to_kana: Vec<String>,
    /// Cross references to other entries, kept verbatim (mixed-shape arrays)
    #[serde(default)]
    pub related: Vec<serde_json::Value>,
    #[serde(default)]
    pub antonym: Vec<serde_json::Value>,
    #[serde(default)]
    pub field: Vec<String>,
    #[serde(default)]
    pub dialect: Vec<String>,
    #[serde(default)]
    pub misc: Vec<String>,
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub language_source: Vec<LanguageSource>,
    #[serde(default)]
    pub gloss: Vec<Gloss>,
}

/// Loanword origin of a sense.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSource {
    pub lang: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub partial: Option<bool>,
    #[serde(default)]
    pub wasei: Option<bool>,
}

/// A single gloss in one target language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gloss {
    pub lang: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "type", default)]
    pub gloss_type: Option<String>,
    pub text: String,
}
