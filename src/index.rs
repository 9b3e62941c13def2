//! # Index Builder Module
//!
//! ## Purpose
//! Transforms a parsed `LexiconDocument` into the two in-memory lookup
//! indexes the engine probes at query time: one keyed by kanji spellings, one
//! keyed by kana spellings. Each index maps a normalized key to the word
//! entries sharing that spelling, in source order.
//!
//! ## Input/Output Specification
//! - **Input**: parsed `LexiconDocument`
//! - **Output**: `IndexSet` with kanji and kana maps of denormalized
//!   `WordEntry` records
//! - **Performance**: single pass over the word list; O(1) probes afterwards
//!
//! ## Key Features
//! - One entry per spelling: kanji entries carry the canonical (first kana)
//!   reading, kana entries read as themselves
//! - Senses are derived once per word and shared by all of its entries
//! - Best-effort part-of-speech mapping over an ordered rule table

use crate::lexicon::{LexiconDocument, WordSense};
use crate::normalize::normalize;
use crate::{JmdictSenseMeta, Language, PartOfSpeech, Sense, SenseMeta, WordEntry};
use std::collections::HashMap;

/// The built lookup indexes, immutable after construction
pub struct IndexSet {
    by_kanji: HashMap<String, Vec<WordEntry>>,
    by_kana: HashMap<String, Vec<WordEntry>>,
}

/// Index size statistics for logging
#[derive(Debug, Clone, Copy)]
pub struct IndexStats {
    pub entries: usize,
    pub kanji_keys: usize,
    pub kana_keys: usize,
}

impl IndexSet {
    /// Build both indexes from a parsed lexicon document
    pub fn build(document: &LexiconDocument) -> Self {
        let mut by_kanji: HashMap<String, Vec<WordEntry>> = HashMap::new();
        let mut by_kana: HashMap<String, Vec<WordEntry>> = HashMap::new();

        for word in &document.words {
            let senses = build_senses(&word.sense);
            let canonical_reading = word.kana.first().map(|k| k.text.clone());

            for spelling in &word.kanji {
                let entry = WordEntry {
                    term: spelling.text.clone(),
                    reading: canonical_reading.clone(),
                    language: Language::Jp,
                    senses: senses.clone(),
                };
                push_entry(&mut by_kanji, &spelling.text, entry);
            }

            for spelling in &word.kana {
                // a kana entry reads as itself, not as the canonical reading
                let entry = WordEntry {
                    term: spelling.text.clone(),
                    reading: Some(spelling.text.clone()),
                    language: Language::Jp,
                    senses: senses.clone(),
                };
                push_entry(&mut by_kana, &spelling.text, entry);
            }
        }

        Self { by_kanji, by_kana }
    }

    /// Entries indexed under `key` by kanji spelling, in insertion order
    pub fn kanji_matches(&self, key: &str) -> &[WordEntry] {
        self.by_kanji.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries indexed under `key` by kana spelling, in insertion order
    pub fn kana_matches(&self, key: &str) -> &[WordEntry] {
        self.by_kana.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Size statistics for logging
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self
                .by_kanji
                .values()
                .chain(self.by_kana.values())
                .map(Vec::len)
                .sum(),
            kanji_keys: self.by_kanji.len(),
            kana_keys: self.by_kana.len(),
        }
    }
}

fn push_entry(map: &mut HashMap<String, Vec<WordEntry>>, raw_key: &str, entry: WordEntry) {
    map.entry(normalize(raw_key)).or_default().push(entry);
}

/// Map a word's sense groups into the shared `Sense` shape, filtering glosses
/// to the one target language this dictionary translates into.
pub(crate) fn build_senses(groups: &[WordSense]) -> Vec<Sense> {
    groups
        .iter()
        .map(|group| {
            let glosses: Vec<String> = group
                .gloss
                .iter()
                .filter(|g| g.lang == Language::En.code())
                .map(|g| g.text.clone())
                .collect();

            let mut notes: Vec<String> = Vec::new();
            notes.extend(group.info.iter().cloned());
            notes.extend(group.misc.iter().cloned());

            Sense {
                part_of_speech: map_part_of_speech(&group.part_of_speech),
                notes: if notes.is_empty() { None } else { Some(notes) },
                meta: Some(SenseMeta::Jmdict(JmdictSenseMeta {
                    glosses,
                    raw_part_of_speech: group.part_of_speech.clone(),
                    applies_to_kanji: group.applies_to_kanji.clone(),
                    applies_to_kana: group.applies_to_kana.clone(),
                })),
            }
        })
        .collect()
}

/// Best-effort mapping of the first raw part-of-speech tag onto the shared
/// vocabulary. The rules are ordered and the first match wins; tags matching
/// no rule leave the field unset.
fn map_part_of_speech(tags: &[String]) -> Option<PartOfSpeech> {
    let p = tags.first()?.to_lowercase();

    if p.starts_with('n') {
        return Some(PartOfSpeech::Noun);
    }
    if p.starts_with('v') {
        return Some(PartOfSpeech::Verb);
    }
    if p.starts_with("adj") {
        return Some(PartOfSpeech::Adjective);
    }
    if p.starts_with("adv") {
        return Some(PartOfSpeech::Adverb);
    }
    if p.starts_with("pron") {
        return Some(PartOfSpeech::Pronoun);
    }
    if p == "prt" || p.contains("particle") {
        return Some(PartOfSpeech::Particle);
    }
    if p == "conj" || p.contains("conjunction") {
        return Some(PartOfSpeech::Conjunction);
    }
    if p == "int" || p.contains("interjection") {
        return Some(PartOfSpeech::Interjection);
    }
    if p == "aux" {
        return Some(PartOfSpeech::Auxiliary);
    }
    if p == "pref" {
        return Some(PartOfSpeech::Prefix);
    }
    if p == "suf" {
        return Some(PartOfSpeech::Suffix);
    }
    if p.contains("expression") {
        return Some(PartOfSpeech::Expression);
    }

    None
}
