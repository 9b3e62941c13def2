//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the dictionary lookup engine, providing
//! structured error types and conversion utilities for all components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from lexicon fetch, cache, and lookup paths
//! - **Output**: Structured error types with context
//! - **Error Categories**: Lexicon, Cache, Dictionary, Configuration
//!
//! ## Key Features
//! - Hierarchical error types with detailed context
//! - Automatic conversion from library error types
//! - Error categories for structured logging

use crate::Language;
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, DictionaryError>;

/// Error types for the dictionary lookup engine
#[derive(Debug, Error)]
pub enum DictionaryError {
    // Lexicon source errors
    #[error("Network error: {details}")]
    Network { details: String },

    #[error("Failed to decompress lexicon archive: {details}")]
    Decompression { details: String },

    #[error("Failed to parse data from {origin}: {details}")]
    Parsing { origin: String, details: String },

    // Cache errors
    #[error("Cache store error: {details}")]
    CacheStore { details: String },

    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },

    // Dictionary engine errors
    #[error("Dictionary initialization failed: {details}")]
    Initialization { details: String },

    #[error("Unsupported target language '{requested}': dictionary only supports '{source_language}' to '{target_language}' translations")]
    UnsupportedLanguage {
        requested: Language,
        source_language: Language,
        target_language: Language,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    // Generic errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DictionaryError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            DictionaryError::Network { .. }
            | DictionaryError::Decompression { .. }
            | DictionaryError::Parsing { .. } => "lexicon",
            DictionaryError::CacheStore { .. }
            | DictionaryError::SerializationFailed { .. } => "cache",
            DictionaryError::Initialization { .. }
            | DictionaryError::UnsupportedLanguage { .. } => "dictionary",
            DictionaryError::Config { .. } | DictionaryError::ValidationFailed { .. } => {
                "configuration"
            }
            DictionaryError::Internal { .. } => "generic",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for DictionaryError {
    fn from(err: std::io::Error) -> Self {
        DictionaryError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<reqwest::Error> for DictionaryError {
    fn from(err: reqwest::Error) -> Self {
        DictionaryError::Network {
            details: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DictionaryError {
    fn from(err: serde_json::Error) -> Self {
        DictionaryError::SerializationFailed {
            message: format!("JSON serialization error: {}", err),
        }
    }
}

impl From<sled::Error> for DictionaryError {
    fn from(err: sled::Error) -> Self {
        DictionaryError::CacheStore {
            details: err.to_string(),
        }
    }
}

impl From<bincode::Error> for DictionaryError {
    fn from(err: bincode::Error) -> Self {
        DictionaryError::SerializationFailed {
            message: format!("Binary serialization error: {}", err),
        }
    }
}
