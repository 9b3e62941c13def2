//! # Dictionary Lookup CLI Driver
//!
//! ## Purpose
//! Command-line entry point for the dictionary lookup engine. Loads
//! configuration, initializes logging, opens the persistent cache, and runs a
//! single lookup (or cache-maintenance operation) against the JMdict
//! dictionary.
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Open the lexicon cache and construct the dictionary
//! 4. Clear the cache and/or look up the requested term
//! 5. Print results as text or JSON

use clap::{Arg, ArgAction, Command};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jmdict_lookup::lexicon::SledCache;
use jmdict_lookup::{
    Config, Dictionary, DictionaryError, JmdictDictionary, Language, LookupOptions, Result,
    SenseMeta, WordEntry,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(category = err.category(), "{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let matches = Command::new("jmdict-lookup")
        .version("0.1.0")
        .about("Japanese-English dictionary lookup over the JMdict lexicon")
        .arg(
            Arg::new("term")
                .value_name("TERM")
                .help("Term to look up (kanji, kana, or romaji)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("target-lang")
                .short('t')
                .long("target-lang")
                .value_name("LANG")
                .help("Target gloss language")
                .default_value("en"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clear-cache")
                .long("clear-cache")
                .help("Evict the cached lexicon before doing anything else")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = Config::from_file(config_path)?;

    init_logging(&config)?;
    info!("Configuration loaded from: {}", config_path);

    let cache = Arc::new(SledCache::open(&config.cache)?);
    let dictionary = JmdictDictionary::new(config.source.clone(), cache)?;

    if matches.get_flag("clear-cache") {
        dictionary.clear().await?;
    }

    let Some(term) = matches.get_one::<String>("term") else {
        if matches.get_flag("clear-cache") {
            return Ok(());
        }
        return Err(DictionaryError::ValidationFailed {
            field: "term".to_string(),
            reason: "a lookup term is required unless --clear-cache is given".to_string(),
        });
    };

    let target: Language = matches.get_one::<String>("target-lang").unwrap().parse()?;
    let entries = dictionary
        .lookup(
            term,
            Some(LookupOptions {
                target_language: target,
            }),
        )
        .await?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_entries(term, &entries);
    }

    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|e| DictionaryError::Config {
            message: format!("Invalid log level '{}': {}", config.logging.level, e),
        })?;

    // results go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Print lookup results in a human-readable layout
fn print_entries(term: &str, entries: &[WordEntry]) {
    if entries.is_empty() {
        println!("No entries found for '{}'", term);
        return;
    }

    for entry in entries {
        match &entry.reading {
            Some(reading) if *reading != entry.term => {
                println!("{} 【{}】", entry.term, reading)
            }
            _ => println!("{}", entry.term),
        }

        for (i, sense) in entry.senses.iter().enumerate() {
            let pos = sense
                .part_of_speech
                .map(|p| format!(" ({})", p.as_str()))
                .unwrap_or_default();
            let glosses = match &sense.meta {
                Some(SenseMeta::Jmdict(meta)) => meta.glosses.join("; "),
                None => String::new(),
            };
            println!("  {}.{} {}", i + 1, pos, glosses);

            if let Some(notes) = &sense.notes {
                println!("      {}", notes.join("; "));
            }
        }

        println!();
    }
}
