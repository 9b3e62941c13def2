//! End-to-end dictionary flows: archive download, cache reuse, lookup
//! semantics, and cache eviction, with the lexicon archive served by a local
//! mock server.

use flate2::write::GzEncoder;
use flate2::Compression;
use jmdict_lookup::config::{CacheConfig, SourceConfig};
use jmdict_lookup::lexicon::SledCache;
use jmdict_lookup::{
    Dictionary, DictionaryError, JmdictDictionary, Language, LookupOptions, PartOfSpeech,
    SenseMeta,
};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lexicon_fixture() -> serde_json::Value {
    json!({
        "version": "3.6.2",
        "languages": ["en"],
        "commonOnly": false,
        "dictDate": "2026-02-02",
        "dictRevisions": ["3.6.2"],
        "tags": { "n": "noun (common)" },
        "words": [
            {
                "id": "1467640",
                "kanji": [{ "text": "猫", "common": true, "tags": [] }],
                "kana": [{
                    "text": "ねこ", "common": true, "tags": [],
                    "appliesToKanji": ["*"]
                }],
                "sense": [{
                    "partOfSpeech": ["n"],
                    "appliesToKanji": ["*"],
                    "appliesToKana": ["*"],
                    "related": [["ネコ"]],
                    "antonym": [],
                    "field": [],
                    "dialect": [],
                    "misc": [],
                    "info": [],
                    "languageSource": [],
                    "gloss": [
                        { "lang": "en", "gender": null, "type": null, "text": "cat" }
                    ]
                }]
            },
            {
                "id": "1578010",
                "kanji": [{ "text": "木", "common": true, "tags": [] }],
                "kana": [{ "text": "き", "common": true, "tags": [], "appliesToKanji": ["*"] }],
                "sense": [{
                    "partOfSpeech": ["n"],
                    "gloss": [{ "lang": "en", "gender": null, "type": null, "text": "tree" }]
                }]
            },
            {
                "id": "1578020",
                "kanji": [{ "text": "木", "common": false, "tags": [] }],
                "kana": [{ "text": "もく", "common": false, "tags": [], "appliesToKanji": ["*"] }],
                "sense": [{
                    "partOfSpeech": ["n"],
                    "gloss": [{ "lang": "en", "gender": null, "type": null, "text": "Thursday" }]
                }]
            },
            {
                "id": "1571450",
                "kanji": [{ "text": "柿", "common": true, "tags": [] }],
                "kana": [{ "text": "かき", "common": true, "tags": [], "appliesToKanji": ["*"] }],
                "sense": [{
                    "partOfSpeech": ["n"],
                    "gloss": [{ "lang": "en", "gender": null, "type": null, "text": "persimmon" }]
                }]
            },
            {
                "id": "1577900",
                "kanji": [{ "text": "牡蠣", "common": false, "tags": [] }],
                "kana": [{ "text": "かき", "common": false, "tags": [], "appliesToKanji": ["*"] }],
                "sense": [{
                    "partOfSpeech": ["n"],
                    "gloss": [{ "lang": "en", "gender": null, "type": null, "text": "oyster" }]
                }]
            },
            {
                "id": "1150410",
                "kanji": [{ "text": "アメリカ", "common": true, "tags": [] }],
                "kana": [{ "text": "あめりか", "common": false, "tags": [], "appliesToKanji": ["*"] }],
                "sense": [{
                    "partOfSpeech": ["n"],
                    "gloss": [{ "lang": "en", "gender": null, "type": null, "text": "America" }]
                }]
            },
            {
                "id": "1150411",
                "kana": [{ "text": "アメリカ", "common": true, "tags": [], "appliesToKanji": [] }],
                "sense": [{
                    "partOfSpeech": ["n"],
                    "gloss": [{ "lang": "en", "gender": null, "type": null, "text": "America (katakana)" }]
                }]
            }
        ]
    })
}

fn gzipped_fixture() -> Vec<u8> {
    let bytes = serde_json::to_vec(&lexicon_fixture()).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&bytes).unwrap();
    encoder.finish().unwrap()
}

async fn archive_server(body: Vec<u8>, expected_requests: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jmdict-eng.json.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(expected_requests)
        .mount(&server)
        .await;
    server
}

fn source_config(server: &MockServer) -> SourceConfig {
    SourceConfig {
        archive_url: format!("{}/jmdict-eng.json.gz", server.uri()),
        request_timeout_seconds: 5,
        user_agent: "jmdict-lookup-tests".to_string(),
    }
}

fn open_cache(dir: &tempfile::TempDir) -> Arc<SledCache> {
    Arc::new(
        SledCache::open(&CacheConfig {
            db_path: dir.path().join("cache"),
            enable_compression: true,
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn kanji_lookup_returns_entry_with_canonical_reading() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    let entries = dictionary.lookup("猫", None).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].term, "猫");
    assert_eq!(entries[0].reading.as_deref(), Some("ねこ"));
    assert_eq!(entries[0].language, Language::Jp);
    assert_eq!(entries[0].senses[0].part_of_speech, Some(PartOfSpeech::Noun));

    let Some(SenseMeta::Jmdict(meta)) = &entries[0].senses[0].meta else {
        panic!("expected jmdict sense meta");
    };
    assert_eq!(meta.glosses, vec!["cat"]);
}

#[tokio::test]
async fn romaji_query_is_transliterated_and_hits_the_kana_index() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    let entries = dictionary.lookup("neko", None).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].term, "ねこ");
    assert_eq!(entries[0].reading.as_deref(), Some("ねこ"));
}

#[tokio::test]
async fn query_whitespace_is_stripped_before_probing() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    let entries = dictionary.lookup("  猫  ", None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].term, "猫");
}

#[tokio::test]
async fn homographs_are_returned_in_source_order() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    let entries = dictionary.lookup("木", None).await.unwrap();

    // distinct readings survive de-duplication, in insertion order
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].reading.as_deref(), Some("き"));
    assert_eq!(entries[1].reading.as_deref(), Some("もく"));
}

#[tokio::test]
async fn identical_term_reading_pairs_are_deduplicated() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    // 柿 and 牡蠣 both read かき, so the kana index holds two entries with
    // the identity (かき, かき); only the first survives
    let entries = dictionary.lookup("かき", None).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].term, "かき");
}

#[tokio::test]
async fn kanji_index_matches_precede_kana_index_matches() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    // アメリカ is a kanji-field spelling of one word and a kana spelling of
    // another
    let entries = dictionary.lookup("アメリカ", None).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].reading.as_deref(), Some("あめりか"));
    assert_eq!(entries[1].reading.as_deref(), Some("アメリカ"));
}

#[tokio::test]
async fn missing_term_yields_empty_list_not_error() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    let entries = dictionary.lookup("存在しない語", None).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn unsupported_target_language_fails_before_any_fetch() {
    // port 9 is unroutable; the lookup must fail on the language check
    // without ever touching the network
    let config = SourceConfig {
        archive_url: "http://127.0.0.1:9/jmdict-eng.json.gz".to_string(),
        request_timeout_seconds: 1,
        user_agent: "jmdict-lookup-tests".to_string(),
    };
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(config, open_cache(&dir)).unwrap();

    let err = dictionary
        .lookup(
            "猫",
            Some(LookupOptions {
                target_language: Language::Jp,
            }),
        )
        .await
        .unwrap_err();

    match err {
        DictionaryError::UnsupportedLanguage {
            requested,
            source_language,
            target_language,
        } => {
            assert_eq!(requested, Language::Jp);
            assert_eq!(source_language, Language::Jp);
            assert_eq!(target_language, Language::En);
        }
        other => panic!("expected UnsupportedLanguage, got {:?}", other),
    }
}

#[tokio::test]
async fn initialize_is_idempotent_and_download_happens_once() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    dictionary.initialize().await.unwrap();
    dictionary.initialize().await.unwrap();
    let entries = dictionary.lookup("猫", None).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn concurrent_first_lookups_share_one_build() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary =
        Arc::new(JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap());

    let a = {
        let d = dictionary.clone();
        tokio::spawn(async move { d.lookup("猫", None).await })
    };
    let b = {
        let d = dictionary.clone();
        tokio::spawn(async move { d.lookup("neko", None).await })
    };

    assert_eq!(a.await.unwrap().unwrap().len(), 1);
    assert_eq!(b.await.unwrap().unwrap().len(), 1);
}

#[tokio::test]
async fn second_instance_loads_from_cache_without_downloading() {
    let server = archive_server(gzipped_fixture(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let cache = open_cache(&dir);

    let first = JmdictDictionary::new(source_config(&server), cache.clone()).unwrap();
    assert_eq!(first.lookup("猫", None).await.unwrap().len(), 1);

    // fresh instance, same cache: the mock's expect(1) verifies no second
    // download happens
    let second = JmdictDictionary::new(source_config(&server), cache).unwrap();
    assert_eq!(second.lookup("猫", None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn clear_evicts_cache_and_in_memory_indexes() {
    let server = archive_server(gzipped_fixture(), 2).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    assert_eq!(dictionary.lookup("猫", None).await.unwrap().len(), 1);

    dictionary.clear().await.unwrap();

    // both the persisted copy and the in-memory indexes are gone, so this
    // lookup re-downloads (second expected request on the mock)
    assert_eq!(dictionary.lookup("猫", None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn clear_before_first_initialize_succeeds() {
    let server = archive_server(gzipped_fixture(), 0).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    dictionary.clear().await.unwrap();
}

#[tokio::test]
async fn corrupt_archive_surfaces_as_initialization_error() {
    let server = archive_server(b"not a gzip stream".to_vec(), 1).await;
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(source_config(&server), open_cache(&dir)).unwrap();

    let err = dictionary.lookup("猫", None).await.unwrap_err();
    assert!(matches!(err, DictionaryError::Initialization { .. }));
}

#[tokio::test]
async fn unreachable_source_surfaces_as_initialization_error() {
    let config = SourceConfig {
        archive_url: "http://127.0.0.1:9/jmdict-eng.json.gz".to_string(),
        request_timeout_seconds: 1,
        user_agent: "jmdict-lookup-tests".to_string(),
    };
    let dir = tempfile::tempdir().unwrap();
    let dictionary = JmdictDictionary::new(config, open_cache(&dir)).unwrap();

    let err = dictionary.initialize().await.unwrap_err();
    assert!(matches!(err, DictionaryError::Initialization { .. }));
}
