//! Integration tests for catalog loading and the browse session
//!
//! These tests verify that:
//! - The bundled fixture loads through a file source
//! - JSON and YAML documents decode to the same items
//! - Malformed documents fail the load instead of producing partial catalogs
//! - A failed load is "unavailable", distinct from "no matches", and retryable

use catalog::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tools.json")
}

async fn fixture_catalog() -> Catalog {
    let source = FileSource::new(fixture_path()).expect("json extension");
    load_catalog(&source).await.expect("fixture loads")
}

fn ids(items: &[&Item]) -> Vec<u64> {
    items.iter().map(|item| item.id.0).collect()
}

// =============================================================================
// Fixture Tests
// =============================================================================

mod fixture_tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_loads() {
        let catalog = fixture_catalog().await;
        assert_eq!(catalog.len(), 20);

        let ahrefs = catalog.get(ItemId(2)).expect("item 2");
        assert_eq!(ahrefs.name, "Ahrefs");
        assert_eq!(ahrefs.category, Category::Seo);
        assert_eq!(ahrefs.price, PriceTier::Paid);
        assert_eq!(ahrefs.tags, vec!["Backlinks", "Keywords", "SEO tools"]);

        // empty tags decode to no tags
        assert!(catalog.get(ItemId(20)).expect("item 20").tags.is_empty());
    }

    #[tokio::test]
    async fn test_fixture_stats() {
        let stats = fixture_catalog().await.stats();
        assert_eq!(stats.total, 20);
        assert_eq!(stats.popular, 9);
        assert_eq!(stats.featured, 4);
        assert_eq!(stats.count_for(Category::Seo), 5);
        assert_eq!(stats.count_for(Category::Hosting), 1);
        assert_eq!(stats.per_price.get(&PriceTier::Free), Some(&2));
        assert_eq!(stats.per_price.get(&PriceTier::Paid), Some(&5));
    }

    #[tokio::test]
    async fn test_fixture_seo_rating_scenario() {
        let mut browser = CatalogBrowser::new(fixture_catalog().await, DEFAULT_PAGE_SIZE);
        let update = QueryUpdate::from_pairs([("category", "seo"), ("rating", "4")])
            .expect("valid controls");
        browser.set_query(update);

        assert_eq!(browser.total_match_count(), 3);
        assert!(!browser.has_more());
        assert_eq!(ids(&browser.visible_items()), vec![2, 12, 13]);
    }

    #[tokio::test]
    async fn test_fixture_search_reaches_tags() {
        let mut browser = CatalogBrowser::new(fixture_catalog().await, DEFAULT_PAGE_SIZE);
        browser.set_query(QueryUpdate::new().search("kanban"));
        assert_eq!(ids(&browser.visible_items()), vec![19]);
    }

    #[tokio::test]
    async fn test_fixture_pages() {
        let mut browser = CatalogBrowser::new(fixture_catalog().await, DEFAULT_PAGE_SIZE);
        assert_eq!(browser.visible_count(), 12);
        assert!(browser.has_more());

        assert!(browser.load_more());
        assert_eq!(browser.newly_visible().len(), 8);
        assert_eq!(browser.visible_count(), 20);
        assert!(!browser.has_more());
    }

    #[tokio::test]
    async fn test_fixture_detail_view() {
        let catalog = fixture_catalog().await;
        let detail = ItemDetail::from(catalog.get(ItemId(1)).expect("item 1"));
        assert_eq!(detail.rating_text, "4.7 (15,420 reviews)");
        assert_eq!(detail.stars.full, 4);
        assert!(detail.stars.half);
        assert_eq!(detail.stars.total(), 5);
    }
}

// =============================================================================
// Document Format Tests
// =============================================================================

mod format_tests {
    use super::*;

    const YAML: &str = r#"
tools:
  - id: 10
    name: Wordfence
    category: security
    link: https://www.wordfence.com
    price: freemium
    rating: 4.7
    reviews: 4000
    tags: [Firewall, Malware]
  - id: 11
    name: UpdraftPlus
    category: backup
    link: https://updraftplus.com
    price: freemium
    rating: 4.8
    reviews: 3500
    popular: false
"#;

    #[tokio::test]
    async fn test_yaml_file_with_tools_key() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("temp file");
        file.write_all(YAML.as_bytes()).expect("write yaml");

        let source = FileSource::new(file.path()).expect("yaml extension");
        assert_eq!(source.format(), DocumentFormat::Yaml);

        let catalog = load_catalog(&source).await.expect("yaml loads");
        assert_eq!(catalog.len(), 2);
        let wordfence = catalog.get(ItemId(10)).expect("item 10");
        assert_eq!(wordfence.tags, vec!["Firewall", "Malware"]);
        assert_eq!(wordfence.rating.value(), 4.7);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = FileSource::new("catalog.xml").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = FileSource::new(dir.path().join("missing.json")).expect("json extension");
        let err = load_catalog(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.is_retryable());
    }
}

// =============================================================================
// Record Validation Tests
// =============================================================================

mod validation_tests {
    use super::*;

    fn record(id: &str, rating: &str, link: &str) -> String {
        format!(
            concat!(
                r#"{{"id": "{id}", "name": "Tool {id}", "category": "seo", "link": "{link}", "#,
                r#""price": "free", "rating": "{rating}", "reviews": "10"}}"#,
            ),
            id = id,
            link = link,
            rating = rating,
        )
    }

    fn document(records: &[String]) -> String {
        format!(r#"{{"items": [{}]}}"#, records.join(","))
    }

    fn field_of(err: LoadError) -> String {
        match err {
            LoadError::InvalidRecord { field, .. } => field,
            other => panic!("expected an invalid record, got {other}"),
        }
    }

    #[test]
    fn test_non_numeric_rating_fails_the_load() {
        let doc = document(&[
            record("1", "4.5", "https://a.example"),
            record("2", "abc", "https://b.example"),
        ]);
        let err = decode_catalog(&doc, DocumentFormat::Json).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_INVALID_RECORD");
        assert!(!err.is_retryable());
        assert_eq!(field_of(err), "rating");
    }

    #[test]
    fn test_out_of_range_rating_fails_the_load() {
        let doc = document(&[record("1", "7", "https://a.example")]);
        let err = decode_catalog(&doc, DocumentFormat::Json).unwrap_err();
        assert_eq!(field_of(err), "rating");
    }

    #[test]
    fn test_negative_zero_rating_loads_as_zero() {
        let doc = document(&[
            record("1", "-0", "https://a.example"),
            record("2", "0", "https://b.example"),
        ]);
        let catalog = decode_catalog(&doc, DocumentFormat::Json).unwrap();
        let rating = catalog.get(ItemId(1)).expect("item 1").rating;
        assert_eq!(rating.to_string(), "0");

        let mut browser = CatalogBrowser::new(catalog, DEFAULT_PAGE_SIZE);
        browser.set_query(QueryUpdate::new().sort(SortKey::Rating));
        assert_eq!(ids(&browser.visible_items()), vec![1, 2]);
    }

    #[test]
    fn test_non_web_link_fails_the_load() {
        let doc = document(&[record("1", "4", "javascript:alert(1)")]);
        let err = decode_catalog(&doc, DocumentFormat::Json).unwrap_err();
        assert_eq!(field_of(err), "link");
    }

    #[test]
    fn test_duplicate_ids_fail_the_load() {
        let doc = document(&[
            record("5", "4", "https://a.example"),
            record("6", "4", "https://b.example"),
            record("5", "3", "https://c.example"),
        ]);
        match decode_catalog(&doc, DocumentFormat::Json).unwrap_err() {
            LoadError::DuplicateId { id, first, second } => {
                assert_eq!((id, first, second), (5, 0, 2));
            }
            other => panic!("expected a duplicate id, got {other}"),
        }
    }

    #[test]
    fn test_empty_document_is_an_empty_catalog() {
        let catalog = decode_catalog(r#"{"items": []}"#, DocumentFormat::Json).unwrap();
        assert!(catalog.is_empty());
    }
}

// =============================================================================
// Session Tests
// =============================================================================

mod session_tests {
    use super::*;

    /// Fails a fixed number of times, then serves the fixture
    struct FlakySource {
        failures: usize,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CatalogSource for FlakySource {
        fn describe(&self) -> String {
            "flaky".to_string()
        }

        fn format(&self) -> DocumentFormat {
            DocumentFormat::Json
        }

        async fn fetch(&self) -> Result<String, LoadError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(LoadError::Fetch {
                    url: "https://tools.example/catalog.json".to_string(),
                    message: "connection reset".to_string(),
                });
            }
            tokio::fs::read_to_string(fixture_path())
                .await
                .map_err(|e| LoadError::Io {
                    path: self.describe(),
                    message: e.to_string(),
                })
        }
    }

    #[tokio::test]
    async fn test_retry_after_failed_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = FlakySource {
            failures: 1,
            calls: calls.clone(),
        };
        let mut session = BrowseSession::open(Box::new(source), DEFAULT_PAGE_SIZE).await;

        assert_eq!(session.view_state(), ViewState::Unavailable);
        let report = session.error_report().expect("unavailable session reports");
        assert_eq!(report.code, "CATALOG_FETCH_ERROR");
        assert!(report.retryable);

        assert!(session.retry().await);
        assert_eq!(session.view_state(), ViewState::Results);
        assert_eq!(session.browser().expect("ready").catalog_size(), 20);

        // already loaded, no further fetch
        assert!(session.retry().await);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unavailable_is_not_no_matches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = FlakySource {
            failures: usize::MAX,
            calls,
        };
        let session = BrowseSession::open(Box::new(source), DEFAULT_PAGE_SIZE).await;
        assert_ne!(session.view_state(), ViewState::NoMatches);
        assert!(matches!(session.state(), SessionState::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_browse_through_session() {
        let source = FileSource::new(fixture_path()).expect("json extension");
        let mut session = BrowseSession::open(Box::new(source), 5).await;

        let browser = session.browser_mut().expect("ready");
        browser.set_query(QueryUpdate::new().search("zzz-nothing"));
        assert_eq!(browser.view_state(), ViewState::NoMatches);
        assert_eq!(session.view_state(), ViewState::NoMatches);
    }
}
