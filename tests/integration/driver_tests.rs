//! Integration tests for the page-cycle driver
//!
//! These tests run real extractors and stores against an in-memory host, so
//! every cycle is deterministic and no network is involved.

use async_trait::async_trait;
use paged_harvest::config::{PaletteSelectors, ProjectSelectors};
use paged_harvest::crawler::{
    Coordinator, Driver, Host, LinkTextLocator, PageLink, SelectorLocator, Timer,
};
use paged_harvest::extract::{Page, PaletteExtractor, ProjectExtractor};
use paged_harvest::output::{CrawlEnd, CycleOutcome};
use paged_harvest::storage::{shared, MemoryBlobStore, RecordRepository, SharedStore, SqliteBlobStore};
use paged_harvest::{CycleState, HarvestError, PaletteRecord, ProjectRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Serves fixed HTML per URL and records navigation
struct FakeHost {
    pages: HashMap<String, String>,
    current: Url,
    followed: Vec<String>,
}

impl FakeHost {
    fn new(start: &str) -> Self {
        Self {
            pages: HashMap::new(),
            current: Url::parse(start).unwrap(),
            followed: Vec::new(),
        }
    }

    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl Host for FakeHost {
    async fn document(&mut self) -> paged_harvest::Result<Page> {
        match self.pages.get(self.current.as_str()) {
            Some(html) => Ok(Page::parse(self.current.clone(), html)),
            None => Err(HarvestError::DocumentUnavailable {
                url: self.current.to_string(),
                reason: "not loaded".to_string(),
            }),
        }
    }

    async fn follow(&mut self, link: &PageLink) -> paged_harvest::Result<()> {
        self.followed.push(link.to_string());
        self.current = link.url().clone();
        Ok(())
    }
}

/// Records requested delays instead of sleeping
#[derive(Default)]
struct RecordingTimer {
    delays: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Timer for RecordingTimer {
    async fn settle(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

fn grid_item(url: &str, subtitle: &str) -> String {
    format!(
        r#"<div class="grid-item">
             <a href="{url}"><div class="lead_image_image" style='background-image: url("{url}/lead.jpg")'></div></a>
             <div class="title"><h1>Title</h1><h2>{subtitle}</h2></div>
             <h5>Noted Jan.02.2024 <a href="{url}#comments">No Comments</a></h5>
           </div>"#,
        url = url,
        subtitle = subtitle
    )
}

fn archive(items: &[String], older: Option<&str>) -> String {
    let older = older
        .map(|href| format!(r#"<div class="nav"><a href="{}">Older Posts</a></div>"#, href))
        .unwrap_or_default();
    format!("<html><body>{}{}</body></html>", items.concat(), older)
}

fn project(url: &str) -> ProjectRecord {
    ProjectRecord {
        website_url: url.to_string(),
        image_url: String::new(),
        title: None,
        sub_title: String::new(),
        project_type: None,
        action: "Noted".to_string(),
        date: String::new(),
        comment_count: 0,
        favorite_count: None,
    }
}

fn project_driver(store: SharedStore, timer: Arc<RecordingTimer>) -> Driver<ProjectExtractor> {
    Driver::new(
        ProjectExtractor::new(&ProjectSelectors::default()).unwrap(),
        Box::new(LinkTextLocator::new("Older Posts").unwrap()),
        RecordRepository::new(store, "projects"),
        timer,
        Duration::from_millis(2000),
    )
}

fn palette_driver(store: SharedStore) -> Driver<PaletteExtractor> {
    Driver::new(
        PaletteExtractor::new(&PaletteSelectors::default()).unwrap(),
        Box::new(SelectorLocator::new(".paging a.pagination__next").unwrap()),
        RecordRepository::new(store, "palettes"),
        Arc::new(RecordingTimer::default()),
        Duration::from_millis(2000),
    )
}

#[tokio::test]
async fn test_only_new_urls_are_added() {
    let store = shared(MemoryBlobStore::new());
    let repo: RecordRepository<ProjectRecord> = RecordRepository::new(Arc::clone(&store), "projects");
    repo.save(&[project("https://example.com/p/persisted")]).unwrap();

    let html = archive(
        &[
            grid_item("https://example.com/p/one", "New Logo for One"),
            grid_item("https://example.com/p/persisted", "Reviewed"),
            grid_item("https://example.com/p/two", "Spotted"),
        ],
        None,
    );
    let mut host = FakeHost::new("https://example.com/archive/").with_page("https://example.com/archive/", &html);
    let mut driver = project_driver(Arc::clone(&store), Arc::new(RecordingTimer::default()));

    let report = driver.run_cycle(&mut host).await.unwrap();

    assert_eq!(report.extracted, 3);
    assert_eq!(report.added, 2);
    assert_eq!(report.collection_size, 3);

    let stored = repo.load().unwrap();
    let urls: Vec<&str> = stored.iter().map(|r| r.website_url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/p/persisted",
            "https://example.com/p/one",
            "https://example.com/p/two",
        ]
    );
    // The persisted entry is not overwritten by the re-extracted one
    assert_eq!(stored[0].sub_title, "");
}

#[tokio::test]
async fn test_missing_pagination_terminates_after_persisting() {
    let store = shared(MemoryBlobStore::new());
    let html = archive(&[grid_item("https://example.com/p/last", "New")], None);
    let mut host = FakeHost::new("https://example.com/archive/page/9/")
        .with_page("https://example.com/archive/page/9/", &html);
    let mut driver = project_driver(Arc::clone(&store), Arc::new(RecordingTimer::default()));

    let report = driver.run_cycle(&mut host).await.unwrap();

    assert_eq!(report.outcome, CycleOutcome::Terminated);
    assert_eq!(driver.state(), CycleState::Terminated);
    assert!(host.followed.is_empty());

    let repo: RecordRepository<ProjectRecord> = RecordRepository::new(store, "projects");
    assert_eq!(repo.load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_next_link_is_followed() {
    let store = shared(MemoryBlobStore::new());
    let html = archive(
        &[grid_item("https://example.com/p/a", "New")],
        Some("/archive/page/2/"),
    );
    let mut host = FakeHost::new("https://example.com/archive/").with_page("https://example.com/archive/", &html);
    let mut driver = project_driver(store, Arc::new(RecordingTimer::default()));

    let report = driver.run_cycle(&mut host).await.unwrap();

    assert_eq!(
        report.outcome,
        CycleOutcome::Navigated {
            next: Url::parse("https://example.com/archive/page/2/").unwrap()
        }
    );
    assert_eq!(driver.state(), CycleState::Navigated);
    assert_eq!(host.followed, vec!["https://example.com/archive/page/2/"]);
}

#[tokio::test]
async fn test_duplicate_swatches_appear_once() {
    let store = shared(MemoryBlobStore::new());
    let html = r#"<html><body>
        <div class="detail-row">
          <div class="meta"><div class="big-number-label"><h4>2,310</h4></div></div>
          <div class="detail-row-overlay">
            <div class="c" style="background-color: rgb(10, 20, 30)"></div>
            <div class="c" style="background-color: rgb(10, 20, 30)"></div>
          </div>
        </div>
      </body></html>"#;
    let mut host = FakeHost::new("https://palettes.example.com/1").with_page("https://palettes.example.com/1", html);
    let mut driver = palette_driver(Arc::clone(&store));

    driver.run_cycle(&mut host).await.unwrap();

    let repo: RecordRepository<PaletteRecord> = RecordRepository::new(store, "palettes");
    assert_eq!(
        repo.load().unwrap(),
        vec![PaletteRecord {
            favorite_number: 2310,
            colors: vec!["#0A141E".to_string()],
        }]
    );
}

#[tokio::test]
async fn test_settle_delay_precedes_every_read() {
    let timer = Arc::new(RecordingTimer::default());
    let store = shared(MemoryBlobStore::new());
    let html = archive(&[grid_item("https://example.com/p/a", "New")], None);
    let mut host = FakeHost::new("https://example.com/").with_page("https://example.com/", &html);
    let mut driver = project_driver(store, Arc::clone(&timer));

    driver.run_cycle(&mut host).await.unwrap();
    driver.run_cycle(&mut host).await.unwrap();

    assert_eq!(
        *timer.delays.lock().unwrap(),
        vec![Duration::from_millis(2000), Duration::from_millis(2000)]
    );
}

#[tokio::test]
async fn test_corrupt_store_starts_empty_and_keeps_backup() {
    let store = shared(MemoryBlobStore::new().with_blob("projects", "[{\"websiteURL\":"));
    let html = archive(&[grid_item("https://example.com/p/fresh", "New")], None);
    let mut host = FakeHost::new("https://example.com/").with_page("https://example.com/", &html);
    let mut driver = project_driver(Arc::clone(&store), Arc::new(RecordingTimer::default()));

    let report = driver.run_cycle(&mut host).await.unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.collection_size, 1);

    let keys = store.lock().unwrap().keys().unwrap();
    assert!(keys.iter().any(|k| k.starts_with("projects.corrupt.")));

    let repo: RecordRepository<ProjectRecord> = RecordRepository::new(store, "projects");
    assert_eq!(repo.load().unwrap()[0].website_url, "https://example.com/p/fresh");
}

#[tokio::test]
async fn test_unreadable_page_leaves_collection_untouched() {
    let store = shared(MemoryBlobStore::new());
    let repo: RecordRepository<ProjectRecord> = RecordRepository::new(Arc::clone(&store), "projects");
    repo.save(&[project("https://example.com/p/kept")]).unwrap();

    let mut host = FakeHost::new("https://example.com/gone");
    let mut driver = project_driver(Arc::clone(&store), Arc::new(RecordingTimer::default()));

    let err = driver.run_cycle(&mut host).await.unwrap_err();
    assert!(matches!(err, HarvestError::DocumentUnavailable { .. }));
    assert_eq!(repo.load().unwrap(), vec![project("https://example.com/p/kept")]);
}

#[tokio::test]
async fn test_rerunning_listing_adds_nothing() {
    let store = shared(MemoryBlobStore::new());
    let html = archive(
        &[
            grid_item("https://example.com/p/a", "New"),
            grid_item("https://example.com/p/b", "Spotted"),
        ],
        None,
    );
    let mut host = FakeHost::new("https://example.com/").with_page("https://example.com/", &html);
    let mut driver = project_driver(store, Arc::new(RecordingTimer::default()));

    let first = driver.run_cycle(&mut host).await.unwrap();
    let second = driver.run_cycle(&mut host).await.unwrap();

    assert_eq!(first.added, 2);
    assert_eq!(second.added, 0);
    assert_eq!(second.collection_size, 2);
}

#[tokio::test]
async fn test_coordinator_walks_all_pages_into_sqlite() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("harvest.db");
    let store = shared(SqliteBlobStore::new(&db_path).unwrap());

    let host = FakeHost::new("https://example.com/archive/")
        .with_page(
            "https://example.com/archive/",
            &archive(
                &[
                    grid_item("https://example.com/p/1", "New"),
                    grid_item("https://example.com/p/2", "New"),
                ],
                Some("/archive/page/2/"),
            ),
        )
        .with_page(
            "https://example.com/archive/page/2/",
            &archive(
                &[
                    grid_item("https://example.com/p/2", "New"),
                    grid_item("https://example.com/p/3", "Reviewed"),
                ],
                Some("/archive/page/3/"),
            ),
        )
        .with_page(
            "https://example.com/archive/page/3/",
            &archive(&[grid_item("https://example.com/p/4", "Spotted")], None),
        );

    let mut coordinator = Coordinator::new(
        project_driver(Arc::clone(&store), Arc::new(RecordingTimer::default())),
        host,
        None,
    );
    let summary = coordinator.run().await;

    assert_eq!(summary.end, CrawlEnd::Exhausted);
    assert_eq!(summary.pages, 3);
    assert_eq!(summary.added, 4);
    assert_eq!(summary.collection_size, 4);
    assert_eq!(coordinator.host().followed.len(), 2);

    drop(coordinator);
    drop(store);

    // Reopen from disk: order is preserved
    let reopened = shared(SqliteBlobStore::new(&db_path).unwrap());
    let repo: RecordRepository<ProjectRecord> = RecordRepository::new(reopened, "projects");
    let urls: Vec<String> = repo
        .load()
        .unwrap()
        .into_iter()
        .map(|r| r.website_url)
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/p/1",
            "https://example.com/p/2",
            "https://example.com/p/3",
            "https://example.com/p/4",
        ]
    );
}

#[tokio::test]
async fn test_coordinator_respects_max_pages() {
    let store = shared(MemoryBlobStore::new());
    let host = FakeHost::new("https://example.com/1")
        .with_page(
            "https://example.com/1",
            &archive(&[grid_item("https://example.com/p/1", "New")], Some("/2")),
        )
        .with_page(
            "https://example.com/2",
            &archive(&[grid_item("https://example.com/p/2", "New")], Some("/3")),
        );

    let mut coordinator = Coordinator::new(
        project_driver(store, Arc::new(RecordingTimer::default())),
        host,
        Some(1),
    );
    let summary = coordinator.run().await;

    assert_eq!(summary.end, CrawlEnd::PageLimit(1));
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.added, 1);
}

#[tokio::test]
async fn test_coordinator_reports_failed_page() {
    let store = shared(MemoryBlobStore::new());
    let host = FakeHost::new("https://example.com/1").with_page(
        "https://example.com/1",
        &archive(&[grid_item("https://example.com/p/1", "New")], Some("/missing")),
    );

    let mut coordinator = Coordinator::new(
        project_driver(Arc::clone(&store), Arc::new(RecordingTimer::default())),
        host,
        None,
    );
    let summary = coordinator.run().await;

    assert!(summary.is_failure());
    assert_eq!(summary.pages, 1);
    match summary.end {
        CrawlEnd::Failed { url, .. } => assert_eq!(url, "https://example.com/missing"),
        other => panic!("unexpected end: {:?}", other),
    }

    let repo: RecordRepository<ProjectRecord> = RecordRepository::new(store, "projects");
    assert_eq!(repo.load().unwrap().len(), 1);
}
