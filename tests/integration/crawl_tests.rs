use crate::support::{listing_page, site_config, Event, RecordingReporter};
use bookshelf::config::{HttpConfig, SelectorConfig};
use bookshelf::crawler::selectors::CompiledSelectors;
use bookshelf::crawler::{plan, walk, CrawlRange, PageFetcher};
use bookshelf::ArchiveError;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> PageFetcher {
    PageFetcher::from_config(&HttpConfig::default()).expect("Failed to build fetcher")
}

fn selectors() -> CompiledSelectors {
    CompiledSelectors::compile(&SelectorConfig::default()).unwrap()
}

fn catalog_root(server: &MockServer) -> Url {
    Url::parse(&site_config(&server.uri()).site.catalog_root).unwrap()
}

async fn mount_listing(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_plan_reads_last_page() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, "/l55/", listing_page(&[], Some(4))).await;

    let reporter = RecordingReporter::default();
    let range = plan(
        &fetcher(),
        &catalog_root(&mock_server),
        2,
        None,
        &selectors(),
        &reporter,
    )
    .await
    .unwrap();

    assert_eq!(range, CrawlRange { start_page: 2, end_page: 4 });
    assert_eq!(reporter.notices(), 0);
}

#[tokio::test]
async fn test_plan_start_past_last_page_is_range_error() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, "/l55/", listing_page(&[], Some(3))).await;

    let result = plan(
        &fetcher(),
        &catalog_root(&mock_server),
        4,
        Some(8),
        &selectors(),
        &RecordingReporter::default(),
    )
    .await;

    assert!(matches!(result, Err(ArchiveError::Range(_))));
}

#[tokio::test]
async fn test_plan_fails_when_root_redirects() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/l55/"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .mount(&mock_server)
        .await;

    let result = plan(
        &fetcher(),
        &catalog_root(&mock_server),
        1,
        None,
        &selectors(),
        &RecordingReporter::default(),
    )
    .await;

    assert!(matches!(
        result,
        Err(ArchiveError::SoftFailure { status: 302, .. })
    ));
}

#[tokio::test]
async fn test_single_page_catalog_visits_one_listing_page() {
    let mock_server = MockServer::start().await;

    // Once for planning, once for walking.
    Mock::given(method("GET"))
        .and(path("/l55/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&["/b1/", "/b2/"], None)))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/l55/2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher();
    let selectors = selectors();
    let reporter = RecordingReporter::default();
    let root = catalog_root(&mock_server);

    let range = plan(&fetcher, &root, 1, Some(10), &selectors, &reporter)
        .await
        .unwrap();
    assert_eq!(range, CrawlRange { start_page: 1, end_page: 1 });
    assert_eq!(reporter.notices(), 1);

    let urls = walk(&fetcher, &root, range, &selectors, &reporter).await;
    let paths: Vec<&str> = urls.iter().map(Url::path).collect();
    assert_eq!(paths, vec!["/b1/", "/b2/"]);
}

#[tokio::test]
async fn test_walk_skips_failed_pages_and_keeps_order() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, "/l55/", listing_page(&["/b1/", "/b2/"], Some(4))).await;
    Mock::given(method("GET"))
        .and(path("/l55/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/l55/3"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .mount(&mock_server)
        .await;
    mount_listing(&mock_server, "/l55/4", listing_page(&["/b7/", "/b2/"], Some(4))).await;

    let reporter = RecordingReporter::default();
    let urls = walk(
        &fetcher(),
        &catalog_root(&mock_server),
        CrawlRange { start_page: 1, end_page: 4 },
        &selectors(),
        &reporter,
    )
    .await;

    let paths: Vec<&str> = urls.iter().map(Url::path).collect();
    assert_eq!(paths, vec!["/b1/", "/b2/", "/b7/", "/b2/"]);
    assert_eq!(
        reporter.events(),
        vec![Event::PageFailed(2), Event::PageFailed(3)]
    );
}
