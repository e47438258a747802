use bookshelf::config::HttpConfig;
use bookshelf::crawler::{FetchOutcome, PageFetcher};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> PageFetcher {
    PageFetcher::from_config(&HttpConfig::default()).expect("Failed to build fetcher")
}

fn url(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
}

#[tokio::test]
async fn test_success_returns_body_and_final_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/b1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&mock_server)
        .await;

    let target = url(&mock_server, "/b1/");
    match fetcher().fetch(&target).await {
        FetchOutcome::Success(page) => {
            assert_eq!(page.final_url, target);
            assert_eq!(page.text(), "hello");
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_is_soft_failure_regardless_of_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/txt.php"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/")
                .set_body_string("<html><div id=\"content\"><h1>Looks :: Fine</h1></div></html>"),
        )
        .mount(&mock_server)
        .await;

    let outcome = fetcher().fetch(&url(&mock_server, "/txt.php")).await;
    match outcome {
        FetchOutcome::SoftFailure {
            status_code,
            location,
        } => {
            assert_eq!(status_code, 302);
            assert_eq!(location.as_deref(), Some("/"));
        }
        other => panic!("expected soft failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/target"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/target"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = fetcher().fetch(&url(&mock_server, "/moved")).await;
    assert!(matches!(
        outcome,
        FetchOutcome::SoftFailure { status_code: 301, .. }
    ));
}

#[tokio::test]
async fn test_error_statuses_are_hard_failures() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher();
    assert!(matches!(
        fetcher.fetch(&url(&mock_server, "/broken")).await,
        FetchOutcome::HardFailure { status_code: 500 }
    ));
    // Unmatched requests get wiremock's 404.
    assert!(matches!(
        fetcher.fetch(&url(&mock_server, "/missing")).await,
        FetchOutcome::HardFailure { status_code: 404 }
    ));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let config = HttpConfig {
        timeout_secs: 1,
        ..HttpConfig::default()
    };
    let fetcher = PageFetcher::from_config(&config).unwrap();

    let outcome = fetcher.fetch(&url(&mock_server, "/slow")).await;
    assert!(matches!(outcome, FetchOutcome::TransportError { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let target = Url::parse("http://127.0.0.1:1/").unwrap();
    let outcome = fetcher().fetch(&target).await;
    assert!(matches!(outcome, FetchOutcome::TransportError { .. }));
}
