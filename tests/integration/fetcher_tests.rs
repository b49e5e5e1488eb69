//! HTTP fetcher tests against a mock server

use sitesweep::config::UserAgentConfig;
use sitesweep::crawler::{FetchError, HttpFetcher, PageFetcher};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_fetcher(timeout: Duration) -> HttpFetcher {
    let config = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0".to_string(),
        contact_url: Some("https://example.com/bot".to_string()),
        contact_email: None,
    };
    HttpFetcher::from_config(&config, timeout).unwrap()
}

#[tokio::test]
async fn test_fetch_html_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .and(header("user-agent", "TestBot/1.0 (+https://example.com/bot)"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<p>About</p>", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/about", mock_server.uri());
    let page = test_fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap();

    assert_eq!(page.url, url);
    assert_eq!(page.html, "<p>About</p>");
}

#[tokio::test]
async fn test_fetch_reports_final_url_after_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>New</p>", "text/html"))
        .mount(&mock_server)
        .await;

    let page = test_fetcher(Duration::from_secs(5))
        .fetch(&format!("{}/old", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(page.url, format!("{}/new", mock_server.uri()));
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = test_fetcher(Duration::from_secs(5))
        .fetch(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_fetch_rejects_non_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x25, 0x50, 0x44, 0x46], "application/pdf"))
        .mount(&mock_server)
        .await;

    let err = test_fetcher(Duration::from_secs(5))
        .fetch(&format!("{}/report", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::ContentMismatch { content_type, .. } => {
            assert_eq!(content_type, "application/pdf")
        }
        other => panic!("expected content mismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>Slow</p>", "text/html")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let err = test_fetcher(Duration::from_millis(200))
        .fetch(&format!("{}/slow", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind and drop a listener to get a port nothing is listening on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = test_fetcher(Duration::from_secs(2))
        .fetch(&format!("http://{}/", addr))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::Connect { .. } | FetchError::Network { .. }
    ));
}
