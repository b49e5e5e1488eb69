//! End-to-end crawl tests

use async_trait::async_trait;
use sitesweep::config::UserAgentConfig;
use sitesweep::crawler::{
    extract_page, scrape_one, Controller, CrawlSettings, FetchError, HttpFetcher, PageFetcher,
};
use sitesweep::output::write_reports;
use sitesweep::FetchedPage;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves canned HTML keyed by URL
struct MockFetcher {
    pages: HashMap<String, String>,
}

impl MockFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        match self.pages.get(url) {
            Some(html) => Ok(FetchedPage::new(url, html.as_str())),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn test_settings(seed: &str) -> CrawlSettings {
    CrawlSettings {
        seed: seed.to_string(),
        seed_description: "Home Page".to_string(),
        run_duration: Duration::from_millis(600),
        scrapers: 3,
        extractors: 2,
        sample_interval: Duration::from_millis(100),
        poll_timeout: Duration::from_millis(20),
        scheme_distinct: false,
        blacklist: vec![],
    }
}

#[tokio::test]
async fn test_seed_page_links_enter_frontier() {
    let fetcher = MockFetcher::new(&[(
        "https://x.edu",
        r#"<html><body>
            <a href="/a">A</a>
            <a href="https://x.edu/b">B</a>
            <a href="http://x.edu/">Home again</a>
        </body></html>"#,
    )]);

    let mut controller = Controller::new(test_settings("https://x.edu"), Arc::new(NoFetch));
    controller.initialize().unwrap();
    let store = controller.store();

    let seed = store.pop_unsearched(Duration::from_millis(10)).await.unwrap();
    scrape_one(&store, &fetcher, &seed).await.unwrap();
    let page = store.pop_unextracted(Duration::from_millis(10)).await.unwrap();
    let outcome = extract_page(&store, page).unwrap();

    assert_eq!(outcome.links_found, 3);
    assert_eq!(store.seen_count(), 3);
    assert_eq!(store.discovered_count(), 3);
    assert_eq!(store.finished_count(), 1);
    assert_eq!(store.frontier_depth(), 2);

    let first = store.pop_unsearched(Duration::from_millis(10)).await.unwrap();
    let second = store.pop_unsearched(Duration::from_millis(10)).await.unwrap();
    assert_eq!(first.as_str(), "https://x.edu/a");
    assert_eq!(second.as_str(), "https://x.edu/b");
}

#[tokio::test]
async fn test_empty_anchor_gets_label() {
    let mut controller = Controller::new(test_settings("https://x.edu"), Arc::new(NoFetch));
    controller.initialize().unwrap();
    let store = controller.store();

    let page = FetchedPage::new("https://x.edu", r#"<a href="https://x.edu/about-us"></a>"#);
    extract_page(&store, page).unwrap();

    let discoveries: HashMap<String, String> = store.discoveries().into_iter().collect();
    assert_eq!(discoveries["https://x.edu/about-us"], "About Us");
    assert_eq!(discoveries["https://x.edu"], "Home Page");
}

#[tokio::test]
async fn test_controller_crawls_whole_site() {
    let fetcher = MockFetcher::new(&[
        (
            "https://www.x.edu",
            r#"<a href="/a">A</a><a href="https://lib.x.edu/">Library</a><a href="https://y.org/">Y</a>"#,
        ),
        ("https://www.x.edu/a", r#"<a href="/b">B</a><a href="/">Home</a>"#),
        ("https://www.x.edu/b", r#"<a href="/report.pdf">Report</a>"#),
        ("https://lib.x.edu", "<p>Library</p>"),
    ]);

    let report = Controller::new(test_settings("https://www.x.edu"), Arc::new(fetcher))
        .run()
        .await
        .unwrap();

    assert_eq!(report.root_domain, "x.edu");
    assert_eq!(report.finished, 4);
    assert_eq!(report.seen_count, 4);

    let urls: Vec<&str> = report.discoveries.iter().map(|(u, _)| u.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://lib.x.edu",
            "https://www.x.edu",
            "https://www.x.edu/a",
            "https://www.x.edu/b",
        ]
    );

    let seen: Vec<usize> = report.timeline.samples().iter().map(|s| s.seen).collect();
    assert_eq!(seen[0], 0);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_blacklisted_host_not_crawled() {
    let fetcher = MockFetcher::new(&[(
        "https://www.x.edu",
        r#"<a href="https://repo.x.edu/item">Repo</a><a href="https://sub.repo.x.edu/">Sub</a>"#,
    )]);

    let mut settings = test_settings("https://www.x.edu");
    settings.blacklist = vec!["REPO.x.edu".to_string()];
    let report = Controller::new(settings, Arc::new(fetcher)).run().await.unwrap();

    let urls: Vec<&str> = report.discoveries.iter().map(|(u, _)| u.as_str()).collect();
    // Exact-host blacklist: subdomains of a blacklisted host stay in scope
    assert_eq!(urls, vec!["https://sub.repo.x.edu", "https://www.x.edu"]);
}

#[tokio::test]
async fn test_crawl_against_http_server() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<html><body><a href="{0}/page1">Page 1</a><a href="/page2#top">Page 2</a>
                <a href="/files/guide.pdf">Guide</a></body></html>"#,
                base_url
            ),
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/page2">Again</a><a href="/gone">Gone</a>"#, "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>Leaf</p>", "text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: None,
        contact_email: None,
    };
    let fetcher = HttpFetcher::from_config(&user_agent, Duration::from_secs(5)).unwrap();

    let mut settings = test_settings(&format!("{}/", base_url));
    settings.run_duration = Duration::from_secs(1);
    let report = Controller::new(settings, Arc::new(fetcher)).run().await.unwrap();

    assert_eq!(report.finished, 3);
    assert_eq!(report.unique_urls(), 4);

    let results = TempDir::new().unwrap();
    let run_dir = write_reports(&report, results.path()).unwrap();

    let urls_csv = std::fs::read_to_string(run_dir.join("urls.csv")).unwrap();
    assert!(urls_csv.starts_with("URL,Description\n"));
    assert!(urls_csv.contains(&format!("{}/page1,Page 1", base_url)));
    assert!(!urls_csv.contains("guide.pdf"));

    let results_txt = std::fs::read_to_string(run_dir.join("results.txt")).unwrap();
    assert!(results_txt.contains("Number of pages scraped: 3\n"));
    assert!(results_txt.contains("Number of URLs found: 4\n"));

    let stats_csv = std::fs::read_to_string(run_dir.join("stats.csv")).unwrap();
    let mut lines = stats_csv.lines();
    assert_eq!(
        lines.next(),
        Some("time,seen_url_count,unsearched_count,unextracted_count")
    );
    assert_eq!(lines.next().map(|l| l.starts_with("0,0,")), Some(true));
}

/// Fetcher for tests that drive the store by hand
struct NoFetch;

#[async_trait]
impl PageFetcher for NoFetch {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        Err(FetchError::Network {
            url: url.to_string(),
            message: "fetching disabled".to_string(),
        })
    }
}
