//! Frontier service tests over real HTTP

use serde_json::{json, Value};
use sitesweep::config::ServiceConfig;
use sitesweep::service::{self, register, Registration, ServiceError, ServiceHandle};
use sitesweep::{FetchedPage, FrontierStore};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn local_config(registry_url: Option<String>) -> ServiceConfig {
    ServiceConfig {
        bind_address: "127.0.0.1:0".to_string(),
        service_name: "WebScraperDB".to_string(),
        registry_url,
    }
}

async fn start_service(blacklist: Vec<String>) -> (Arc<FrontierStore>, ServiceHandle) {
    let store = Arc::new(FrontierStore::new(blacklist, false));
    let handle = service::start(store.clone(), &local_config(None)).await.unwrap();
    (store, handle)
}

async fn get_json(url: String) -> Value {
    reqwest::get(url).await.unwrap().json().await.unwrap()
}

async fn post_json(url: String, body: Value) -> reqwest::Response {
    reqwest::Client::new().post(url).json(&body).send().await.unwrap()
}

#[tokio::test]
async fn test_ping() {
    let (_store, handle) = start_service(vec![]).await;

    let body = get_json(format!("{}/api/ping", handle.uri())).await;
    assert_eq!(body, json!({ "pong": true }));

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_remote_claim_and_queue() {
    let (store, handle) = start_service(vec![]).await;
    let base = handle.uri();

    let first: Value = post_json(format!("{}/api/seen", base), json!({ "url": "https://x.edu/a/" }))
        .await
        .json()
        .await
        .unwrap();
    let second: Value = post_json(format!("{}/api/seen", base), json!({ "url": "http://x.edu/a" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(first["claimed"], json!(true));
    assert_eq!(second["claimed"], json!(false));

    post_json(format!("{}/api/frontier/push", base), json!({ "url": "https://x.edu/a" })).await;
    assert_eq!(store.frontier_depth(), 1);

    let popped = get_json(format!("{}/api/frontier/pop?timeout_ms=50", base)).await;
    assert_eq!(popped["url"], json!("https://x.edu/a"));

    let empty = get_json(format!("{}/api/frontier/pop?timeout_ms=50", base)).await;
    assert_eq!(empty["url"], Value::Null);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_remote_page_queue_round_trip() {
    let (_store, handle) = start_service(vec![]).await;
    let base = handle.uri();

    let page = FetchedPage::new("https://x.edu/", "<p>Hi</p>");
    let pushed: Value = reqwest::Client::new()
        .post(format!("{}/api/pages/push", base))
        .json(&page)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pushed["accepted"], json!(true));

    let popped = get_json(format!("{}/api/pages/pop?timeout_ms=50", base)).await;
    let returned: FetchedPage = serde_json::from_value(popped["page"].clone()).unwrap();
    assert_eq!(returned, page);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_remote_scope_and_shutdown() {
    let (store, handle) = start_service(vec!["ask.x.edu".to_string()]).await;
    let base = handle.uri();

    let root: Value = post_json(
        format!("{}/api/root-domain", base),
        json!({ "url": "https://www.x.edu" }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(root["root_domain"], json!("x.edu"));

    let scope: Value = post_json(format!("{}/api/scope", base), json!({ "url": "https://ask.x.edu/faq" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(scope, json!({ "in_scope": true, "blacklisted": true }));

    let before = get_json(format!("{}/api/shutdown", base)).await;
    assert_eq!(before["shutdown"], json!(false));

    post_json(format!("{}/api/shutdown", base), json!({})).await;
    assert!(store.is_shutdown());

    let refused: Value = post_json(format!("{}/api/frontier/push", base), json!({ "url": "https://x.edu/late" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(refused["accepted"], json!(false));

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_remote_discoveries_and_finished() {
    let (store, handle) = start_service(vec![]).await;
    let base = handle.uri();

    let url = store.canonicalize("https://x.edu/news").unwrap();
    store.add_to_seen(&url);

    let recorded: Value = post_json(
        format!("{}/api/discoveries", base),
        json!({ "url": "https://x.edu/news", "description": "News" }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(recorded["recorded"], json!(true));

    let listed = get_json(format!("{}/api/discoveries", base)).await;
    assert_eq!(listed, json!([{ "url": "https://x.edu/news", "description": "News" }]));

    let finished: Value = post_json(format!("{}/api/finished", base), json!({}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(finished["finished"], json!(1));

    let stats = get_json(format!("{}/api/stats", base)).await;
    assert_eq!(stats["seen"], json!(1));
    assert_eq!(stats["finished"], json!(1));

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_invalid_url_is_bad_request() {
    let (_store, handle) = start_service(vec![]).await;

    let response = post_json(
        format!("{}/api/seen", handle.uri()),
        json!({ "url": "ftp://x.edu/file" }),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_register_posts_name_and_uri() {
    let registry = MockServer::start().await;
    let registration = Registration {
        name: "WebScraperDB".to_string(),
        uri: "http://127.0.0.1:9091".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(&registration))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&registry)
        .await;

    register(&format!("{}/", registry.uri()), &registration)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_start_registers_with_registry() {
    let registry = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&registry)
        .await;

    let store = Arc::new(FrontierStore::new(vec![], false));
    let handle = service::start(store, &local_config(Some(registry.uri())))
        .await
        .unwrap();

    let requests = registry.received_requests().await.unwrap();
    let body: Registration = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body.name, "WebScraperDB");
    assert_eq!(body.uri, handle.uri());

    handle.stop().await.unwrap();
}

#[tokio::test]
async fn test_registry_failure_is_fatal() {
    let registry = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&registry)
        .await;

    let store = Arc::new(FrontierStore::new(vec![], false));
    let err = service::start(store, &local_config(Some(registry.uri())))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Registry { .. }));
}

#[tokio::test]
async fn test_bind_failure_is_fatal() {
    let (_store, running) = start_service(vec![]).await;

    let config = ServiceConfig {
        bind_address: running.local_addr().to_string(),
        ..local_config(None)
    };
    let err = service::start(Arc::new(FrontierStore::new(vec![], false)), &config)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Bind { .. }));
    running.stop().await.unwrap();
}
