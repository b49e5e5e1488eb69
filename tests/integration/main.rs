//! Integration tests for Sitesweep
//!
//! Crawl scenarios run against a mock `PageFetcher` or a wiremock server;
//! service tests talk to a real listener on an ephemeral port.

mod crawl_tests;
mod fetcher_tests;
mod service_tests;
