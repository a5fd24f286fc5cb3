//! Integration tests for the crawler
//!
//! These tests use wiremock to serve the catalog pages and run both crawl
//! modes end-to-end against a temporary SQLite store.

use repack_scraper::browser::{HttpPageDriver, PageDriver};
use repack_scraper::config::{config_from_parts, Config};
use repack_scraper::crawler::{run_az_crawl, run_latest_crawl};
use repack_scraper::storage::{SqliteStorage, Storage};
use repack_scraper::{BrowserError, ScraperError};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing both crawls at the mock server
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let db_path = dir.path().join("repacks.db");
    let database_url = format!("sqlite:///{}", db_path.display());

    let mut config =
        config_from_parts(Some(&database_url), None).expect("Failed to build test config");
    config.crawler.az_start_url = format!("{}/all-my-repacks-a-z/", base_url);
    config.crawler.latest_start_url = format!("{}/", base_url);
    config.crawler.settle_delay_ms = 0; // No pauses in tests
    config.crawler.visit_delay_ms = 0;
    config.crawler.title_timeout_ms = 500;
    config.crawler.request_timeout_secs = 5;
    config
}

fn index_page(items: &[(&str, &str)], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><ul class=\"lcp_catlist\">");
    for (title, link) in items {
        html.push_str(&format!("<li><a href=\"{}\">{}</a></li>", link, title));
    }
    html.push_str("</ul>");
    if let Some(next) = next {
        html.push_str(&format!(
            "<div class=\"lcp_paginator\"><a href=\"{}\">Next Page</a></div>",
            next
        ));
    }
    html.push_str("</body></html>");
    html
}

fn detail_page(title: &str) -> String {
    format!(
        "<html><body><article><h1 class=\"entry-title\">{}</h1></article></body></html>",
        title
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_az_crawl_follows_next_page() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_html(
        &server,
        "/all-my-repacks-a-z/",
        index_page(
            &[
                ("Alpha Game", &format!("{}/alpha-game/", base_url)),
                ("Beta Game", "/beta-game/"),
            ],
            Some("/all-my-repacks-a-z/page-2/"),
        ),
    )
    .await;
    mount_html(
        &server,
        "/all-my-repacks-a-z/page-2/",
        index_page(&[("Gamma Game", "/gamma-game/"), ("", "/untitled/")], None),
    )
    .await;

    let config = create_test_config(&base_url, &dir);
    let report = run_az_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages, 2);
    assert_eq!(report.items_seen, 4);
    assert_eq!(report.records_extracted, 3);
    assert_eq!(report.items_skipped, 1);
    assert_eq!(report.inserted, 3);

    let storage = SqliteStorage::from_config(&config.database).unwrap();
    assert_eq!(storage.count_entries().unwrap(), 3);

    let beta = storage
        .find_by_link(&format!("{}/beta-game/", base_url))
        .unwrap()
        .expect("Relative link should be stored as absolute");
    assert_eq!(beta.title, "Beta Game");
}

#[tokio::test]
async fn test_az_crawl_rerun_inserts_nothing() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_html(
        &server,
        "/all-my-repacks-a-z/",
        index_page(
            &[("Alpha Game", "/alpha-game/"), ("Beta Game", "/beta-game/")],
            None,
        ),
    )
    .await;

    let config = create_test_config(&base_url, &dir);

    let first = run_az_crawl(&config).await.unwrap();
    assert_eq!(first.inserted, 2);

    let second = run_az_crawl(&config).await.unwrap();
    assert_eq!(second.records_extracted, 2);
    assert_eq!(second.inserted, 0);

    let storage = SqliteStorage::from_config(&config.database).unwrap();
    assert_eq!(storage.count_entries().unwrap(), 2);
}

#[tokio::test]
async fn test_az_crawl_keeps_pages_committed_before_failure() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_html(
        &server,
        "/all-my-repacks-a-z/",
        index_page(
            &[("Alpha Game", "/alpha-game/"), ("Beta Game", "/beta-game/")],
            Some("/all-my-repacks-a-z/page-2/"),
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/all-my-repacks-a-z/page-2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&base_url, &dir);
    let result = run_az_crawl(&config).await;

    assert!(matches!(
        result,
        Err(ScraperError::Browser(BrowserError::Status { status: 500, .. }))
    ));

    // The first page was committed before the failing click
    let storage = SqliteStorage::from_config(&config.database).unwrap();
    assert_eq!(storage.count_entries().unwrap(), 2);
}

#[tokio::test]
async fn test_az_crawl_missing_start_page_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let config = create_test_config(&server.uri(), &dir);
    let result = run_az_crawl(&config).await;

    assert!(matches!(
        result,
        Err(ScraperError::Browser(BrowserError::Status { status: 404, .. }))
    ));

    let storage = SqliteStorage::from_config(&config.database).unwrap();
    assert_eq!(storage.count_entries().unwrap(), 0);
}

#[tokio::test]
async fn test_latest_crawl_skips_detail_without_title() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_html(
        &server,
        "/",
        format!(
            "<html><body>\
             <div class=\"wplp-box-item\"><a href=\"{0}/game-one/\"><img src=\"a.jpg\"></a></div>\
             <div class=\"wplp-box-item\"><a href=\"{0}/game-two/\"><img src=\"b.jpg\"></a></div>\
             <div class=\"wplp-box-item\"><a href=\"{0}/game-three/\"><img src=\"c.jpg\"></a></div>\
             </body></html>",
            base_url
        ),
    )
    .await;
    mount_html(&server, "/game-one/", detail_page("Game One")).await;
    mount_html(
        &server,
        "/game-two/",
        "<html><body><p>No heading here</p></body></html>".to_string(),
    )
    .await;
    // game-three is not mounted and answers 404

    let config = create_test_config(&base_url, &dir);
    let report = run_latest_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.seeds, 3);
    assert_eq!(report.records_extracted, 1);
    assert_eq!(report.seeds_skipped, 2);
    assert_eq!(report.inserted, 1);

    let storage = SqliteStorage::from_config(&config.database).unwrap();
    let entries = storage.list_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Game One");
    assert_eq!(entries[0].link, format!("{}/game-one/", base_url));
}

#[tokio::test]
async fn test_latest_crawl_feed_failure_is_fatal() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(&base_url, &dir);
    let result = run_latest_crawl(&config).await;

    assert!(matches!(
        result,
        Err(ScraperError::Browser(BrowserError::Status { status: 503, .. }))
    ));

    let storage = SqliteStorage::from_config(&config.database).unwrap();
    assert_eq!(storage.count_entries().unwrap(), 0);
}

#[tokio::test]
async fn test_http_driver_reports_status_errors() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);

    let mut driver = HttpPageDriver::new(&config).unwrap();
    let result = driver.goto(&format!("{}/nowhere/", server.uri())).await;

    assert!(matches!(
        result,
        Err(BrowserError::Status { status: 404, .. })
    ));
    assert!(driver.current_url().is_none());
}

#[tokio::test]
async fn test_config_file_overrides_start_urls() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let dir = TempDir::new().unwrap();

    mount_html(
        &server,
        "/custom-index/",
        index_page(&[("Only Game", "/only-game/")], None),
    )
    .await;

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[crawler]
az-start-url = "{}/custom-index/"
settle-delay-ms = 0
visit-delay-ms = 0

[user-agent]
value = "RepackScraperTest/1.0"
"#,
        base_url
    )
    .unwrap();

    let database_url = format!("sqlite:{}", dir.path().join("custom.db").display());
    let config = config_from_parts(Some(&database_url), Some(file.path())).unwrap();
    assert_eq!(config.user_agent.value, "RepackScraperTest/1.0");

    let report = run_az_crawl(&config).await.unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(report.inserted, 1);
}
