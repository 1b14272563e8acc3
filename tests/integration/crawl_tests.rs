//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use image_finder::config::Config;
use image_finder::output::{IMAGES_FILE, SITEMAP_FILE, STATS_FILE};
use image_finder::{Crawler, FinderError};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing artifacts to `output_dir`
fn create_test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.workers = 4;
    config.crawler.poll_interval_ms = 20;
    config.crawler.max_idle_ms = 2_000;
    config.crawler.drain_timeout_ms = 2_000;
    config.fetcher.timeout_ms = 1_000;
    config.fetcher.user_agent = "TestBot/1.0".to_string();
    config.output.directory = output_dir.to_path_buf();
    config
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

/// Mounts a small site:
///
/// ```text
/// /        -> /page1, /page2/, /missing, /brochure.pdf, external link
/// /page1   -> /, /page2?ref=1
/// /page2   -> (no links)
/// /missing -> 404
/// ```
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html>
            <head>
                <link rel="icon" href="/favicon.ico">
                <link rel="apple-touch-icon" href="/touch.png">
            </head>
            <body>
                <img src="/img/logo.png" alt="Company Logo">
                <img src="/img/hero.webp" alt="Hero">
                <a href="/page1">One</a>
                <a href="/page2/">Two</a>
                <a href="/missing">Missing</a>
                <a href="/brochure.pdf">Brochure</a>
                <a href="https://elsewhere.test/">Elsewhere</a>
                <a href="mailto:team@example.com">Mail</a>
            </body>
        </html>"#,
    )
    .await;

    mount_page(
        server,
        "/page1",
        r#"<html><body>
            <img src="/img/a.jpg">
            <img src="/img/a.jpg">
            <a href="/">Home</a>
            <a href="/page2?ref=1">Two</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/page2",
        r#"<html><body>
            <img src="data:image/png;base64,iVBORw0KGgo=" alt="inline">
            <img src="/img/b.svg" alt="">
        </body></html>"#,
    )
    .await;
}

fn read_json(dir: &Path, file: &str) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.join(file)).expect("artifact missing");
    serde_json::from_str(&content).expect("artifact is not JSON")
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let base = mock_server.uri();
    let seed = format!("{}/", base);
    let output_dir = TempDir::new().unwrap();

    let crawler = Crawler::new(&create_test_config(output_dir.path())).unwrap();
    let report = crawler.crawl(&seed).await.expect("crawl failed");

    let root = base.clone();
    let page1 = format!("{}/page1", base);
    let page2 = format!("{}/page2", base);
    let missing = format!("{}/missing", base);

    // Every reachable page has an Image Index entry, including the seed
    let mut pages: Vec<&String> = report.images.keys().collect();
    pages.sort();
    let mut expected = vec![&root, &missing, &page1, &page2];
    expected.sort();
    assert_eq!(pages, expected);

    let root_images = &report.images[&root];
    assert_eq!(root_images.len(), 2, "webp and second site icon are skipped");
    let logo = root_images
        .iter()
        .find(|i| i.url.ends_with("/img/logo.png"))
        .expect("logo not found");
    assert_eq!(logo.name, "Company Logo");
    assert!(logo.is_logo);
    assert!(!logo.is_favicon);
    assert_eq!(logo.domain, "127.0.0.1");
    let favicon = root_images
        .iter()
        .find(|i| i.is_favicon)
        .expect("favicon not found");
    assert!(favicon.url.ends_with("/favicon.ico"));
    assert_eq!(favicon.name, "None");

    // The duplicate <img> collapses into one record
    assert_eq!(report.images[&page1].len(), 1);

    let page2_images = &report.images[&page2];
    assert_eq!(page2_images.len(), 1);
    assert_eq!(page2_images.iter().next().unwrap().name, "None");

    assert!(report.images[&missing].is_empty());

    // Sitemap: in-domain, crawlable, canonical links only
    let root_links = &report.sitemap[&root];
    assert_eq!(root_links.len(), 3);
    assert!(root_links.contains(&page1));
    assert!(root_links.contains(&page2));
    assert!(root_links.contains(&missing));

    let page1_links = &report.sitemap[&page1];
    assert_eq!(page1_links.len(), 2);
    assert!(page1_links.contains(&root));
    assert!(page1_links.contains(&page2));

    assert!(report.sitemap[&page2].is_empty());
    assert!(report.sitemap[&missing].is_empty());

    assert_eq!(report.statistic.num_visited_links, 4);
    assert_eq!(report.statistic.num_images_extracted, 4);

    // Artifacts mirror the report
    let images = read_json(output_dir.path(), IMAGES_FILE);
    assert_eq!(images.as_object().unwrap().len(), 4);
    assert_eq!(images[&page1][0]["url"], format!("{}/img/a.jpg", base));

    let sitemap = read_json(output_dir.path(), SITEMAP_FILE);
    assert_eq!(sitemap[&page2], serde_json::json!([]));

    let stats = read_json(output_dir.path(), STATS_FILE);
    assert_eq!(stats["numVisitedLinks"], 4);
    assert_eq!(stats["numImagesExtracted"], 4);
    assert!(stats["pagesPerSecond"].is_string());
}

#[tokio::test]
async fn test_seed_with_query_is_canonicalized() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let seed = format!("{}/page1?from=test", mock_server.uri());
    let output_dir = TempDir::new().unwrap();
    let mut config = create_test_config(output_dir.path());
    config.output.write_artifacts = false;

    let report = Crawler::new(&config).unwrap().crawl(&seed).await.unwrap();

    // Links from /page1 do not start with the seed string
    let page1 = format!("{}/page1", mock_server.uri());
    assert_eq!(report.statistic.num_visited_links, 1);
    assert!(report.images.contains_key(&page1));
    assert!(report.sitemap[&page1].is_empty());
    assert!(!output_dir.path().join(STATS_FILE).exists());
}

#[tokio::test]
async fn test_invalid_seed_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", mock_server.uri());
    let output_dir = TempDir::new().unwrap();
    let crawler = Crawler::new(&create_test_config(output_dir.path())).unwrap();

    match crawler.crawl(&seed).await {
        Err(FinderError::InvalidSeed { url, message }) => {
            assert_eq!(url, seed);
            assert_eq!(message, format!("URL at '{}' returned Not Found", seed));
        }
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("crawl of a 404 seed should fail"),
    }

    assert!(!output_dir.path().join(IMAGES_FILE).exists());
}

#[tokio::test]
async fn test_invalid_seed_malformed() {
    let output_dir = TempDir::new().unwrap();
    let crawler = Crawler::new(&create_test_config(output_dir.path())).unwrap();

    let result = crawler.crawl("definitely not a url").await;
    assert!(matches!(result, Err(FinderError::InvalidSeed { .. })));

    let result = crawler.crawl("").await;
    assert!(matches!(result, Err(FinderError::InvalidSeed { .. })));
}

#[tokio::test]
async fn test_server_error_page_is_terminal() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/broken">Broken</a></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output_dir = TempDir::new().unwrap();
    let seed = format!("{}/", mock_server.uri());
    let report = Crawler::new(&create_test_config(output_dir.path()))
        .unwrap()
        .crawl(&seed)
        .await
        .unwrap();

    let broken = format!("{}/broken", mock_server.uri());
    assert!(report.images[&broken].is_empty());
    assert!(report.sitemap[&broken].is_empty());
    assert_eq!(report.statistic.num_visited_links, 2);
}

#[tokio::test]
async fn test_unwritable_output_dir_does_not_fail_crawl() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("occupied");
    std::fs::write(&blocker, "not a directory").unwrap();

    let seed = format!("{}/", mock_server.uri());
    let report = Crawler::new(&create_test_config(&blocker))
        .unwrap()
        .crawl(&seed)
        .await
        .expect("artifact failures are logged, not returned");

    assert_eq!(report.statistic.num_visited_links, 4);
}

#[tokio::test]
async fn test_non_html_page_is_recorded_empty() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/feed">Feed</a></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<a href="/hidden">Hidden</a><img src="/x.png">"#,
            "application/octet-stream",
        ))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/hidden", "<html><body></body></html>").await;

    let output_dir = TempDir::new().unwrap();
    let seed = format!("{}/", mock_server.uri());
    let report = Crawler::new(&create_test_config(output_dir.path()))
        .unwrap()
        .crawl(&seed)
        .await
        .unwrap();

    let feed = format!("{}/feed", mock_server.uri());
    let hidden = format!("{}/hidden", mock_server.uri());
    assert!(report.images[&feed].is_empty());
    assert!(report.sitemap[&feed].is_empty());
    assert!(!report.sitemap.contains_key(&hidden));
    assert_eq!(report.statistic.num_visited_links, 2);
}

#[tokio::test]
async fn test_xhtml_page_is_parsed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body><a href="/next">Next</a><img src="/pic.gif"></body></html>"#,
            "application/xhtml+xml; charset=utf-8",
        ))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/next", "<html><body></body></html>").await;

    let output_dir = TempDir::new().unwrap();
    let seed = format!("{}/", mock_server.uri());
    let report = Crawler::new(&create_test_config(output_dir.path()))
        .unwrap()
        .crawl(&seed)
        .await
        .unwrap();

    assert_eq!(report.images[&mock_server.uri()].len(), 1);
    assert!(report.sitemap.contains_key(&format!("{}/next", mock_server.uri())));
}
