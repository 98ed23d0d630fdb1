//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, including the sitemap file.

use sitemapper::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use sitemapper::crawler::{run_crawl, Crawler};
use sitemapper::SitemapperError;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the given server
fn create_test_config(base_url: &str, max_links: usize, sitemap_path: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            target_url: Some(format!("{}/", base_url)),
            base_url: Some(base_url.to_string()),
            max_links,
            max_concurrency: 4,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
        output: OutputConfig {
            sitemap_path: sitemap_path.to_string(),
        },
    }
}

fn html_page(links: &[String]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", anchors))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, links: &[String]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(links))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_writes_sitemap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &[
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
            "https://elsewhere.example/".to_string(),
        ],
    )
    .await;
    mount_page(&mock_server, "/page1", &[format!("{}/page2", base_url)]).await;
    mount_page(&mock_server, "/page2", &[format!("{}/", base_url)]).await;

    let dir = tempdir().expect("Failed to create temp dir");
    let sitemap_path = dir.path().join("sitemap.xml");
    let config = create_test_config(&base_url, 100, sitemap_path.to_str().unwrap());

    let summary = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(summary.urls_discovered, 3);
    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.pages_failed, 0);

    let xml = std::fs::read_to_string(&sitemap_path).expect("Sitemap not written");
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
    assert_eq!(xml.matches("<url>").count(), 3);
    assert!(xml.contains(&format!("<loc>{}/</loc>", base_url)));
    assert!(xml.contains(&format!("<loc>{}/page1</loc>", base_url)));
    assert!(xml.contains(&format!("<loc>{}/page2</loc>", base_url)));
    assert!(!xml.contains("elsewhere.example"));
}

#[tokio::test]
async fn test_not_found_page_is_listed_but_not_expanded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &[format!("{}/gone", base_url), format!("{}/alive", base_url)],
    )
    .await;
    mount_page(&mock_server, "/alive", &[]).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(format!(r#"<a href="{}/secret">x</a>"#, base_url)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let sitemap_path = dir.path().join("sitemap.xml");
    let config = create_test_config(&base_url, 100, sitemap_path.to_str().unwrap());

    let summary = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(summary.pages_failed, 1);
    let xml = std::fs::read_to_string(&sitemap_path).unwrap();
    assert!(xml.contains(&format!("<loc>{}/gone</loc>", base_url)));
    assert!(!xml.contains("/secret"));
}

#[tokio::test]
async fn test_shared_link_is_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let shared = format!("{}/shared", base_url);

    mount_page(
        &mock_server,
        "/",
        &[format!("{}/left", base_url), format!("{}/right", base_url)],
    )
    .await;
    mount_page(&mock_server, "/left", &[shared.clone()]).await;
    mount_page(&mock_server, "/right", &[shared.clone()]).await;
    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html_page(&[format!("{}/left", base_url)]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url, 100, "unused.xml");
    config.crawler.max_concurrency = 0;
    let crawler = Crawler::from_config(&config).expect("Failed to create crawler");

    crawler.start(&format!("{}/", base_url)).await.expect("Crawl failed");

    let exported = crawler.export();
    assert_eq!(exported.len(), 4);
    assert_eq!(exported.iter().filter(|u| **u == shared).count(), 1);
}

#[tokio::test]
async fn test_link_budget_limits_sitemap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let children: Vec<String> = (0..10).map(|i| format!("{}/p{}", base_url, i)).collect();
    mount_page(&mock_server, "/", &children).await;
    for i in 0..10 {
        mount_page(&mock_server, &format!("/p{}", i), &[format!("{}/", base_url)]).await;
    }

    let dir = tempdir().unwrap();
    let sitemap_path = dir.path().join("sitemap.xml");
    let mut config = create_test_config(&base_url, 5, sitemap_path.to_str().unwrap());
    config.crawler.max_concurrency = 1;

    let summary = run_crawl(config).await.expect("Crawl failed");

    assert!(summary.stopped_early);
    assert_eq!(summary.urls_discovered, 5);
    let xml = std::fs::read_to_string(&sitemap_path).unwrap();
    assert_eq!(xml.matches("<url>").count(), 5);
}

#[tokio::test]
async fn test_unwritable_sitemap_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/", &[]).await;

    let dir = tempdir().unwrap();
    let sitemap_path = dir.path().join("no-such-dir").join("sitemap.xml");
    let config = create_test_config(&base_url, 10, sitemap_path.to_str().unwrap());

    let result = run_crawl(config).await;

    assert!(matches!(result, Err(SitemapperError::Sitemap(_))));
    assert!(!sitemap_path.exists());
}

#[tokio::test]
async fn test_failing_target_still_writes_seed() {
    // No mocks mounted: every request is answered with 404
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    let dir = tempdir().unwrap();
    let sitemap_path = dir.path().join("sitemap.xml");
    let config = create_test_config(&uri, 10, sitemap_path.to_str().unwrap());

    let summary = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(summary.urls_discovered, 1);
    assert_eq!(summary.pages_failed, 1);
    let xml = std::fs::read_to_string(&sitemap_path).unwrap();
    assert!(xml.contains(&format!("<loc>{}/</loc>", uri)));
}
