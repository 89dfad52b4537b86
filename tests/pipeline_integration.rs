//! Integration tests for the download pipeline and harvest engine.
//!
//! These tests drive the public API against wiremock servers and check what
//! ends up on disk.

use std::path::Path;

use harvester_core::{
    DownloadError, DownloadOutcome, HarvestEngine, HttpClient, derive_filename, download_pdf,
    extract_unique_pdf_links,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

fn pdf_response(body: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "application/pdf")
        .set_body_bytes(body.to_vec())
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("output dir readable").count()
}

#[tokio::test]
async fn test_second_run_skips_and_leaves_bytes_unchanged() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .and(path("/sds/acetone.pdf"))
        .respond_with(pdf_response(b"%PDF-1.7 acetone sheet"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new();
    let url = format!("{}/sds/acetone.pdf", mock_server.uri());

    let first = download_pdf(&client, &url, temp_dir.path()).await;
    assert!(first.is_success(), "first run: {first:?}");
    let saved = first.file_path().expect("success has a path").to_path_buf();
    let before = std::fs::read(&saved).expect("saved file readable");

    let second = download_pdf(&client, &url, temp_dir.path()).await;
    assert!(second.is_skipped(), "second run: {second:?}");
    assert_eq!(second.file_path(), Some(saved.as_path()));
    assert_eq!(std::fs::read(&saved).expect("still readable"), before);
    assert_eq!(file_count(temp_dir.path()), 1);
}

#[tokio::test]
async fn test_duplicate_links_on_page_download_once() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .and(path("/a.pdf"))
        .respond_with(pdf_response(b"%PDF a"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/a.pdf", mock_server.uri());
    let html = format!(r#"<a href="{url}">one</a><p><a href="{url}">two</a></p>"#);
    let urls = extract_unique_pdf_links(&html);
    assert_eq!(urls, vec![url.clone()]);

    let engine = HarvestEngine::default();
    let report = engine.run(&HttpClient::new(), &urls, temp_dir.path()).await;

    assert_eq!(report.total(), 1);
    assert_eq!(report.succeeded(), 1);
}

#[tokio::test]
async fn test_html_content_type_is_rejected_without_creating_file() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .and(path("/login.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .set_body_bytes("<html>please sign in</html>".as_bytes()),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/login.pdf", mock_server.uri());
    let outcome = download_pdf(&HttpClient::new(), &url, temp_dir.path()).await;

    match outcome {
        DownloadOutcome::Failed {
            reason: DownloadError::InvalidContentType { content_type, .. },
        } => assert_eq!(content_type, "text/html; charset=utf-8"),
        other => panic!("expected invalid content type, got {other:?}"),
    }
    assert_eq!(file_count(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_404_fails_and_remaining_urls_are_processed() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .and(path("/gone.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b.pdf"))
        .respond_with(pdf_response(b"%PDF b"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c.pdf"))
        .respond_with(pdf_response(b"%PDF c"))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = ["/gone.pdf", "/b.pdf", "/c.pdf"]
        .iter()
        .map(|p| format!("{}{p}", mock_server.uri()))
        .collect();
    let engine = HarvestEngine::new(2).expect("valid concurrency");
    let report = engine.run(&HttpClient::new(), &urls, temp_dir.path()).await;

    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded(), 2);
    let entries = report.entries();
    assert!(matches!(
        entries[0].outcome,
        DownloadOutcome::Failed {
            reason: DownloadError::HttpStatus { status: 404, .. }
        }
    ));
    assert!(entries[1].outcome.is_success());
    assert!(entries[2].outcome.is_success());

    let gone = temp_dir
        .path()
        .join(derive_filename(&urls[0]).expect("valid url"));
    assert!(!gone.exists());
    assert_eq!(file_count(temp_dir.path()), 2);
}

#[tokio::test]
async fn test_empty_body_fails_without_creating_file() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .respond_with(pdf_response(b""))
        .mount(&mock_server)
        .await;

    let url = format!("{}/empty.pdf", mock_server.uri());
    let outcome = download_pdf(&HttpClient::new(), &url, temp_dir.path()).await;

    assert!(outcome.is_failed(), "got {outcome:?}");
    assert_eq!(file_count(temp_dir.path()), 0);
}
