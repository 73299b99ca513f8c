use blogdraft::fetch::{HttpFetcher, PageFetcher};
use blogdraft::{Error, Stage};
use spectral::prelude::*;

use crate::http_extras::{closed_port_url, serve_once};

mod http_extras;

#[tokio::test]
async fn fetches_page_body_as_text() {
    let (base, request) = serve_once(
        "200 OK",
        "text/html; charset=utf-8",
        "<html><body><article>本文</article></body></html>",
    )
    .await;
    let fetcher = HttpFetcher::new(reqwest::Client::new());

    let html = fetcher
        .fetch(&format!("{base}/posts/1"))
        .await
        .expect("Expected the page body.");
    let request = request.await.expect("Expected a recorded request.");

    assert_that(&html).is_equal_to("<html><body><article>本文</article></body></html>".to_owned());
    assert_that(&request.request_line()).starts_with("GET /posts/1 ");
}

#[tokio::test]
async fn non_success_status_keeps_body() {
    let (base, request) = serve_once("404 Not Found", "text/html", "<h1>Not Found</h1>").await;
    let fetcher = HttpFetcher::new(reqwest::Client::new());

    let result = fetcher.fetch(&format!("{base}/missing")).await;
    request.await.expect("Expected a recorded request.");

    let err = result.expect_err("Expected a backend error.");
    assert_that(&matches!(
        err,
        Error::Backend { stage: Stage::Fetch, status, .. } if status == reqwest::StatusCode::NOT_FOUND
    ))
    .is_true();
    assert_that(&err.backend_body()).is_equal_to(Some("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let base = closed_port_url().await;
    let fetcher = HttpFetcher::new(reqwest::Client::new());

    let result = fetcher.fetch(&base).await;

    assert_that(&matches!(
        result,
        Err(Error::Transport {
            stage: Stage::Fetch,
            ..
        })
    ))
    .is_true();
}
