//! HTTP fetching against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use daily_quiz_scraper::{
    cache::QuizCache,
    error::AppError,
    scraper::{HttpQuizSource, QuizSource},
};

const FIXTURE: &str = include_str!("fixtures/quiz_page.html");

#[tokio::test]
async fn returns_body_on_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/my-telenor-test-your-skills/")
        .with_status(200)
        .with_header("content-type", "text/html; charset=UTF-8")
        .with_body(FIXTURE)
        .create_async()
        .await;

    let url = format!("{}/my-telenor-test-your-skills/", server.url());
    let source = HttpQuizSource::new(url, Duration::from_secs(5)).unwrap();

    let html = source.fetch().await.unwrap();

    assert_eq!(html, FIXTURE);
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/quiz")
        .with_status(503)
        .with_body("maintenance")
        .expect(1)
        .create_async()
        .await;

    let source = HttpQuizSource::new(format!("{}/quiz", server.url()), Duration::from_secs(5)).unwrap();

    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, AppError::FetchError(_)));
    // A single attempt, no retries
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_host_is_a_fetch_error() {
    // Port 9 (discard) is essentially never listening locally
    let source = HttpQuizSource::new("http://127.0.0.1:9/quiz", Duration::from_secs(2)).unwrap();

    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, AppError::FetchError(_)));
}

#[tokio::test]
async fn cache_refreshes_from_the_mock_page() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/quiz")
        .with_status(200)
        .with_body(FIXTURE)
        .expect(1)
        .create_async()
        .await;

    let source = HttpQuizSource::new(format!("{}/quiz", server.url()), Duration::from_secs(5)).unwrap();
    let cache = QuizCache::new(Arc::new(source));

    let snapshot = cache.ensure_fresh().await.unwrap();
    assert_eq!(snapshot.questions.len(), 5);
    assert_eq!(snapshot.questions[4].answer, "Au");

    // Same day, so the second read is served from memory
    cache.ensure_fresh().await.unwrap();
    mock.assert_async().await;
}
