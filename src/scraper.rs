use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::api::models::{QuizRecord, QuizSnapshot, NO_ANSWER};
use crate::error::Result;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Create static selectors to avoid recompiling them each time
static DATE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2.wp-block-heading").expect("Failed to parse date selector")
});

static QUESTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h4.wp-block-heading").expect("Failed to parse question selector")
});

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p").expect("Failed to parse paragraph selector")
});

static ANSWER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("strong").expect("Failed to parse answer selector")
});

/// Somewhere quiz markup can be fetched from.
#[async_trait]
pub trait QuizSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// Fetches the quiz page over HTTP with a single bounded attempt.
pub struct HttpQuizSource {
    client: Client,
    url: String,
}

impl HttpQuizSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .pool_max_idle_per_host(10)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuizSource for HttpQuizSource {
    async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}

/// Extracts the quiz from a page. Missing elements never fail the parse; they
/// yield an empty list or the placeholder answer instead.
pub fn parse_quiz(html: &str, now: DateTime<Utc>) -> QuizSnapshot {
    let document = Html::parse_document(html);

    let heading = document
        .select(&DATE_SELECTOR)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty());
    debug!(heading = ?heading, "Parsed quiz heading");

    QuizSnapshot {
        quiz_date: format_quiz_date(now),
        questions: extract_questions(&document),
        heading,
    }
}

/// `M/D/YYYY` without zero padding.
pub fn format_quiz_date(now: DateTime<Utc>) -> String {
    format!("{}/{}/{}", now.month(), now.day(), now.year())
}

// A single pre-order walk gives document order. Every question still waiting
// for an answer takes the first paragraph that follows it.
fn extract_questions(document: &Html) -> Vec<QuizRecord> {
    let mut questions = Vec::new();
    let mut pending = 0;

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };

        if QUESTION_SELECTOR.matches(&element) {
            questions.push(QuizRecord {
                question: element_text(element),
                answer: NO_ANSWER.to_string(),
            });
            pending += 1;
        } else if pending > 0 && PARAGRAPH_SELECTOR.matches(&element) {
            if let Some(answer) = answer_in(element) {
                let start = questions.len() - pending;
                for record in &mut questions[start..] {
                    record.answer = answer.clone();
                }
            }
            pending = 0;
        }
    }

    questions
}

fn answer_in(paragraph: ElementRef) -> Option<String> {
    paragraph
        .select(&ANSWER_SELECTOR)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn element_text(element: ElementRef) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
