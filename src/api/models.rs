use serde::Serialize;

/// Answer used when the page offers none for a question.
pub const NO_ANSWER: &str = "No answer provided";

/// Text returned by both views while the cache is empty.
pub const NOT_AVAILABLE: &str = "Quiz data is not available yet.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizRecord {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizSnapshot {
    /// UTC date of the scrape, formatted `M/D/YYYY`.
    pub quiz_date: String,
    pub questions: Vec<QuizRecord>,
    /// Date heading as printed on the source page.
    #[serde(skip)]
    pub heading: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
