//! Server-rendered quiz page.

use chrono::{DateTime, FixedOffset, Utc};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::api::models::{QuizSnapshot, NOT_AVAILABLE};
use crate::error::Result;

const INDEX_TEMPLATE: &str = "index";

// Register the page template once; handlebars escapes every `{{value}}`
static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(INDEX_TEMPLATE, include_str!("../../templates/index.hbs"))
        .expect("Failed to parse index template");
    handlebars
});

#[derive(Serialize)]
struct PageContext<'a> {
    snapshot: Option<&'a QuizSnapshot>,
    heading: Option<&'a str>,
    message: &'static str,
    refreshed_at: Option<String>,
    utc_offset: String,
}

/// Renders the page for the current snapshot, or the empty-state message.
pub fn render(
    snapshot: Option<&QuizSnapshot>,
    refreshed_at: Option<DateTime<Utc>>,
    display_offset: FixedOffset,
) -> Result<String> {
    let context = PageContext {
        snapshot,
        heading: snapshot.and_then(|s| s.heading.as_deref()),
        message: NOT_AVAILABLE,
        refreshed_at: refreshed_at.map(|at| {
            at.with_timezone(&display_offset)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        }),
        utc_offset: display_offset.to_string(),
    };

    Ok(TEMPLATES.render(INDEX_TEMPLATE, &context)?)
}
