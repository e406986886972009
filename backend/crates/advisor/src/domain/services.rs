//! Domain Services
//!
//! Pure helpers for turning generated text into structured data.

use resilience::error::{UpstreamError, UpstreamResult};

use crate::domain::models::NewsArticle;

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````), if any
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse the news array produced by the text generator.
///
/// Text around the outermost `[...]` is ignored. Anything that is not an
/// array of `{title, summary, source}` objects is a decode error.
pub fn parse_articles(text: &str) -> UpstreamResult<Vec<NewsArticle>> {
    let body = strip_code_fence(text);
    let json = match (body.find('['), body.rfind(']')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => {
            return Err(UpstreamError::Decode(
                "news response contains no JSON array".to_string(),
            ));
        }
    };
    serde_json::from_str(json).map_err(|e| UpstreamError::Decode(format!("news articles: {e}")))
}
