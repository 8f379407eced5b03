use crate::error::FetchError;
use crate::output;
use chrono::{Local, NaiveDate};
use puzzle_model::{PuzzleDocument, PuzzleSource};
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;
use std::path::Path;

/// Result of one pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Words were found and written to disk.
    Saved(SavedPuzzle),
    /// The word list was present but empty (or null); nothing was written.
    NoWords { source: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPuzzle {
    pub source: String,
    pub word_count: usize,
    /// Date label for reports, see [`PuzzleSource::display_date`].
    pub date: String,
}

impl FetchOutcome {
    pub fn word_count(&self) -> usize {
        match self {
            FetchOutcome::Saved(saved) => saved.word_count,
            FetchOutcome::NoWords { .. } => 0,
        }
    }
}

/// Fetch today's puzzle from `source` and save its words to `output_path`.
///
/// "Today" is the local calendar date at the time of the call.
pub async fn fetch_and_save(
    source: &PuzzleSource,
    output_path: &Path,
) -> Result<FetchOutcome, FetchError> {
    fetch_and_save_on(source, output_path, Local::now().date_naive()).await
}

/// Same as [`fetch_and_save`], with the invocation date given explicitly.
///
/// The output file is only touched once a non-empty word list has been
/// extracted; every earlier failure leaves it as it was.
pub async fn fetch_and_save_on(
    source: &PuzzleSource,
    output_path: &Path,
    date: NaiveDate,
) -> Result<FetchOutcome, FetchError> {
    let url = source.url.render(date);
    tracing::debug!(url = %url, dated = source.url.is_dated(), "Built request URL");
    tracing::info!(source = %source.name, "Fetching puzzle");

    let body = fetch_body(&url, &source.headers).await?;
    tracing::info!(bytes = body.len(), "Received response");

    let response = parse_body(&body)?;
    let words = extract_words(&response, &body, &source.words_field)?;

    if words.is_empty() {
        tracing::info!(source = %source.name, field = %source.words_field, "Word list is empty");
        return Ok(FetchOutcome::NoWords { source: source.name.clone() });
    }

    let date_label = source.display_date(&response, date);
    let word_count = words.len();
    output::write_document(&PuzzleDocument::new(words), output_path)?;

    Ok(FetchOutcome::Saved(SavedPuzzle {
        source: source.name.clone(),
        word_count,
        date: date_label,
    }))
}

async fn fetch_body(url: &str, headers: &[(String, String)]) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| FetchError::Unexpected(format!("could not build HTTP client: {e}")))?;

    let mut request = client.get(url);
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::Unexpected(format!("invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::Unexpected(format!("invalid value for header '{name}': {e}")))?;
        request = request.header(header_name, header_value);
    }

    let response = request.send().await.map_err(|source| request_error(url, source))?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let reason = status.canonical_reason().unwrap_or("request failed");
        return Err(FetchError::Http {
            status: status.as_u16(),
            message: format!("{reason} for {url}"),
        });
    }

    response.text().await.map_err(|source| request_error(url, source))
}

fn request_error(url: &str, source: reqwest::Error) -> FetchError {
    // Builder errors mean the URL itself is unusable, not that the network failed.
    if source.is_builder() {
        FetchError::Unexpected(format!("invalid request URL '{url}': {source}"))
    } else {
        FetchError::Network { url: url.to_string(), source }
    }
}

fn parse_body(body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse {
        detail: e.to_string(),
        raw_body: body.to_string(),
    })
}

/// Pull the word list out of a parsed response.
///
/// An absent field is [`FetchError::MissingField`]; a `null` field counts as
/// an empty list. Anything other than an array of strings is a parse error
/// carrying `raw`, the body text exactly as received.
pub fn extract_words(response: &Value, raw: &str, field: &str) -> Result<Vec<String>, FetchError> {
    let object = response.as_object().ok_or_else(|| FetchError::Parse {
        detail: format!("expected a JSON object, found {}", json_type(response)),
        raw_body: raw.to_string(),
    })?;

    let value = object
        .get(field)
        .ok_or_else(|| FetchError::MissingField { field: field.to_string() })?;

    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            return Err(FetchError::Parse {
                detail: format!("'{field}' should be a list of words, found {}", json_type(other)),
                raw_body: raw.to_string(),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| FetchError::Parse {
                detail: format!("'{field}[{i}]' should be a string, found {}", json_type(item)),
                raw_body: raw.to_string(),
            })
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;

    fn extract(raw: &str) -> Result<Vec<String>, FetchError> {
        let value = parse_body(raw)?;
        extract_words(&value, raw, "startingWords")
    }

    #[test]
    fn test_extract_preserves_order() {
        let body = json!({"startingWords": ["KIWI", "APPLE", "FIG"], "id": 12});
        let words = extract_words(&body, &body.to_string(), "startingWords").unwrap();
        assert_eq!(words, ["KIWI", "APPLE", "FIG"]);
    }

    #[test]
    fn test_extract_missing_field() {
        let err = extract(r#"{"categories": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::MissingField { ref field } if field == "startingWords"));
        assert_eq!(err.kind(), FailureKind::MissingKey);
    }

    #[test]
    fn test_extract_null_is_empty() {
        assert!(extract(r#"{"startingWords": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_extract_rejects_non_object() {
        let raw = r#"[ "A",   "B" ]"#;
        let err = extract(raw).unwrap_err();
        assert_eq!(err.kind(), FailureKind::JsonDecode);
        match err {
            FetchError::Parse { raw_body, .. } => assert_eq!(raw_body, raw),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_extract_rejects_non_string_items() {
        let raw = "{\"startingWords\": [\"A\", 2, \"C\"],\n \"id\": 1.0}";
        let err = extract(raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("startingWords[1]"));
        assert!(msg.contains(raw), "{msg}");
    }

    #[test]
    fn test_extract_rejects_scalar_field() {
        let raw = r#"{ "startingWords" : "A,B,C" }"#;
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, FetchError::Parse { ref raw_body, .. } if raw_body == raw));
    }

    #[test]
    fn test_parse_body_keeps_raw_text() {
        let err = parse_body("not json at all").unwrap_err();
        match err {
            FetchError::Parse { raw_body, .. } => assert_eq!(raw_body, "not json at all"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_word_count_for_no_words() {
        let outcome = FetchOutcome::NoWords { source: "nytimes".into() };
        assert_eq!(outcome.word_count(), 0);
    }
}
