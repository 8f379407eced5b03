use chrono::NaiveDate;
use serde_json::Value;

/// Placeholder replaced by the invocation date in dated URL templates.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Date format used both in URLs and in status reports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shown in reports when neither the response nor the URL carries a date.
pub const UNKNOWN_DATE: &str = "today";

const NYTIMES_URL: &str = "https://www.nytimes.com/svc/connections/v2/{date}.json";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Field holding the puzzle words in both built-in sources.
pub const STARTING_WORDS_FIELD: &str = "startingWords";

/// How a source's endpoint URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlTemplate {
    /// Contains `{date}`, replaced with the invocation date as `YYYY-MM-DD`.
    Dated(String),
    /// Used literally, e.g. a "latest puzzle" endpoint.
    Fixed(String),
}

impl UrlTemplate {
    /// Classify a user-supplied URL: anything with a `{date}` placeholder is dated.
    pub fn parse(url: &str) -> Self {
        if url.contains(DATE_PLACEHOLDER) {
            UrlTemplate::Dated(url.to_string())
        } else {
            UrlTemplate::Fixed(url.to_string())
        }
    }

    pub fn render(&self, date: NaiveDate) -> String {
        match self {
            UrlTemplate::Dated(template) => {
                template.replace(DATE_PLACEHOLDER, &date.format(DATE_FORMAT).to_string())
            }
            UrlTemplate::Fixed(url) => url.clone(),
        }
    }

    pub fn is_dated(&self) -> bool {
        matches!(self, UrlTemplate::Dated(_))
    }
}

/// Where a puzzle comes from and how to read it.
///
/// The built-in sources differ only in these values; the fetch pipeline
/// itself is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSource {
    /// Short name used in logs and reports (e.g., "nytimes").
    pub name: String,
    pub url: UrlTemplate,
    /// Extra request headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,
    /// Response field containing the list of words.
    pub words_field: String,
    /// Response field containing a display date, if the source has one.
    pub date_field: Option<String>,
}

impl PuzzleSource {
    /// The primary source: one JSON document per calendar day.
    pub fn nytimes() -> Self {
        Self {
            name: "nytimes".to_string(),
            url: UrlTemplate::Dated(NYTIMES_URL.to_string()),
            headers: Vec::new(),
            words_field: STARTING_WORDS_FIELD.to_string(),
            date_field: None,
        }
    }

    /// The fallback source: a "latest" endpoint that rejects non-browser
    /// clients and reports its own puzzle date.
    ///
    /// There is no well-known host for it, so the caller supplies the URL.
    pub fn mirror(url: &str) -> Self {
        Self {
            name: "mirror".to_string(),
            url: UrlTemplate::parse(url),
            headers: vec![("User-Agent".to_string(), BROWSER_USER_AGENT.to_string())],
            words_field: STARTING_WORDS_FIELD.to_string(),
            date_field: Some("date".to_string()),
        }
    }

    /// Replace the endpoint, keeping headers and field names.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = UrlTemplate::parse(url);
        self
    }

    /// The date string to report for a fetched puzzle.
    ///
    /// Prefers the response's date field when the source declares one, then
    /// the invocation date for dated sources, then [`UNKNOWN_DATE`].
    pub fn display_date(&self, response: &Value, date: NaiveDate) -> String {
        if let Some(field) = &self.date_field {
            if let Some(value) = response.get(field).and_then(Value::as_str) {
                return value.to_string();
            }
        }
        if self.url.is_dated() {
            date.format(DATE_FORMAT).to_string()
        } else {
            UNKNOWN_DATE.to_string()
        }
    }
}

/// Built-in sources in fallback order: primary first.
pub fn builtin_sources(mirror_url: &str) -> Vec<PuzzleSource> {
    vec![PuzzleSource::nytimes(), PuzzleSource::mirror(mirror_url)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MIRROR: &str = "http://127.0.0.1:9/latest";

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_dated_url_is_zero_padded() {
        let url = PuzzleSource::nytimes().url.render(day());
        assert_eq!(url, "https://www.nytimes.com/svc/connections/v2/2024-03-07.json");
    }

    #[test]
    fn test_fixed_url_ignores_date() {
        let source = PuzzleSource::mirror(MIRROR);
        assert_eq!(source.url.render(day()), MIRROR);
    }

    #[test]
    fn test_mirror_url_may_be_dated() {
        let source = PuzzleSource::mirror("http://127.0.0.1:9/{date}");
        assert_eq!(source.url.render(day()), "http://127.0.0.1:9/2024-03-07");
    }

    #[test]
    fn test_parse_classifies_placeholder() {
        assert!(UrlTemplate::parse("http://localhost/{date}.json").is_dated());
        assert!(!UrlTemplate::parse("http://localhost/latest").is_dated());
    }

    #[test]
    fn test_only_fallback_sends_user_agent() {
        assert!(PuzzleSource::nytimes().headers.is_empty());
        let mirror = PuzzleSource::mirror(MIRROR);
        assert_eq!(mirror.headers.len(), 1);
        assert_eq!(mirror.headers[0].0, "User-Agent");
        assert!(mirror.headers[0].1.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_display_date_prefers_response_field() {
        let body = json!({"date": "March 7, 2024", "startingWords": []});
        assert_eq!(PuzzleSource::mirror(MIRROR).display_date(&body, day()), "March 7, 2024");
    }

    #[test]
    fn test_display_date_falls_back_to_invocation_date() {
        let body = json!({"startingWords": []});
        assert_eq!(PuzzleSource::nytimes().display_date(&body, day()), "2024-03-07");
    }

    #[test]
    fn test_display_date_placeholder_for_fixed_source() {
        let body = json!({"date": 20240307});
        assert_eq!(PuzzleSource::mirror(MIRROR).display_date(&body, day()), UNKNOWN_DATE);
    }

    #[test]
    fn test_with_url_keeps_fields() {
        let source = PuzzleSource::mirror(MIRROR).with_url("http://127.0.0.1:9/{date}");
        assert!(source.url.is_dated());
        assert_eq!(source.words_field, STARTING_WORDS_FIELD);
        assert_eq!(source.date_field.as_deref(), Some("date"));
    }

    #[test]
    fn test_builtin_order() {
        let names: Vec<String> = builtin_sources(MIRROR).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["nytimes", "mirror"]);
    }
}
