use crate::error::FetchError;
use crate::fetch::{fetch_and_save_on, FetchOutcome};
use chrono::NaiveDate;
use puzzle_model::PuzzleSource;
use std::path::Path;

/// Try each source in order until one saves a puzzle.
///
/// Remote-side failures and empty word lists move on to the next source.
/// File write and unexpected errors stop the chain at once, since another
/// source cannot fix them. When every source comes up short, the last
/// result is returned.
pub async fn fetch_with_fallback(
    sources: &[PuzzleSource],
    output_path: &Path,
    date: NaiveDate,
) -> Result<FetchOutcome, FetchError> {
    let mut last = Err(FetchError::Unexpected("no puzzle sources configured".to_string()));

    for (i, source) in sources.iter().enumerate() {
        let remaining = sources.len() - i - 1;
        match fetch_and_save_on(source, output_path, date).await {
            Ok(outcome @ FetchOutcome::Saved(_)) => return Ok(outcome),
            Ok(outcome @ FetchOutcome::NoWords { .. }) => {
                tracing::warn!(source = %source.name, remaining, "Source returned no words");
                last = Ok(outcome);
            }
            Err(e) if e.is_source_failure() => {
                tracing::warn!(source = %source.name, remaining, error = %e, "Source failed");
                last = Err(e);
            }
            Err(e) => return Err(e),
        }
    }

    last
}
