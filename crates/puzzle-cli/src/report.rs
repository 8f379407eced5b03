use puzzle_acquire::{FetchError, FetchOutcome};

/// The one line printed on stdout for a finished run.
pub fn status_line(result: &Result<FetchOutcome, FetchError>) -> String {
    match result {
        Ok(FetchOutcome::Saved(saved)) => format!(
            "Successfully fetched and saved {} words for {}.",
            saved.word_count, saved.date
        ),
        Ok(FetchOutcome::NoWords { source }) => {
            format!("Could not find any words in the response from {source}.")
        }
        Err(e) => format!("{}: {e}", e.kind()),
    }
}
