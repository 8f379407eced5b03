pub mod error;
pub mod fallback;
pub mod fetch;
pub mod output;

pub use error::{FailureKind, FetchError};
pub use fallback::fetch_with_fallback;
pub use fetch::{fetch_and_save, fetch_and_save_on, FetchOutcome, SavedPuzzle};
