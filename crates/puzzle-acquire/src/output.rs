use crate::error::FetchError;
use puzzle_model::PuzzleDocument;
use std::fs;
use std::path::Path;

/// Write the puzzle record to `path`, replacing any previous contents.
///
/// Creates missing parent directories first.
pub fn write_document(document: &PuzzleDocument, path: &Path) -> Result<(), FetchError> {
    let io_err = |source: std::io::Error| FetchError::Io { path: path.to_path_buf(), source };

    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let json = document
        .to_pretty_json()
        .map_err(|e| FetchError::Unexpected(format!("could not serialize puzzle: {e}")))?;
    fs::write(path, &json).map_err(io_err)?;
    tracing::info!(path = %path.display(), words = document.words.len(), "Wrote puzzle file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("puzzle.json");
        fs::write(&path, "old contents that are much longer than the new record").unwrap();

        write_document(&PuzzleDocument::new(vec!["ONE".into()]), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"words\": [\n    \"ONE\"\n  ]\n}");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/puzzle.json");
        write_document(&PuzzleDocument::new(vec!["A".into()]), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let err = write_document(&PuzzleDocument::new(vec!["A".into()]), dir.path()).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }
}
