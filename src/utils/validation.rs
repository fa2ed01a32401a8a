// file: src/utils/validation.rs
// description: input validation and file name helpers
// reference: input validation patterns

use crate::error::{EditorError, Result};
use std::fs;
use std::path::Path;

pub const FALLBACK_FILE_NAME: &str = "Untitled Document";

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let metadata = fs::metadata(path).map_err(|e| {
            EditorError::Validation(format!("Cannot read {}: {}", path.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(EditorError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(EditorError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(EditorError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_docx_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("docx") => Ok(()),
            _ => Err(EditorError::Validation(format!(
                "File is not a DOCX file: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_file_size(path: &Path, max_bytes: u64) -> Result<()> {
        let size = fs::metadata(path)
            .map_err(|e| EditorError::file_operation(path, e))?
            .len();

        if size > max_bytes {
            return Err(EditorError::Validation(format!(
                "{} is {} bytes, over the {} byte limit",
                path.display(),
                size,
                max_bytes
            )));
        }

        Ok(())
    }

    /// Replaces path separators, reserved characters and control characters
    /// with `_`, then trims surrounding spaces and dots.
    pub fn sanitize_file_name(name: &str) -> String {
        let replaced: String = name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();

        let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
        if trimmed.is_empty() {
            FALLBACK_FILE_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((cut, _)) => format!("{}...", &text[..cut]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("draft.docx");
        fs::write(&file_path, "test").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_docx_extension() {
        assert!(Validator::validate_docx_extension(Path::new("notes.docx")).is_ok());
        assert!(Validator::validate_docx_extension(Path::new("NOTES.DOCX")).is_ok());
        assert!(Validator::validate_docx_extension(Path::new("notes.doc")).is_err());
        assert!(Validator::validate_docx_extension(Path::new("notes")).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("big.docx");
        fs::write(&file_path, vec![0u8; 64]).unwrap();

        assert!(Validator::validate_file_size(&file_path, 64).is_ok());
        assert!(Validator::validate_file_size(&file_path, 63).is_err());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(Validator::sanitize_file_name("My Draft"), "My Draft");
        assert_eq!(Validator::sanitize_file_name("a/b\\c:d"), "a_b_c_d");
        assert_eq!(Validator::sanitize_file_name("what?*"), "what__");
        assert_eq!(Validator::sanitize_file_name("  ..hidden.  "), "hidden");
        assert_eq!(Validator::sanitize_file_name("tab\there"), "tab_here");
        assert_eq!(Validator::sanitize_file_name("..."), FALLBACK_FILE_NAME);
        assert_eq!(Validator::sanitize_file_name(""), FALLBACK_FILE_NAME);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("héllo wörld", 5), "héllo...");
    }
}
