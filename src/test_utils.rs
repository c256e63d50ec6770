//! Test utilities
//!
//! Temporary files for article input, canned provider payloads, log
//! capture, and an assertion helper for the error taxonomy.

use crate::error::CodError;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

/// Create a temporary directory for testing
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content and return its path
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that a result failed with a `CodError` matching `predicate`
/// and whose message contains `expected`
///
/// # Panics
///
/// Panics if the result is Ok, the error is not a `CodError`, the predicate
/// rejects it, or the message does not contain `expected`
pub fn assert_cod_error<T: std::fmt::Debug>(
    result: crate::error::Result<T>,
    predicate: impl Fn(&CodError) -> bool,
    expected: &str,
) {
    let err = match result {
        Ok(value) => panic!("Expected error containing '{}' but got Ok({:?})", expected, value),
        Err(e) => e,
    };
    let cod_error = err
        .downcast_ref::<CodError>()
        .unwrap_or_else(|| panic!("Error '{}' is not a CodError", err));
    assert!(predicate(cod_error), "Unexpected error variant: {:?}", cod_error);
    let error_msg = cod_error.to_string();
    assert!(
        error_msg.contains(expected),
        "Error message '{}' does not contain '{}'",
        error_msg,
        expected
    );
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return everything it logged
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().expect("log buffer poisoned").clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// A well-formed model payload with a single summary
pub fn single_summary_json() -> serde_json::Value {
    serde_json::json!({
        "system_prompt": "You are an expert in writing rich and dense summaries in broad domains.",
        "prompt": "Summarize the article",
        "summaries": [
            {
                "denser_summary": "A cat rests.",
                "missing_entities": ["cat", "mat"]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_capture_logs() {
        let logs = capture_logs(|| tracing::warn!("disk is {}", "full"));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("disk is full"));
    }

    #[test]
    fn test_assert_cod_error_success() {
        let result: crate::error::Result<()> =
            Err(CodError::RemoteService("bad payload".to_string()).into());
        assert_cod_error(
            result,
            |e| matches!(e, CodError::RemoteService(_)),
            "bad payload",
        );
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_cod_error_ok() {
        let result: crate::error::Result<()> = Ok(());
        assert_cod_error(result, |_| true, "error");
    }

    #[test]
    #[should_panic(expected = "Unexpected error variant")]
    fn test_assert_cod_error_wrong_variant() {
        let result: crate::error::Result<()> =
            Err(CodError::Configuration("bad".to_string()).into());
        assert_cod_error(result, |e| matches!(e, CodError::FileAccess(_)), "bad");
    }
}
