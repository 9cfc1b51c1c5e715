/*!
 * Common test utilities for the srtcheck test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds SubRip content from (start, end, text) triples
pub fn srt_content(cues: &[(&str, &str, &str)]) -> String {
    cues.iter()
        .enumerate()
        .map(|(i, (start, end, text))| format!("{}\n{} --> {}\n{}\n", i + 1, start, end, text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Creates a clean subtitle file that passes the default rules for English
pub fn create_clean_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = srt_content(&[
        ("00:00:01,000", "00:00:04,000", "This is a test subtitle."),
        ("00:00:05,000", "00:00:09,000", "- It has dialogue.\n- Yes, it does."),
        ("00:00:10,000", "00:00:14,000", "[Door creaks]\nFor testing purposes."),
    ]);
    create_test_file(dir, filename, &content)
}

/// Initializes env_logger once for tests that want log output
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
