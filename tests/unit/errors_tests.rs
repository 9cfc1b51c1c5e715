/*!
 * Tests for error types and conversions
 */

use srtcheck::errors::{AppError, ConfigError, SubtitleError};

#[test]
fn test_subtitleError_invalidTiming_shouldDisplayLineAndContent() {
    let error = SubtitleError::InvalidTiming {
        line: 7,
        found: "00:00:01 -> 00:00:02".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("line 7"));
    assert!(display.contains("00:00:01 -> 00:00:02"));
}

#[test]
fn test_subtitleError_invalidEncoding_shouldDisplayCorrectly() {
    let error = SubtitleError::InvalidEncoding("invalid utf-8 sequence".to_string());
    let display = format!("{}", error);
    assert!(display.contains("not valid UTF-8"));
}

#[test]
fn test_configError_nothingEnabled_shouldDisplayCorrectly() {
    let display = ConfigError::NothingEnabled.to_string();
    assert!(display.contains("At least one rule"));
}

#[test]
fn test_configError_invalidLimit_shouldNameField() {
    let error = ConfigError::InvalidLimit {
        field: "limits.max_lines".to_string(),
        message: "must be at least 1".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid limit for limits.max_lines: must be at least 1");
}

#[test]
fn test_appError_fromSubtitleError_shouldWrap() {
    let app_error: AppError = SubtitleError::UnexpectedEof { line: 3 }.into();
    assert!(matches!(app_error, AppError::Subtitle(_)));
    assert!(app_error.to_string().starts_with("Subtitle error:"));
}

#[test]
fn test_appError_fromIoAndAnyhow_shouldConvert() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(AppError::from(io_error), AppError::File(_)));

    let any_error = anyhow::anyhow!("something odd");
    assert!(matches!(AppError::from(any_error), AppError::Unknown(_)));
}
