/*!
 * Tests for application controller functionality
 */

use anyhow::Result;
use srtcheck::app_config::{Config, RuleConfig, Settings};
use srtcheck::app_controller::{Controller, FileOutcome};
use srtcheck::language_utils::LanguageCode;
use crate::common;

/// Test creating a controller with the default configuration
#[test]
fn test_new_for_test_shouldUseDefaultConfig() -> Result<()> {
    let controller = Controller::new_for_test()?;

    assert_eq!(controller.config().concurrent_files, 4);
    assert_eq!(controller.engine().registry().len(), 26);
    Ok(())
}

/// Test checking one clean file
#[test]
fn test_check_file_withCleanFile_shouldReturnNoViolations() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_clean_subtitle(temp_dir.path(), "ep01_ENG.srt")?;

    let controller = Controller::new_for_test()?;

    match controller.check_file(&path) {
        FileOutcome::Checked { language, violations } => {
            assert_eq!(language, LanguageCode::Eng);
            assert!(violations.is_empty(), "unexpected: {:?}", violations);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    Ok(())
}

/// Invalid UTF-8 is a parse failure, not an error
#[test]
fn test_check_file_withInvalidEncoding_shouldReturnParseFailed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("ep01_KOR.srt");
    std::fs::write(&path, [0x31, 0x0A, 0xC3, 0x28])?;

    let controller = Controller::new_for_test()?;

    match controller.check_file(&path) {
        FileOutcome::ParseFailed { message } => assert!(message.contains("UTF-8")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    Ok(())
}

/// A language with no enabled rule is skipped without reading the file
#[test]
fn test_check_file_withNoRulesForLanguage_shouldSkip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "ep01_THA.srt", "not even srt")?;

    let config = Config {
        settings: Settings {
            name: "eng-only".to_string(),
            errors: vec![RuleConfig::enabled_for("tilde", &["ENG"])],
        },
        ..Config::default()
    };
    let controller = Controller::with_config(config)?.without_progress();

    match controller.check_file(&path) {
        FileOutcome::Skipped { reason } => assert!(reason.contains("THA")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    Ok(())
}
