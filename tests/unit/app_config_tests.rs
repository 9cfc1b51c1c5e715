/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use srtcheck::app_config::{Config, LogLevel, RuleConfig, Settings};
use srtcheck::checks::{RuleEngine, RuleRegistry};
use srtcheck::subtitle_processor::{Cue, Timecode};
use srtcheck::errors::ConfigError;
use srtcheck::language_utils::LanguageCode;
use crate::common;

fn rule<'a>(settings: &'a Settings, name: &str) -> &'a RuleConfig {
    settings.errors.iter().find(|rule| rule.name == name).unwrap()
}

/// Test that the default config passes validation
#[test]
fn test_default_config_shouldBeValid() -> Result<()> {
    let config = Config::default();

    config.validate()?;
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.concurrent_files, 4);
    assert!(!config.recursive);
    Ok(())
}

/// Default settings list every registered rule in registration order
#[test]
fn test_default_settings_shouldFollowRegistryOrder() {
    let settings = Settings::default();
    let registry = RuleRegistry::default();

    let names: Vec<&str> = settings.errors.iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(names, registry.names());
    assert_eq!(settings.name, "default");
}

/// Default languages of a rule become its enabled flags
#[test]
fn test_default_settings_shouldUseDefaultLanguages() {
    let settings = Settings::default();

    let tilde = rule(&settings, "tilde");
    assert!(!tilde.is_enabled("KOR"));
    assert!(tilde.is_enabled("ENG"));

    let script_width = rule(&settings, "script-width");
    assert!(script_width.is_enabled("jpn"));
    assert!(!script_width.is_enabled("ENG"));
}

/// Test validation with every rule disabled
#[test]
fn test_validate_withNothingEnabled_shouldFail() {
    let mut config = Config::default();
    for rule in &mut config.settings.errors {
        rule.languages.values_mut().for_each(|enabled| *enabled = false);
    }

    let error = config.validate().unwrap_err();
    assert_eq!(error.downcast_ref::<ConfigError>(), Some(&ConfigError::NothingEnabled));
}

/// Test validation of the numeric limits
#[test]
fn test_validate_withInvalidLimits_shouldNameTheField() {
    let field_of = |config: &Config| match config.validate().unwrap_err().downcast_ref::<ConfigError>() {
        Some(ConfigError::InvalidLimit { field, .. }) => field.clone(),
        other => panic!("unexpected error: {:?}", other),
    };

    let mut config = Config::default();
    config.profiles.limits.max_lines = 0;
    assert_eq!(field_of(&config), "limits.max_lines");

    let mut config = Config::default();
    config.profiles.limits.min_duration_ms = 8_000;
    assert_eq!(field_of(&config), "limits.min_duration_ms");

    let mut config = Config::default();
    config.concurrent_files = 0;
    assert_eq!(field_of(&config), "concurrent_files");

    let mut config = Config::default();
    if let Some(profile) = config.profiles.languages.get_mut(&LanguageCode::Eng) {
        profile.max_line_length = 0;
    }
    assert_eq!(field_of(&config), "profiles.languages.ENG.max_line_length");
}

/// Unknown rules only produce a warning
#[test]
fn test_validate_withUnknownRule_shouldPass() -> Result<()> {
    common::init_test_logger();
    let mut config = Config::default();
    config.settings.errors.push(RuleConfig::enabled_for("no-such-rule", &["ENG"]));

    config.validate()?;
    Ok(())
}

/// Test that load_or_create writes the default config once
#[test]
fn test_load_or_create_withMissingFile_shouldCreateDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("srtcheck.json");

    let (created, was_created) = Config::load_or_create(&path)?;
    assert!(was_created);
    assert!(path.exists());

    let (loaded, was_created) = Config::load_or_create(&path)?;
    assert!(!was_created);
    assert_eq!(loaded, created);

    Ok(())
}

/// Partial config files load with defaults filled in
#[test]
fn test_load_withPartialConfig_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{
        "settings": {
            "name": "partial",
            "errors": [
                {"name": "줄당 자수", "languages": {"KOR": true, "ENG": true, "JPN": false}},
                {"name": "???여부", "languages": {"KOR": true}}
            ]
        },
        "profiles": {
            "languages": {
                "ENG": {"max_line_length": 42}
            }
        }
    }"#;
    let path = common::create_test_file(temp_dir.path(), "partial.json", json)?;

    let config = Config::load(&path)?;
    config.validate()?;

    assert_eq!(config.settings.name, "partial");
    assert_eq!(config.settings.errors.len(), 2);
    assert!(config.settings.errors[0].is_enabled("ENG"));
    assert!(!config.settings.errors[0].is_enabled("THA"));

    // Overriding one field keeps the rest of the language's tables
    let eng = config.profiles.get(LanguageCode::Eng).unwrap();
    assert_eq!(eng.max_line_length, 42);
    assert!(eng.end_punctuation.contains(&'.'));
    assert_eq!(eng.sentence_final, vec!['.']);

    // Languages missing from the file get their default tables
    assert_eq!(config.profiles.get(LanguageCode::Kor).unwrap().max_line_length, 35);
    assert_eq!(config.profiles.limits.max_lines, 3);
    assert_eq!(config.concurrent_files, 4);

    Ok(())
}

/// Test that malformed JSON is reported with the file path
#[test]
fn test_load_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let error = Config::load(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));

    Ok(())
}

/// The desktop tool's settings file has its rule list at the top level
#[test]
fn test_load_withDesktopSettingsFile_shouldReadTopLevelErrors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{"errors": [{"name": "줄 수", "languages": {"KOR": true, "ENG": false}}]}"#;
    let path = common::create_test_file(temp_dir.path(), "settings.json", json)?;

    let config = Config::load(&path)?;
    config.validate()?;

    assert_eq!(config.settings.name, "legacy");
    assert_eq!(config.settings.errors.len(), 1);
    assert_eq!(config.settings.errors[0].name, "줄 수");
    assert!(config.settings.errors[0].is_enabled("KOR"));
    assert!(!config.settings.errors[0].is_enabled("ENG"));

    let engine = RuleEngine::new(RuleRegistry::default(), config.profiles.clone());
    assert_eq!(engine.active_rules(&config.settings, "KOR"), vec!["line-count"]);
    Ok(())
}

/// A top-level rule list next to a settings section is rejected
#[test]
fn test_load_withBothLayouts_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{"errors": [], "settings": {"errors": []}}"#;
    let path = common::create_test_file(temp_dir.path(), "mixed.json", json)?;

    let error = Config::load(&path).unwrap_err();
    assert!(error.to_string().contains("top-level 'errors'"));
    Ok(())
}

/// Overriding one profile field leaves the end punctuation rules working
#[test]
fn test_load_withLineLengthOverride_shouldKeepPunctuationRules() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{"profiles": {"languages": {"ENG": {"max_line_length": 42}}}}"#;
    let path = common::create_test_file(temp_dir.path(), "srtcheck.json", json)?;

    let config = Config::load(&path)?;
    let engine = RuleEngine::new(RuleRegistry::default(), config.profiles.clone());
    let settings = Settings {
        name: "punctuation".to_string(),
        errors: vec![RuleConfig::enabled_for("missing-end-punctuation", &["ENG"])],
    };
    let cues = vec![Cue::new(1, Timecode::from_millis(0), Timecode::from_millis(2_000), "How are you")];

    let violations = engine.check(&cues, "ENG", "ep01_ENG.srt", &settings);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].error_type, "missing-end-punctuation");
    Ok(())
}
