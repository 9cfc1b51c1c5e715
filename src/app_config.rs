use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::checks::profiles::LanguageProfiles;
use crate::checks::{Check, RuleRegistry};
use crate::errors::ConfigError;
use crate::file_utils::FileManager;
use crate::language_utils::LanguageCode;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Which rules run for which language
    #[serde(default)]
    pub settings: Settings,

    /// Per-language tables and shared limits used by the rules
    #[serde(default)]
    pub profiles: LanguageProfiles,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Number of files checked at the same time
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Descend into subdirectories when checking a folder
    #[serde(default)]
    pub recursive: bool,
}

/// Named rule selection
///
/// Same shape as the settings file of the desktop tool:
/// `{"name": ..., "errors": [{"name": ..., "languages": {"KOR": true, ...}}]}`.
/// The order of `errors` is the order rules run and report in.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Identifying name of this rule set
    #[serde(default = "default_settings_name")]
    pub name: String,

    /// Rules in run order
    #[serde(default)]
    pub errors: Vec<RuleConfig>,
}

/// One rule and the languages it is enabled for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RuleConfig {
    /// Canonical rule name or a legacy alias
    pub name: String,

    /// Language code to enabled flag; missing languages are disabled
    #[serde(default)]
    pub languages: BTreeMap<String, bool>,
}

impl RuleConfig {
    /// Rule enabled for exactly the given language codes
    pub fn enabled_for(name: &str, languages: &[&str]) -> Self {
        let mut map: BTreeMap<String, bool> = LanguageCode::ALL
            .iter()
            .map(|language| (language.as_str().to_string(), false))
            .collect();

        for language in languages {
            map.insert(language.to_uppercase(), true);
        }

        Self {
            name: name.to_string(),
            languages: map,
        }
    }

    /// Entry for a registered check using its default languages
    pub fn from_check(check: &dyn Check) -> Self {
        let defaults = check.default_languages();
        let languages = LanguageCode::ALL
            .iter()
            .map(|language| (language.as_str().to_string(), defaults.contains(language)))
            .collect();

        Self {
            name: check.name().to_string(),
            languages,
        }
    }

    /// Whether the rule is enabled for a language code (case-insensitive)
    pub fn is_enabled(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|(code, enabled)| *enabled && code.eq_ignore_ascii_case(language))
    }

    /// Whether the rule is enabled for any language
    pub fn is_enabled_anywhere(&self) -> bool {
        self.languages.values().any(|enabled| *enabled)
    }
}

impl Settings {
    /// Every registered rule with its default languages, in registration order
    pub fn from_registry(registry: &RuleRegistry) -> Self {
        Self {
            name: default_settings_name(),
            errors: registry.iter().map(RuleConfig::from_check).collect(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_registry(&RuleRegistry::default())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_settings_name() -> String {
    "default".to_string()
}

fn default_concurrent_files() -> usize {
    4
}

impl Config {
    /// Load a configuration file
    ///
    /// Settings files of the desktop tool (a bare `{"errors": [...]}`
    /// object) are accepted and read as the `settings` section. Languages
    /// missing from the profile tables get their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let mut value: Value = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if Self::upgrade_legacy_layout(&mut value)? {
            info!("Read '{}' as a legacy settings file", path.display());
        }

        let mut config: Config = serde_json::from_value(value)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.profiles.fill_missing();
        Ok(config)
    }

    /// Move a top-level `errors` list (and `name`) under `settings`
    ///
    /// Returns whether the layout was rewritten. A file with both a
    /// top-level `errors` list and a `settings` section is ambiguous.
    fn upgrade_legacy_layout(value: &mut Value) -> Result<bool> {
        let Some(object) = value.as_object_mut() else {
            return Ok(false);
        };
        let Some(errors) = object.remove("errors") else {
            return Ok(false);
        };
        if object.contains_key("settings") {
            return Err(anyhow!("Config has both a top-level 'errors' list and a 'settings' section"));
        }

        let name = object.remove("name").unwrap_or_else(|| json!("legacy"));
        object.insert("settings".to_string(), json!({ "name": name, "errors": errors }));
        Ok(true)
    }

    /// Load a configuration file, writing the default one first if it is missing
    ///
    /// Returns the configuration and whether it was just created.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();

        if FileManager::file_exists(path) {
            return Ok((Self::load(path)?, false));
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok((config, true))
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        FileManager::write_to_file(path.as_ref(), &config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.as_ref().display()))
    }

    /// Validate the configuration for consistency and required values
    ///
    /// Unknown rule names and language keys are accepted with a warning;
    /// the engine skips them.
    pub fn validate(&self) -> Result<()> {
        if !self.settings.errors.iter().any(RuleConfig::is_enabled_anywhere) {
            return Err(ConfigError::NothingEnabled.into());
        }

        let limits = &self.profiles.limits;
        if limits.max_lines == 0 {
            return Err(invalid_limit("limits.max_lines", "must be at least 1"));
        }
        if limits.min_duration_ms >= limits.max_duration_ms {
            return Err(invalid_limit(
                "limits.min_duration_ms",
                &format!(
                    "must be below limits.max_duration_ms ({} >= {})",
                    limits.min_duration_ms, limits.max_duration_ms
                ),
            ));
        }
        if self.concurrent_files == 0 {
            return Err(invalid_limit("concurrent_files", "must be at least 1"));
        }
        for (language, profile) in &self.profiles.languages {
            if profile.max_line_length == 0 {
                return Err(invalid_limit(
                    &format!("profiles.languages.{}.max_line_length", language),
                    "must be at least 1",
                ));
            }
        }

        let registry = RuleRegistry::default();
        for rule in &self.settings.errors {
            if !registry.contains(&rule.name) {
                warn!("Unknown rule '{}' in settings '{}' will be ignored", rule.name, self.settings.name);
            }
            for code in rule.languages.keys() {
                if LanguageCode::parse(code).is_none() {
                    warn!("Unknown language '{}' for rule '{}'", code, rule.name);
                }
            }
        }

        Ok(())
    }
}

fn invalid_limit(field: &str, message: &str) -> anyhow::Error {
    ConfigError::InvalidLimit {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            settings: Settings::default(),
            profiles: LanguageProfiles::default(),
            log_level: LogLevel::default(),
            concurrent_files: default_concurrent_files(),
            recursive: false,
        }
    }
}
