/*!
 * Folder check results.
 *
 * A `CheckReport` groups violations by language in display order (KOR, ENG,
 * JPN, ...) and keeps whole-file parse failures in a separate channel that is
 * exported under the `PARSE_ERROR` key. Only languages with at least one
 * violation appear.
 */

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::checks::Violation;
use crate::file_utils::FileManager;
use crate::language_utils::LanguageCode;

/// Key used for parse failures in exported results
pub const PARSE_ERROR_KEY: &str = "PARSE_ERROR";

const SEPARATOR_WIDTH: usize = 50;

/// A file that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// File name
    #[serde(rename = "File")]
    pub file: String,
    /// Raw error text
    #[serde(rename = "Details")]
    pub message: String,
}

/// Issue counts for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageStats {
    /// Language
    pub language: LanguageCode,
    /// Violations for the language
    pub total: usize,
    /// Count per rule, in order of first appearance
    pub by_rule: Vec<(String, usize)>,
}

/// Results of checking a folder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    /// Violations per language, iterated in display order
    pub languages: BTreeMap<LanguageCode, Vec<Violation>>,
    /// Files that could not be parsed, in file order
    pub parse_errors: Vec<ParseFailure>,
}

impl CheckReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file's violations to its language
    ///
    /// Nothing is recorded when `violations` is empty, so a language key
    /// exists only if it has issues.
    pub fn add_violations(&mut self, language: LanguageCode, violations: Vec<Violation>) {
        if violations.is_empty() {
            return;
        }
        self.languages.entry(language).or_default().extend(violations);
    }

    /// Record a file that could not be parsed
    pub fn add_parse_failure(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.parse_errors.push(ParseFailure {
            file: file.into(),
            message: message.into(),
        });
    }

    /// Violations recorded for a language
    pub fn violations_for(&self, language: LanguageCode) -> &[Violation] {
        self.languages.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of violations across all languages
    pub fn violation_count(&self) -> usize {
        self.languages.values().map(Vec::len).sum()
    }

    /// Number of entries, parse failures included
    pub fn total(&self) -> usize {
        self.violation_count() + self.parse_errors.len()
    }

    /// Whether nothing was found
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Per-language counts, in display order
    pub fn statistics(&self) -> Vec<LanguageStats> {
        self.languages
            .iter()
            .map(|(&language, violations)| {
                let mut by_rule: Vec<(String, usize)> = Vec::new();
                for violation in violations {
                    match by_rule.iter_mut().find(|(rule, _)| *rule == violation.error_type) {
                        Some((_, count)) => *count += 1,
                        None => by_rule.push((violation.error_type.clone(), 1)),
                    }
                }

                LanguageStats {
                    language,
                    total: violations.len(),
                    by_rule,
                }
            })
            .collect()
    }

    /// Write the plain text export
    ///
    /// One `Language: X` section per language, each entry as `Key: value`
    /// lines followed by a separator. Parse failures come last.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let separator = "-".repeat(SEPARATOR_WIDTH);

        for (language, violations) in &self.languages {
            writeln!(out, "Language: {}", language)?;
            writeln!(out, "{}", separator)?;
            for violation in violations {
                writeln!(out, "File: {}", violation.file)?;
                writeln!(out, "StartTC: {}", violation.start_tc)?;
                writeln!(out, "ErrorType: {}", violation.error_type)?;
                writeln!(out, "ErrorContent: {}", violation.detail)?;
                writeln!(out, "SubtitleText: {}", violation.subtitle_text)?;
                writeln!(out, "{}", separator)?;
            }
        }

        if !self.parse_errors.is_empty() {
            writeln!(out, "Language: {}", PARSE_ERROR_KEY)?;
            writeln!(out, "{}", separator)?;
            for failure in &self.parse_errors {
                writeln!(out, "File: {}", failure.file)?;
                writeln!(out, "Error: {}", PARSE_ERROR_KEY)?;
                writeln!(out, "Details: {}", failure.message)?;
                writeln!(out, "{}", separator)?;
            }
        }

        Ok(())
    }

    /// Plain text export as a string
    pub fn to_text(&self) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write_text(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Save the plain text export
    pub fn save_text<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path.as_ref(), &self.to_text())
            .with_context(|| format!("Failed to save results to {}", path.as_ref().display()))
    }

    /// JSON export, language keys in display order
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize results")
    }

    /// Save the JSON export
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path.as_ref(), &self.to_json()?)
            .with_context(|| format!("Failed to save results to {}", path.as_ref().display()))
    }
}

impl Serialize for CheckReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.languages.len() + usize::from(!self.parse_errors.is_empty());
        let mut map = serializer.serialize_map(Some(entries))?;

        for (language, violations) in &self.languages {
            map.serialize_entry(language.as_str(), violations)?;
        }
        if !self.parse_errors.is_empty() {
            map.serialize_entry(PARSE_ERROR_KEY, &self.parse_errors)?;
        }

        map.end()
    }
}
