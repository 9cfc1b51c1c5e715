/*!
 * Rule checks for localized subtitle files.
 *
 * Every rule is a small, stateless `Check` that inspects cue text (or cue
 * timing) and emits zero or more `Violation`s. Rules never fail: any string
 * is valid input, and a rule that finds nothing returns an empty list.
 *
 * # Architecture
 *
 * - `registry`: Maps rule names (and legacy aliases) to checks
 * - `engine`: Runs the rules enabled for a file's language, in settings order
 * - `profiles`: Per-language constant tables shared by the rules
 * - `width`: East Asian Width classification and weighted line length
 * - `length`: Line length and line count
 * - `punctuation`: Ellipses, dots, end punctuation, question/exclamation width
 * - `spacing`: Hyphen spacing, whitespace hygiene, music notes, stray hyphens
 * - `glyphs`: Single-glyph detectors (markers, tildes, digits, control chars)
 * - `brackets`: Bracket placement, width conventions, empty brackets
 * - `timing`: Cue duration bounds
 */

pub mod registry;
pub mod engine;
pub mod profiles;
pub mod width;
pub mod length;
pub mod punctuation;
pub mod spacing;
pub mod glyphs;
pub mod brackets;
pub mod timing;

use serde::{Deserialize, Serialize};

use crate::language_utils::LanguageCode;
use crate::subtitle_processor::Cue;

use self::profiles::{LanguageProfile, LanguageProfiles};

// Re-export main types
pub use engine::{CheckObserver, FailurePolicy, LogObserver, RuleEngine};
pub use registry::RuleRegistry;

/// One detected rule infraction
///
/// Field names in serialized form follow the column names of the result
/// export: `File`, `StartTC`, `ErrorType`, `ErrorContent`, `SubtitleText`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Source file name
    #[serde(rename = "File")]
    pub file: String,
    /// Start timecode of the cue, `HH:MM:SS,mmm`
    #[serde(rename = "StartTC")]
    pub start_tc: String,
    /// Name of the rule that raised the violation
    #[serde(rename = "ErrorType")]
    pub error_type: String,
    /// Human readable detail (line number, position, measured values)
    #[serde(rename = "ErrorContent")]
    pub detail: String,
    /// Full text of the offending cue
    #[serde(rename = "SubtitleText")]
    pub subtitle_text: String,
}

/// Everything a check needs besides the cues themselves
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Language code as passed in (may be outside the supported set)
    pub language_code: &'a str,
    /// Parsed language, `None` when the code is not supported
    pub language: Option<LanguageCode>,
    /// Source file name copied into every violation
    pub file_name: &'a str,
    /// Per-language tables
    pub profiles: &'a LanguageProfiles,
}

impl<'a> CheckContext<'a> {
    /// Create a context, parsing the language code
    pub fn new(language_code: &'a str, file_name: &'a str, profiles: &'a LanguageProfiles) -> Self {
        Self {
            language_code,
            language: LanguageCode::parse(language_code),
            file_name,
            profiles,
        }
    }

    /// Profile of the file's language, if the language is supported
    pub fn profile(&self) -> Option<&'a LanguageProfile> {
        let profiles: &'a LanguageProfiles = self.profiles;
        self.language.and_then(|language| profiles.get(language))
    }

    /// Whether the file's language is the given one
    pub fn is(&self, language: LanguageCode) -> bool {
        self.language == Some(language)
    }

    /// Build a violation for a cue
    pub fn violation(&self, cue: &Cue, rule: &str, detail: impl Into<String>) -> Violation {
        Violation {
            file: self.file_name.to_string(),
            start_tc: cue.start.to_string(),
            error_type: rule.to_string(),
            detail: detail.into(),
            subtitle_text: cue.text.clone(),
        }
    }
}

/// A single, independently togglable rule
pub trait Check: Send + Sync {
    /// Canonical rule name used in settings and violations
    fn name(&self) -> &'static str;

    /// One-line description for listings
    fn description(&self) -> &'static str;

    /// Older names that still resolve to this rule
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Languages the rule is enabled for in the default settings
    fn default_languages(&self) -> &'static [LanguageCode] {
        &LanguageCode::ALL
    }

    /// Inspect the cues and report violations in cue order, then line order
    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation>;
}

/// 1-based character positions of every char matching `pred`
pub(crate) fn char_positions(line: &str, pred: impl Fn(char) -> bool) -> Vec<(usize, char)> {
    line.chars()
        .enumerate()
        .filter(|(_, c)| pred(*c))
        .map(|(i, c)| (i + 1, c))
        .collect()
}

/// 1-based character position of a byte offset within a line
pub(crate) fn char_position(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}
