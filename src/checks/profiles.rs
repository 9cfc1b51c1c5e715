/*!
 * Per-language constant tables used by the rule checks.
 *
 * Line length limits, punctuation sets and width conventions all live here,
 * keyed by language, instead of inside individual rules. The tables are part
 * of the configuration file, so each field has a serde default and the whole
 * structure carries a version number. A language entry in the file only
 * overrides the fields it lists; the rest keep that language's defaults.
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::language_utils::LanguageCode;

/// Current layout version of the profile tables
pub const PROFILE_VERSION: u32 = 1;

/// Punctuation accepted at the end of a cue in Latin-script languages
const WESTERN_END_PUNCTUATION: &[char] = &[
    '.', '?', '!', '…', ',', ':', ';', '"', '\'', '”', '’', '-', '—', ')', ']',
];

/// Expected rendering width of a character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharWidth {
    Fullwidth,
    Halfwidth,
}

impl std::fmt::Display for CharWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fullwidth => write!(f, "fullwidth"),
            Self::Halfwidth => write!(f, "halfwidth"),
        }
    }
}

/// Width convention for one class of paired characters
///
/// `halfwidth[i]` and `fullwidth[i]` are the two forms of the same character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthConvention {
    /// Name of the character class, e.g. "parentheses"
    pub name: String,
    /// Halfwidth forms
    pub halfwidth: Vec<char>,
    /// Fullwidth forms, index-aligned with `halfwidth`
    pub fullwidth: Vec<char>,
    /// Width the language expects
    pub expected: CharWidth,
}

impl WidthConvention {
    fn new(name: &str, halfwidth: &[char], fullwidth: &[char], expected: CharWidth) -> Self {
        Self {
            name: name.to_string(),
            halfwidth: halfwidth.to_vec(),
            fullwidth: fullwidth.to_vec(),
            expected,
        }
    }

    /// If `c` belongs to this class with the wrong width, the expected form
    pub fn replacement_for(&self, c: char) -> Option<char> {
        let (wrong, right) = match self.expected {
            CharWidth::Fullwidth => (&self.halfwidth, &self.fullwidth),
            CharWidth::Halfwidth => (&self.fullwidth, &self.halfwidth),
        };

        wrong
            .iter()
            .position(|&w| w == c)
            .and_then(|i| right.get(i).copied())
    }

    fn parentheses(expected: CharWidth) -> Self {
        Self::new("parentheses", &['(', ')'], &['（', '）'], expected)
    }

    fn square_brackets(expected: CharWidth) -> Self {
        Self::new("square brackets", &['[', ']'], &['［', '］'], expected)
    }

    fn quotes(expected: CharWidth) -> Self {
        Self::new("quotes", &['"', '\''], &['＂', '＇'], expected)
    }
}

/// Constants for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Maximum weighted characters per line
    pub max_line_length: u32,

    /// Marks that must not end a line (periods)
    #[serde(default)]
    pub sentence_final: Vec<char>,

    /// Marks a cue's last line may end with; empty disables the check
    #[serde(default)]
    pub end_punctuation: Vec<char>,

    /// Width conventions for paired punctuation; empty disables the check
    #[serde(default)]
    pub width_conventions: Vec<WidthConvention>,
}

impl LanguageProfile {
    fn western(max_line_length: u32) -> Self {
        Self {
            max_line_length,
            sentence_final: vec!['.'],
            end_punctuation: WESTERN_END_PUNCTUATION.to_vec(),
            width_conventions: Vec::new(),
        }
    }

    /// Default table entry for a language
    pub fn default_for(language: LanguageCode) -> Self {
        match language {
            LanguageCode::Kor => Self {
                max_line_length: 35,
                sentence_final: vec!['.'],
                end_punctuation: vec!['.', '?', '!', '…', ',', '"', '\'', ')', ']'],
                width_conventions: Vec::new(),
            },
            LanguageCode::Eng => Self::western(46),
            LanguageCode::Jpn => Self {
                max_line_length: 24,
                sentence_final: vec!['.', '。'],
                end_punctuation: vec!['。', '？', '！', '?', '!', '…', '」', '』', '）', ')', ']'],
                width_conventions: vec![
                    WidthConvention::parentheses(CharWidth::Fullwidth),
                    WidthConvention::square_brackets(CharWidth::Halfwidth),
                    WidthConvention::quotes(CharWidth::Fullwidth),
                ],
            },
            LanguageCode::Chn => Self {
                max_line_length: 20,
                sentence_final: vec!['.', '。'],
                end_punctuation: vec!['。', '？', '！', '?', '!', '…', '”', '」', '）', ')', ']'],
                width_conventions: vec![
                    WidthConvention::parentheses(CharWidth::Halfwidth),
                    WidthConvention::square_brackets(CharWidth::Halfwidth),
                    WidthConvention::quotes(CharWidth::Halfwidth),
                ],
            },
            LanguageCode::Spa => Self::western(42),
            LanguageCode::Vie => Self::western(42),
            LanguageCode::Ind => Self::western(55),
            LanguageCode::Tha => Self {
                max_line_length: 42,
                sentence_final: vec!['.'],
                end_punctuation: Vec::new(),
                width_conventions: Vec::new(),
            },
        }
    }
}

/// A language entry as written in a config file
///
/// Every field is optional; `merge_onto` fills the gaps from the language's
/// default profile. An explicitly empty list still disables its check.
#[derive(Debug, Default, Deserialize)]
struct ProfileOverrides {
    max_line_length: Option<u32>,
    sentence_final: Option<Vec<char>>,
    end_punctuation: Option<Vec<char>>,
    width_conventions: Option<Vec<WidthConvention>>,
}

impl ProfileOverrides {
    fn merge_onto(self, base: LanguageProfile) -> LanguageProfile {
        LanguageProfile {
            max_line_length: self.max_line_length.unwrap_or(base.max_line_length),
            sentence_final: self.sentence_final.unwrap_or(base.sentence_final),
            end_punctuation: self.end_punctuation.unwrap_or(base.end_punctuation),
            width_conventions: self.width_conventions.unwrap_or(base.width_conventions),
        }
    }
}

fn deserialize_languages<'de, D>(deserializer: D) -> Result<BTreeMap<LanguageCode, LanguageProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<LanguageCode, ProfileOverrides>::deserialize(deserializer)?;

    Ok(overrides
        .into_iter()
        .map(|(language, entry)| (language, entry.merge_onto(LanguageProfile::default_for(language))))
        .collect())
}

/// Limits that apply to every language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueLimits {
    /// Maximum number of lines per cue
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Minimum display duration in milliseconds
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Maximum display duration in milliseconds
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
}

impl Default for CueLimits {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
        }
    }
}

/// All per-language tables plus shared limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProfiles {
    /// Layout version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Tables keyed by language
    #[serde(default = "default_languages", deserialize_with = "deserialize_languages")]
    pub languages: BTreeMap<LanguageCode, LanguageProfile>,

    /// Shared cue limits
    #[serde(default)]
    pub limits: CueLimits,

    /// Literal markers that must never appear in delivered text
    #[serde(default = "default_forbidden_markers")]
    pub forbidden_markers: Vec<String>,
}

impl LanguageProfiles {
    /// Profile for a language, if one is configured
    pub fn get(&self, language: LanguageCode) -> Option<&LanguageProfile> {
        self.languages.get(&language)
    }

    /// Add default tables for languages missing from a loaded config
    pub fn fill_missing(&mut self) {
        for language in LanguageCode::ALL {
            self.languages
                .entry(language)
                .or_insert_with(|| LanguageProfile::default_for(language));
        }
    }
}

impl Default for LanguageProfiles {
    fn default() -> Self {
        Self {
            version: default_version(),
            languages: default_languages(),
            limits: CueLimits::default(),
            forbidden_markers: default_forbidden_markers(),
        }
    }
}

fn default_version() -> u32 {
    PROFILE_VERSION
}

fn default_languages() -> BTreeMap<LanguageCode, LanguageProfile> {
    LanguageCode::ALL
        .iter()
        .map(|&language| (language, LanguageProfile::default_for(language)))
        .collect()
}

fn default_max_lines() -> usize {
    3
}

fn default_min_duration_ms() -> u64 {
    500
}

fn default_max_duration_ms() -> u64 {
    7_000
}

fn default_forbidden_markers() -> Vec<String> {
    vec!["@@@".to_string(), "＠＠＠".to_string(), "???".to_string(), "？？？".to_string()]
}
