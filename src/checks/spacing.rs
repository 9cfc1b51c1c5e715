use once_cell::sync::Lazy;
use regex::Regex;

use super::{char_position, char_positions, Check, CheckContext, Violation};
use crate::language_utils::LanguageCode;
use crate::subtitle_processor::Cue;

// @module: Spacing rules (dialogue hyphens, whitespace, music notes)

// @const: Runs of two or more spaces, reported once per run
static DOUBLE_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("Invalid double space regex"));

// @const: Whitespace right after an opening or right before a closing bracket
static BRACKET_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\(\[（［「『]\s|\s[\)\]）］」』]").expect("Invalid bracket space regex")
});

const SPACED_HYPHEN_LANGUAGES: &[LanguageCode] = &[
    LanguageCode::Eng,
    LanguageCode::Spa,
    LanguageCode::Vie,
    LanguageCode::Ind,
    LanguageCode::Tha,
];

const UNSPACED_HYPHEN_LANGUAGES: &[LanguageCode] =
    &[LanguageCode::Kor, LanguageCode::Jpn, LanguageCode::Chn];

/// Spacing after a dialogue hyphen
///
/// One implementation serves two rules of opposite polarity: `hyphen-space`
/// wants `- Hello`, `hyphen-no-space` wants `-Hello`.
pub struct HyphenSpace {
    name: &'static str,
    expect_space: bool,
}

impl HyphenSpace {
    /// Rule requiring a space after the hyphen
    pub fn space_expected() -> Self {
        Self { name: "hyphen-space", expect_space: true }
    }

    /// Rule forbidding a space after the hyphen
    pub fn no_space() -> Self {
        Self { name: "hyphen-no-space", expect_space: false }
    }
}

impl Check for HyphenSpace {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        if self.expect_space {
            "Dialogue hyphen not followed by a space"
        } else {
            "Dialogue hyphen followed by a space"
        }
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        if self.expect_space {
            SPACED_HYPHEN_LANGUAGES
        } else {
            UNSPACED_HYPHEN_LANGUAGES
        }
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                let trimmed = line.trim();
                // A bare hyphen has nothing to space; stray-hyphen reports it
                if trimmed == "-" {
                    continue;
                }
                let Some(rest) = trimmed.strip_prefix('-') else {
                    continue;
                };

                let has_space = rest.starts_with(char::is_whitespace);
                if has_space != self.expect_space {
                    let detail = if self.expect_space {
                        format!("line {}: missing space after '-'", line_no)
                    } else {
                        format!("line {}: unexpected space after '-'", line_no)
                    };
                    violations.push(ctx.violation(cue, self.name(), detail));
                }
            }
        }
        violations
    }
}

/// Whitespace hygiene inside cue lines
pub struct Whitespace;

impl Check for Whitespace {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn description(&self) -> &'static str {
        "Leading, trailing, doubled or bracket-inner whitespace"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                if line.starts_with(char::is_whitespace) || line.ends_with(char::is_whitespace) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: leading or trailing whitespace", line_no),
                    ));
                }

                for m in DOUBLE_SPACE_REGEX.find_iter(line) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}, position {}: double space", line_no, char_position(line, m.start())),
                    ));
                }

                for m in BRACKET_SPACE_REGEX.find_iter(line) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!(
                            "line {}, position {}: whitespace inside brackets",
                            line_no,
                            char_position(line, m.start())
                        ),
                    ));
                }
            }
        }
        violations
    }
}

/// Pairing and spacing of `♪`
pub struct MusicNote;

impl Check for MusicNote {
    fn name(&self) -> &'static str {
        "music-note"
    }

    fn description(&self) -> &'static str {
        "Music notes not paired or not spaced"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                let notes = char_positions(line, |c| c == '♪');
                if notes.is_empty() {
                    continue;
                }

                if notes.len() != 2 {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: {} music notes (expected 2)", line_no, notes.len()),
                    ));
                    continue;
                }

                // Positions are 1-based, so they index the next char directly
                let chars: Vec<char> = line.chars().collect();
                let (first, second) = (notes[0].0, notes[1].0);

                if !chars.get(first).is_some_and(|c| c.is_whitespace()) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}, position {}: missing space after '♪'", line_no, first),
                    ));
                }
                if !chars.get(second - 2).is_some_and(|c| c.is_whitespace()) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}, position {}: missing space before '♪'", line_no, second),
                    ));
                }
            }
        }
        violations
    }
}

/// A hyphen standing on its own
///
/// Either the whole line is `-`, or a `-` token appears mid-line. A leading
/// `-` token is a dialogue marker and is left to the hyphen rules.
pub struct StrayHyphen;

impl Check for StrayHyphen {
    fn name(&self) -> &'static str {
        "stray-hyphen"
    }

    fn description(&self) -> &'static str {
        "Lone hyphen in a line"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                if line.trim() == "-" {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: line contains only '-'", line_no),
                    ));
                } else if line.split_whitespace().skip(1).any(|token| token == "-") {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: standalone '-'", line_no),
                    ));
                }
            }
        }
        violations
    }
}
