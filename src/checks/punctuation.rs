/*!
 * Punctuation rules.
 *
 * Ellipsis and dot-run detection, sentence-final punctuation in both
 * directions (present where it must not be, absent where it must be),
 * trailing commas, and the width of question and exclamation marks.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::{char_position, Check, CheckContext, Violation};
use crate::language_utils::LanguageCode;
use crate::subtitle_processor::Cue;

// @const: Any run of ASCII dots; runs are classified by length
static DOT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.+").expect("Invalid dot run regex")
});

const CJK_LANGUAGES: &[LanguageCode] = &[LanguageCode::Kor, LanguageCode::Jpn, LanguageCode::Chn];

const LATIN_LANGUAGES: &[LanguageCode] = &[
    LanguageCode::Eng,
    LanguageCode::Spa,
    LanguageCode::Vie,
    LanguageCode::Ind,
];

const ELLIPSIS_ENDINGS: &[&str] = &["...", "…", "⋯"];

/// Bracket pairs that make a line screen text rather than dialogue
const BRACKET_PAIRS: &[(char, char)] = &[('[', ']'), ('(', ')'), ('（', '）'), ('［', '］')];

/// Dot runs in a line as (1-based position, run length)
fn dot_runs(line: &str) -> Vec<(usize, usize)> {
    DOT_RUN_REGEX
        .find_iter(line)
        .map(|m| (char_position(line, m.start()), m.as_str().len()))
        .collect()
}

fn ends_with_ellipsis(line: &str) -> bool {
    ELLIPSIS_ENDINGS.iter().any(|e| line.ends_with(e))
}

fn is_bracket_only(line: &str) -> bool {
    BRACKET_PAIRS.iter().any(|&(open, close)| {
        line.starts_with(open) && line.ends_with(close)
    })
}

fn is_music_delimited(line: &str) -> bool {
    line.chars().count() >= 2 && line.starts_with('♪') && line.ends_with('♪')
}

/// The `⋯` glyph (U+22EF) anywhere in a line
pub struct MidEllipsis;

impl Check for MidEllipsis {
    fn name(&self) -> &'static str {
        "mid-ellipsis"
    }

    fn description(&self) -> &'static str {
        "Midline horizontal ellipsis (U+22EF) used"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["중간 말줄임표 여부"]
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                // One report per line, at the first glyph
                if let Some(offset) = line.find('⋯') {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}, position {}: '⋯'", line_no, char_position(line, offset)),
                    ));
                }
            }
        }
        violations
    }
}

/// Exactly three dots written out
pub struct DotEllipsis;

impl Check for DotEllipsis {
    fn name(&self) -> &'static str {
        "dot-ellipsis"
    }

    fn description(&self) -> &'static str {
        "Ellipsis written as three dots"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        CJK_LANGUAGES
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                for (pos, _) in dot_runs(line).into_iter().filter(|&(_, len)| len == 3) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}, position {}: '...'", line_no, pos),
                    ));
                }
            }
        }
        violations
    }
}

/// Runs of exactly two or exactly four dots
pub struct DoubleQuadDot;

impl Check for DoubleQuadDot {
    fn name(&self) -> &'static str {
        "double-quad-dot"
    }

    fn description(&self) -> &'static str {
        "Run of two or four dots"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                for (pos, len) in dot_runs(line) {
                    if len == 2 || len == 4 {
                        violations.push(ctx.violation(
                            cue,
                            self.name(),
                            format!("line {}, position {}: {} dots", line_no, pos, len),
                        ));
                    }
                }
            }
        }
        violations
    }
}

/// Lines ending in a sentence-final mark
///
/// Subtitle style in these languages drops the final period. A trailing
/// ellipsis is not a period.
pub struct EndPunctuation;

impl Check for EndPunctuation {
    fn name(&self) -> &'static str {
        "end-punctuation"
    }

    fn description(&self) -> &'static str {
        "Line ends with a period"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        CJK_LANGUAGES
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(profile) = ctx.profile() else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                let trimmed = line.trim();
                let Some(last) = trimmed.chars().last() else {
                    continue;
                };

                if profile.sentence_final.contains(&last) && !ends_with_ellipsis(trimmed) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: ends with '{}'", line_no, last),
                    ));
                }
            }
        }
        violations
    }
}

/// Last line of a cue without closing punctuation
pub struct MissingEndPunctuation;

impl Check for MissingEndPunctuation {
    fn name(&self) -> &'static str {
        "missing-end-punctuation"
    }

    fn description(&self) -> &'static str {
        "Cue's last line has no closing punctuation"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        LATIN_LANGUAGES
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(profile) = ctx.profile() else {
            return Vec::new();
        };
        if profile.end_punctuation.is_empty() {
            return Vec::new();
        }

        let mut violations = Vec::new();
        for cue in cues {
            let Some((line_no, line)) = cue.last_non_blank_line() else {
                continue;
            };
            let trimmed = line.trim();

            if is_bracket_only(trimmed) || is_music_delimited(trimmed) {
                continue;
            }

            let ends_ok = trimmed
                .chars()
                .last()
                .is_some_and(|c| profile.end_punctuation.contains(&c));

            if !ends_ok {
                violations.push(ctx.violation(
                    cue,
                    self.name(),
                    format!("line {}: no closing punctuation", line_no),
                ));
            }
        }
        violations
    }
}

/// Cue ending on a comma
pub struct TrailingComma;

impl Check for TrailingComma {
    fn name(&self) -> &'static str {
        "trailing-comma"
    }

    fn description(&self) -> &'static str {
        "Cue's last line ends with a comma"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        cues.iter()
            .filter_map(|cue| {
                let (line_no, line) = cue.last_non_blank_line()?;
                let last = line.trim().chars().last()?;
                matches!(last, ',' | '，' | '、').then(|| {
                    ctx.violation(cue, self.name(), format!("line {}: ends with '{}'", line_no, last))
                })
            })
            .collect()
    }
}

fn is_halfwidth_mark(c: char) -> bool {
    matches!(c, '?' | '!')
}

fn is_fullwidth_mark(c: char) -> bool {
    matches!(c, '？' | '！')
}

/// Width consistency of `?` `!` `？` `！`
///
/// A lone mark is written fullwidth. Doubled marks are written halfwidth.
/// Halfwidth and fullwidth marks are never mixed.
pub struct QuestionExclamationWidth;

impl QuestionExclamationWidth {
    fn line_findings(line: &str) -> Vec<(usize, String)> {
        let chars: Vec<char> = line.chars().collect();
        let mut findings = Vec::new();

        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
            let next = chars.get(i + 1).copied();
            let neighbors = [prev, next];

            if is_halfwidth_mark(c) {
                let has_fullwidth = neighbors.iter().flatten().any(|&n| is_fullwidth_mark(n));
                let has_mark = neighbors
                    .iter()
                    .flatten()
                    .any(|&n| is_fullwidth_mark(n) || is_halfwidth_mark(n));

                if has_fullwidth {
                    findings.push((i + 1, format!("'{}' mixed with fullwidth mark", c)));
                } else if !has_mark {
                    findings.push((i + 1, format!("'{}' should be fullwidth", c)));
                }
            } else if is_fullwidth_mark(c) && next.is_some_and(is_fullwidth_mark) {
                let pair: String = chars[i..i + 2].iter().collect();
                findings.push((i + 1, format!("'{}' doubled marks should be halfwidth", pair)));
            }
        }

        findings
    }
}

impl Check for QuestionExclamationWidth {
    fn name(&self) -> &'static str {
        "question-exclamation-width"
    }

    fn description(&self) -> &'static str {
        "Question or exclamation mark with the wrong width"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        &[LanguageCode::Jpn, LanguageCode::Chn]
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                for (pos, message) in Self::line_findings(line) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}, position {}: {}", line_no, pos, message),
                    ));
                }
            }
        }
        violations
    }
}

fn is_japanese_script(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}'
        | '\u{30A0}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
    )
}

/// Halfwidth `, . : ;` written against Japanese text
///
/// Dots that are part of a run belong to the ellipsis rules and are ignored.
pub struct WesternPunctuation;

impl Check for WesternPunctuation {
    fn name(&self) -> &'static str {
        "western-punctuation"
    }

    fn description(&self) -> &'static str {
        "Western punctuation inside Japanese text"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        &[LanguageCode::Jpn]
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        if !ctx.is(LanguageCode::Jpn) {
            return Vec::new();
        }

        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                let chars: Vec<char> = line.chars().collect();

                for (i, &c) in chars.iter().enumerate() {
                    if !matches!(c, ',' | '.' | ':' | ';') {
                        continue;
                    }

                    let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
                    let next = chars.get(i + 1).copied();

                    if c == '.' && (prev == Some('.') || next == Some('.')) {
                        continue;
                    }

                    if prev.is_some_and(is_japanese_script) || next.is_some_and(is_japanese_script) {
                        violations.push(ctx.violation(
                            cue,
                            self.name(),
                            format!("line {}, position {}: '{}'", line_no, i + 1, c),
                        ));
                    }
                }
            }
        }
        violations
    }
}
