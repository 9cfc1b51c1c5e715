use once_cell::sync::Lazy;
use regex::Regex;

use super::{char_position, Check, CheckContext, Violation};
use crate::language_utils::LanguageCode;
use crate::subtitle_processor::Cue;

// @module: Bracket rules (screen-text placement, width conventions, empty pairs)

const OPEN_BRACKETS: &[char] = &['[', '(', '（', '［'];
const CLOSE_BRACKETS: &[char] = &[']', ')', '）', '］'];

// @const: A bracket pair enclosing nothing but whitespace
static EMPTY_BRACKETS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*\)|\[\s*\]|（\s*）|［\s*］|「\s*」|『\s*』").expect("Invalid empty brackets regex")
});

/// Screen text (bracketed lines) must come before dialogue in a cue
///
/// A line is bracketed when it opens with a bracket or when a bracket opened
/// on an earlier line is still unclosed. Unbalanced bracket counts are
/// reported as well.
pub struct BracketPosition;

impl BracketPosition {
    /// Bracketed and normal line numbers of a cue, plus open/close totals
    fn classify(cue: &Cue) -> (Vec<usize>, Vec<usize>, usize, usize) {
        let mut bracketed = Vec::new();
        let mut normal = Vec::new();
        let (mut opens, mut closes) = (0usize, 0usize);
        let mut depth: usize = 0;

        for (line_no, line) in cue.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if depth > 0 || trimmed.starts_with(OPEN_BRACKETS) {
                bracketed.push(line_no);
            } else {
                normal.push(line_no);
            }

            for c in trimmed.chars() {
                if OPEN_BRACKETS.contains(&c) {
                    opens += 1;
                    depth += 1;
                } else if CLOSE_BRACKETS.contains(&c) {
                    closes += 1;
                    depth = depth.saturating_sub(1);
                }
            }
        }

        (bracketed, normal, opens, closes)
    }
}

impl Check for BracketPosition {
    fn name(&self) -> &'static str {
        "bracket-position"
    }

    fn description(&self) -> &'static str {
        "Bracketed screen text placed after dialogue, or unbalanced brackets"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for cue in cues {
            let (bracketed, normal, opens, closes) = Self::classify(cue);

            if opens != closes {
                violations.push(ctx.violation(
                    cue,
                    self.name(),
                    format!("unbalanced brackets ({} open, {} close)", opens, closes),
                ));
            }

            if let Some(&first_normal) = normal.first() {
                if let Some(&late) = bracketed.iter().find(|&&line_no| line_no > first_normal) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: bracketed text after dialogue on line {}", late, first_normal),
                    ));
                }
            }
        }

        violations
    }
}

/// Parentheses and square brackets in the width the language expects
pub struct ScriptWidth;

impl Check for ScriptWidth {
    fn name(&self) -> &'static str {
        "script-width"
    }

    fn description(&self) -> &'static str {
        "Bracket or parenthesis with the wrong width for the language"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        &[LanguageCode::Jpn, LanguageCode::Chn]
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(profile) = ctx.profile() else {
            return Vec::new();
        };
        if profile.width_conventions.is_empty() {
            return Vec::new();
        }

        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                for (i, c) in line.chars().enumerate() {
                    for convention in &profile.width_conventions {
                        if let Some(expected) = convention.replacement_for(c) {
                            violations.push(ctx.violation(
                                cue,
                                self.name(),
                                format!(
                                    "line {}, position {}: '{}' should be '{}' ({} {})",
                                    line_no,
                                    i + 1,
                                    c,
                                    expected,
                                    convention.expected,
                                    convention.name
                                ),
                            ));
                        }
                    }
                }
            }
        }
        violations
    }
}

/// Bracket pairs with nothing inside
pub struct EmptyBrackets;

impl Check for EmptyBrackets {
    fn name(&self) -> &'static str {
        "empty-brackets"
    }

    fn description(&self) -> &'static str {
        "Bracket pair with no content"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                for m in EMPTY_BRACKETS_REGEX.find_iter(line) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!(
                            "line {}, position {}: empty brackets '{}'",
                            line_no,
                            char_position(line, m.start()),
                            m.as_str()
                        ),
                    ));
                }
            }
        }
        violations
    }
}
