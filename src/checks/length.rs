use super::width::weighted_length;
use super::{Check, CheckContext, Violation};
use crate::subtitle_processor::Cue;

// @module: Line length and line count rules

/// Lines longer than the language's maximum
///
/// Japanese and Chinese lines are measured in display width (see
/// `width::weighted_length`); every other language counts characters.
/// Languages without a profile are skipped.
pub struct LineLength;

impl LineLength {
    /// Measured length of a line for a language
    pub fn measure(line: &str, ctx: &CheckContext<'_>) -> f64 {
        match ctx.language {
            Some(language) if language.uses_width_weighting() => weighted_length(line),
            _ => line.chars().count() as f64,
        }
    }
}

impl Check for LineLength {
    fn name(&self) -> &'static str {
        "line-length"
    }

    fn description(&self) -> &'static str {
        "Line exceeds the language's maximum length"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["줄당 자수"]
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(profile) = ctx.profile() else {
            return Vec::new();
        };
        let max = f64::from(profile.max_line_length);

        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                let length = Self::measure(line, ctx);
                if length > max {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: {:.1} chars (max: {})", line_no, length, profile.max_line_length),
                    ));
                }
            }
        }
        violations
    }
}

/// Cues with more lines than allowed
pub struct LineCount;

impl Check for LineCount {
    fn name(&self) -> &'static str {
        "line-count"
    }

    fn description(&self) -> &'static str {
        "Cue has more lines than allowed"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["줄 수"]
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let max = ctx.profiles.limits.max_lines;

        cues.iter()
            .filter(|cue| !cue.text.is_empty() && cue.line_count() > max)
            .map(|cue| {
                ctx.violation(
                    cue,
                    self.name(),
                    format!("{} lines (max: {})", cue.line_count(), max),
                )
            })
            .collect()
    }
}
