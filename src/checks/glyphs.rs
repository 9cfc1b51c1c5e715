/*!
 * Single-glyph detectors.
 *
 * Each rule here scans cue lines for one character class and reports every
 * occurrence with its 1-based line number and character position.
 */

use super::{char_positions, Check, CheckContext, Violation};
use crate::language_utils::LanguageCode;
use crate::subtitle_processor::Cue;

const ALL_BUT_KOREAN: &[LanguageCode] = &[
    LanguageCode::Eng,
    LanguageCode::Jpn,
    LanguageCode::Chn,
    LanguageCode::Spa,
    LanguageCode::Vie,
    LanguageCode::Ind,
    LanguageCode::Tha,
];

const ALL_BUT_JAPANESE: &[LanguageCode] = &[
    LanguageCode::Kor,
    LanguageCode::Eng,
    LanguageCode::Chn,
    LanguageCode::Spa,
    LanguageCode::Vie,
    LanguageCode::Ind,
    LanguageCode::Tha,
];

/// One violation per matching char, formatted by `describe`
fn scan_glyphs(
    rule: &str,
    cues: &[Cue],
    ctx: &CheckContext<'_>,
    pred: impl Fn(char) -> bool,
    describe: impl Fn(char) -> String,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for cue in cues {
        for (line_no, line) in cue.lines() {
            for (pos, c) in char_positions(line, &pred) {
                violations.push(ctx.violation(
                    cue,
                    rule,
                    format!("line {}, position {}: {}", line_no, pos, describe(c)),
                ));
            }
        }
    }
    violations
}

fn quoted(c: char) -> String {
    format!("'{}'", c)
}

/// Placeholder markers left in by translators (`@@@`, `???`, ...)
pub struct ForbiddenMarker;

impl Check for ForbiddenMarker {
    fn name(&self) -> &'static str {
        "forbidden-marker"
    }

    fn description(&self) -> &'static str {
        "Placeholder marker left in the text"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["???여부"]
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let markers = &ctx.profiles.forbidden_markers;

        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                for marker in markers.iter().filter(|m| !m.is_empty() && line.contains(m.as_str())) {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}: '{}'", line_no, marker),
                    ));
                }
            }
        }
        violations
    }
}

/// ASCII tilde
pub struct Tilde;

impl Check for Tilde {
    fn name(&self) -> &'static str {
        "tilde"
    }

    fn description(&self) -> &'static str {
        "Tilde '~' used"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        ALL_BUT_KOREAN
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        scan_glyphs(self.name(), cues, ctx, |c| c == '~', quoted)
    }
}

/// Wave dash U+301C
pub struct WaveDash;

impl Check for WaveDash {
    fn name(&self) -> &'static str {
        "wave-dash"
    }

    fn description(&self) -> &'static str {
        "Wave dash '〜' used"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        ALL_BUT_JAPANESE
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        scan_glyphs(self.name(), cues, ctx, |c| c == '〜', quoted)
    }
}

/// `○`, used in scripts to mark blurred or censored words
pub struct BlurSymbol;

impl Check for BlurSymbol {
    fn name(&self) -> &'static str {
        "blur-symbol"
    }

    fn description(&self) -> &'static str {
        "Blur symbol '○' present (informational)"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        scan_glyphs(self.name(), cues, ctx, |c| c == '○', quoted)
    }
}

/// Fullwidth digits U+FF10 to U+FF19
pub struct FullwidthDigit;

impl Check for FullwidthDigit {
    fn name(&self) -> &'static str {
        "fullwidth-digit"
    }

    fn description(&self) -> &'static str {
        "Fullwidth digit used"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        ALL_BUT_JAPANESE
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        scan_glyphs(self.name(), cues, ctx, |c| ('\u{FF10}'..='\u{FF19}').contains(&c), quoted)
    }
}

fn is_invisible(c: char) -> bool {
    c.is_control()
        || matches!(c,
            '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{FEFF}'
        )
}

/// Control and invisible format characters
pub struct ControlCharacters;

impl Check for ControlCharacters {
    fn name(&self) -> &'static str {
        "control-characters"
    }

    fn description(&self) -> &'static str {
        "Control or invisible format character present"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        scan_glyphs(self.name(), cues, ctx, is_invisible, |c| format!("U+{:04X}", c as u32))
    }
}

/// Whether a char is Hangul (jamo, compatibility jamo, extensions, syllables)
pub fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{11FF}'
        | '\u{3130}'..='\u{318F}'
        | '\u{A960}'..='\u{A97F}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{D7B0}'..='\u{D7FF}'
    )
}

/// Korean source text left in a translated file
///
/// Reported once per line, at the first Hangul character.
pub struct KoreanLeakage;

impl Check for KoreanLeakage {
    fn name(&self) -> &'static str {
        "korean-leakage"
    }

    fn description(&self) -> &'static str {
        "Korean text in a non-Korean file"
    }

    fn default_languages(&self) -> &'static [LanguageCode] {
        ALL_BUT_KOREAN
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        if ctx.is(LanguageCode::Kor) {
            return Vec::new();
        }

        let mut violations = Vec::new();
        for cue in cues {
            for (line_no, line) in cue.lines() {
                if let Some((pos, c)) = char_positions(line, is_hangul).first() {
                    violations.push(ctx.violation(
                        cue,
                        self.name(),
                        format!("line {}, position {}: Korean text '{}'", line_no, pos, c),
                    ));
                }
            }
        }
        violations
    }
}
