/*!
 * Rule engine tests over the built-in registry and default settings
 */

use srtcheck::app_config::{RuleConfig, Settings};
use srtcheck::checks::profiles::LanguageProfiles;
use srtcheck::checks::{Check, CheckContext, RuleEngine, RuleRegistry, Violation};
use srtcheck::subtitle_processor::{Cue, SubtitleFile, Timecode};

fn default_engine() -> RuleEngine {
    RuleEngine::new(RuleRegistry::default(), LanguageProfiles::default())
}

fn cue(index: usize, start_ms: u64, end_ms: u64, text: &str) -> Cue {
    Cue::new(index, Timecode::from_millis(start_ms), Timecode::from_millis(end_ms), text)
}

fn rule_names(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.error_type.as_str()).collect()
}

/// Same input, same output
#[test]
fn test_check_withSameInput_shouldBeDeterministic() {
    let engine = default_engine();
    let settings = Settings::default();
    let cues = vec![
        cue(1, 0, 300, "Hey~  there..\n♪ la la"),
        cue(2, 1_000, 3_000, "-Wait\n[Door opens]"),
    ];

    let first = engine.check(&cues, "ENG", "ep01_ENG.srt", &settings);
    let second = engine.check(&cues, "ENG", "ep01_ENG.srt", &settings);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

/// Violations are grouped by rule in settings order
#[test]
fn test_check_withDefaultSettings_shouldReportInRegistryOrder() {
    let engine = default_engine();
    let settings = Settings::default();
    let registry = RuleRegistry::default();
    let cues = vec![cue(1, 0, 300, "Hey~  there..\n♪ la la"), cue(2, 1_000, 3_000, "-Wait")];

    let violations = engine.check(&cues, "ENG", "ep01_ENG.srt", &settings);

    let order: Vec<usize> = violations
        .iter()
        .map(|v| registry.names().iter().position(|name| *name == v.error_type).unwrap())
        .collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

/// A clean English cue produces nothing under the default settings
#[test]
fn test_check_withCleanEnglish_shouldFindNothing() {
    let engine = default_engine();
    let cues = vec![
        cue(1, 1_000, 4_000, "This is a test subtitle."),
        cue(2, 5_000, 9_000, "- It has dialogue.\n- Yes, it does."),
    ];

    let violations = engine.check(&cues, "ENG", "ep01_ENG.srt", &Settings::default());

    assert!(violations.is_empty(), "unexpected: {:?}", violations);
}

/// Japanese lines are measured with width weighting
#[test]
fn test_check_withLongJapaneseLine_shouldReportWeightedLength() {
    let engine = default_engine();
    let cues = vec![cue(1, 0, 2_000, &"漢".repeat(25))];

    let violations = engine.check(&cues, "JPN", "ep01_JPN.srt", &Settings::default());

    assert_eq!(rule_names(&violations), vec!["line-length"]);
    assert_eq!(violations[0].detail, "line 1: 25.0 chars (max: 24)");
    assert_eq!(violations[0].start_tc, "00:00:00,000");
}

/// Language-specific defaults decide which rules apply
#[test]
fn test_check_withTilde_shouldDependOnLanguage() {
    let engine = default_engine();
    let settings = Settings::default();
    let cues = vec![cue(1, 0, 2_000, "그래~")];

    let korean = engine.check(&cues, "KOR", "ep01_KOR.srt", &settings);
    assert!(!rule_names(&korean).contains(&"tilde"));

    let english = engine.check(&[cue(1, 0, 2_000, "Okay~.")], "ENG", "ep01_ENG.srt", &settings);
    assert_eq!(rule_names(&english), vec!["tilde"]);
}

/// Korean text left in a translated file
#[test]
fn test_check_withKoreanInEnglishFile_shouldReportLeakage() {
    let engine = default_engine();
    let cues = vec![cue(1, 0, 2_000, "Hello 안녕.")];

    let violations = engine.check(&cues, "ENG", "ep01_ENG.srt", &Settings::default());

    assert_eq!(rule_names(&violations), vec!["korean-leakage"]);
    assert_eq!(violations[0].detail, "line 1, position 7: Korean text '안'");
    assert_eq!(violations[0].subtitle_text, "Hello 안녕.");
}

/// Unsupported languages only get rules that need no language table
#[test]
fn test_check_withUnsupportedLanguage_shouldNotPanic() {
    let engine = default_engine();
    let settings = Settings {
        name: "fra".to_string(),
        errors: vec![
            RuleConfig::enabled_for("line-length", &["FRA"]),
            RuleConfig::enabled_for("tilde", &["FRA"]),
        ],
    };

    let violations = engine.check(&[cue(1, 0, 2_000, "Salut~")], "FRA", "ep01_FRA.srt", &settings);

    assert_eq!(rule_names(&violations), vec!["tilde"]);
}

struct ShoutCheck;

impl Check for ShoutCheck {
    fn name(&self) -> &'static str {
        "shout"
    }

    fn description(&self) -> &'static str {
        "All-caps lines"
    }

    fn evaluate(&self, cues: &[Cue], ctx: &CheckContext<'_>) -> Vec<Violation> {
        cues.iter()
            .filter(|cue| cue.text.chars().any(char::is_alphabetic) && cue.text == cue.text.to_uppercase())
            .map(|cue| ctx.violation(cue, self.name(), "all caps"))
            .collect()
    }
}

/// A new rule only needs to be registered
#[test]
fn test_check_withCustomRule_shouldDispatchThroughRegistry() {
    let mut registry = RuleRegistry::default();
    registry.register(Box::new(ShoutCheck));
    let engine = RuleEngine::new(registry, LanguageProfiles::default());
    let settings = Settings {
        name: "custom".to_string(),
        errors: vec![RuleConfig::enabled_for("shout", &["ENG"])],
    };

    let violations = engine.check(
        &[cue(1, 0, 2_000, "STOP."), cue(2, 3_000, 5_000, "Fine.")],
        "ENG",
        "ep01_ENG.srt",
        &settings,
    );

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subtitle_text, "STOP.");
}

/// Parsed files run through the engine the same way as built cues
#[test]
fn test_check_withParsedContent_shouldReportCueTimecodes() {
    let content = "1\n00:00:01,000 --> 00:00:01,200\nToo quick.\n\n2\n00:00:03,000 --> 00:00:05,000\nFine.\n";
    let cues = SubtitleFile::parse_str(content).unwrap();
    let settings = Settings {
        name: "timing".to_string(),
        errors: vec![RuleConfig::enabled_for("cue-duration", &["ENG"])],
    };

    let violations = default_engine().check(&cues, "ENG", "ep01_ENG.srt", &settings);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].start_tc, "00:00:01,000");
    assert_eq!(violations[0].detail, "duration 200 ms (min: 500 ms)");
}
