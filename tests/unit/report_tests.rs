/*!
 * Tests for result grouping and export
 */

use anyhow::Result;
use srtcheck::checks::Violation;
use srtcheck::file_utils::FileManager;
use srtcheck::language_utils::LanguageCode;
use srtcheck::report::{CheckReport, PARSE_ERROR_KEY};
use crate::common;

fn violation(file: &str, rule: &str) -> Violation {
    Violation {
        file: file.to_string(),
        start_tc: "00:00:02,500".to_string(),
        error_type: rule.to_string(),
        detail: "line 1, position 4: '~'".to_string(),
        subtitle_text: "Hey~".to_string(),
    }
}

/// Violations from several files of one language accumulate in call order
#[test]
fn test_add_violations_withSeveralFiles_shouldAppendInOrder() {
    let mut report = CheckReport::new();
    report.add_violations(LanguageCode::Eng, vec![violation("a_ENG.srt", "tilde")]);
    report.add_violations(LanguageCode::Eng, vec![violation("b_ENG.srt", "tilde")]);

    let files: Vec<&str> = report
        .violations_for(LanguageCode::Eng)
        .iter()
        .map(|v| v.file.as_str())
        .collect();
    assert_eq!(files, vec!["a_ENG.srt", "b_ENG.srt"]);
    assert!(report.violations_for(LanguageCode::Kor).is_empty());
}

/// Test saving the text export
#[test]
fn test_save_text_shouldWriteLanguageSections() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("results.txt");

    let mut report = CheckReport::new();
    report.add_violations(LanguageCode::Jpn, vec![violation("a_JPN.srt", "tilde")]);
    report.add_violations(LanguageCode::Kor, vec![violation("a_KOR.srt", "wave-dash")]);
    report.save_text(&path)?;

    let content = FileManager::read_to_string(&path)?;
    let kor = content.find("Language: KOR").unwrap();
    let jpn = content.find("Language: JPN").unwrap();
    assert!(kor < jpn);
    assert!(content.contains("ErrorContent: line 1, position 4: '~'"));
    assert!(!content.contains(PARSE_ERROR_KEY));

    Ok(())
}

/// Test saving the JSON export
#[test]
fn test_save_json_shouldKeepDisplayOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("results.json");

    let mut report = CheckReport::new();
    report.add_violations(LanguageCode::Tha, vec![violation("a_THA.srt", "tilde")]);
    report.add_violations(LanguageCode::Eng, vec![violation("a_ENG.srt", "tilde")]);
    report.add_parse_failure("broken_VIE.srt", "Invalid timecode: 99:99");
    report.save_json(&path)?;

    let content = FileManager::read_to_string(&path)?;
    let eng = content.find("\"ENG\"").unwrap();
    let tha = content.find("\"THA\"").unwrap();
    let parse = content.find("\"PARSE_ERROR\"").unwrap();
    assert!(eng < tha && tha < parse);

    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(value["PARSE_ERROR"][0]["Details"], "Invalid timecode: 99:99");

    Ok(())
}

/// An empty report exports nothing
#[test]
fn test_empty_report_shouldExportNothing() -> Result<()> {
    let report = CheckReport::new();

    assert!(report.to_text().is_empty());
    assert_eq!(report.to_json()?, "{}");
    assert!(report.statistics().is_empty());
    Ok(())
}
