/*!
 * Tests for SubRip parsing
 */

use anyhow::Result;
use srtcheck::errors::SubtitleError;
use srtcheck::subtitle_processor::{Cue, SubtitleFile, Timecode};
use crate::common;

/// Test timecode parsing and formatting
#[test]
fn test_timecode_parse_withValidTimestamp_shouldParseAndFormat() {
    let tc = Timecode::parse("01:23:45,678").unwrap();

    assert_eq!(tc.to_millis(), 5_025_678);
    assert_eq!(tc.to_string(), "01:23:45,678");
    assert_eq!(Timecode::from_millis(5_025_678), tc);
}

/// Dot separators are accepted, out-of-range components are not
#[test]
fn test_timecode_parse_withEdgeCases_shouldValidate() {
    assert_eq!(Timecode::parse("00:00:01.500").unwrap().to_millis(), 1_500);
    assert!(Timecode::parse("00:61:00,000").is_err());
    assert!(Timecode::parse("00:00:00,1000").is_err());
    assert!(Timecode::parse("garbage").is_err());
}

/// Test parsing of a well-formed file
#[test]
fn test_parse_str_withValidContent_shouldKeepOrderAndText() -> Result<()> {
    let content = "1\r\n00:00:01,000 --> 00:00:04,000\r\n  Hello there \r\nSecond line\r\n\r\n2\r\n00:00:05,000 --> 00:00:06,000\r\nBye\r\n";
    let cues = SubtitleFile::parse_str(content)?;

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text, "  Hello there \nSecond line");
    assert_eq!(cues[0].line_count(), 2);
    assert_eq!(cues[1].start.to_string(), "00:00:05,000");
    assert_eq!(cues[1].duration_ms(), 1_000);

    Ok(())
}

/// A leading byte order mark is ignored
#[test]
fn test_parse_str_withBom_shouldParse() -> Result<()> {
    let cues = SubtitleFile::parse_str("\u{feff}1\n00:00:01,000 --> 00:00:02,000\nHi\n")?;
    assert_eq!(cues.len(), 1);
    Ok(())
}

/// Structural errors carry the offending line
#[test]
fn test_parse_str_withBrokenStructure_shouldReturnErrors() {
    let missing_index = SubtitleFile::parse_str("Hello\n00:00:01,000 --> 00:00:02,000\n");
    assert!(matches!(missing_index, Err(SubtitleError::MissingIndex { line: 1, .. })));

    let bad_timing = SubtitleFile::parse_str("1\nnot a timing line\nHello\n");
    assert!(matches!(bad_timing, Err(SubtitleError::InvalidTiming { line: 2, .. })));

    let truncated = SubtitleFile::parse_str("1");
    assert!(matches!(truncated, Err(SubtitleError::UnexpectedEof { line: 1 })));
}

/// Cue line helpers
#[test]
fn test_cue_lines_shouldBeOneBased() {
    let cue = Cue::new(1, Timecode::from_millis(0), Timecode::from_millis(1_000), "a\nb\n ");

    let lines: Vec<(usize, &str)> = cue.lines().collect();
    assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, " ")]);
    assert_eq!(cue.last_non_blank_line(), Some((2, "b")));
}

/// Test opening a file from disk
#[test]
fn test_open_withFileOnDisk_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_clean_subtitle(temp_dir.path(), "ep01_ENG.srt")?;

    let subtitles = SubtitleFile::open(&path)?;

    assert_eq!(subtitles.cues.len(), 3);
    assert_eq!(subtitles.file_name(), "ep01_ENG.srt");
    Ok(())
}
