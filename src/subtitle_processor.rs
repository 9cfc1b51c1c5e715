use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: SubRip reading for the rule engine

// @const: SRT timing line regex (trailing position coordinates are tolerated)
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})")
        .expect("Invalid timing regex")
});

// @struct: SubRip timecode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode {
    // @field: Ordering of fields matters for derived Ord
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl Timecode {
    // @creates: Timecode from components
    // @validates: Minutes/seconds below 60, milliseconds below 1000
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Result<Self, SubtitleError> {
        if minutes >= 60 || seconds >= 60 || milliseconds >= 1000 {
            return Err(SubtitleError::InvalidTimecode(format!(
                "{:02}:{:02}:{:02},{:03}",
                hours, minutes, seconds, milliseconds
            )));
        }

        Ok(Self { hours, minutes, seconds, milliseconds })
    }

    /// Build a timecode from a millisecond offset
    pub fn from_millis(ms: u64) -> Self {
        Self {
            hours: (ms / 3_600_000) as u32,
            minutes: ((ms % 3_600_000) / 60_000) as u32,
            seconds: ((ms % 60_000) / 1_000) as u32,
            milliseconds: (ms % 1_000) as u32,
        }
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm; a dot separator is accepted)
    pub fn parse(timestamp: &str) -> Result<Self, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimecode(timestamp.to_string());
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(invalid());
        }

        let mut values = [0u32; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| invalid())?;
        }

        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Offset in milliseconds
    pub fn to_millis(&self) -> u64 {
        u64::from(self.hours) * 3_600_000
            + u64::from(self.minutes) * 60_000
            + u64::from(self.seconds) * 1_000
            + u64::from(self.milliseconds)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Index as written in the file
    pub index: usize,

    // @field: Start time
    pub start: Timecode,

    // @field: End time
    pub end: Timecode,

    // @field: Cue text, lines joined by '\n'
    pub text: String,
}

impl Cue {
    /// Creates a new cue
    pub fn new(index: usize, start: Timecode, end: Timecode, text: impl Into<String>) -> Self {
        Cue {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    /// Lines of the cue text with their 1-based line numbers
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.text.split('\n').enumerate().map(|(i, line)| (i + 1, line))
    }

    /// Number of lines in the cue text
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// The last line that is not blank, with its 1-based line number
    pub fn last_non_blank_line(&self) -> Option<(usize, &str)> {
        self.lines().filter(|(_, line)| !line.trim().is_empty()).last()
    }

    /// Display duration in milliseconds, negative when end precedes start
    pub fn duration_ms(&self) -> i64 {
        self.end.to_millis() as i64 - self.start.to_millis() as i64
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Parsed SubRip file
#[derive(Debug, Clone)]
pub struct SubtitleFile {
    /// Source file path
    pub source_file: PathBuf,

    /// Cues in file order
    pub cues: Vec<Cue>,
}

impl SubtitleFile {
    /// Read and parse a SubRip file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let content = FileManager::read_utf8(path)?;
        let cues = Self::parse_str(&content)?;

        debug!("Parsed {} cues from {:?}", cues.len(), path);

        Ok(SubtitleFile {
            source_file: path.to_path_buf(),
            cues,
        })
    }

    /// Parse SubRip content into cues
    ///
    /// Cue text lines are kept as written (only line terminators are
    /// removed) so that whitespace rules can inspect them. Cues are returned
    /// in file order; no sorting or renumbering happens here.
    pub fn parse_str(content: &str) -> Result<Vec<Cue>, SubtitleError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines: Vec<&str> = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let mut cues = Vec::new();
        let mut pos = 0;

        while pos < lines.len() {
            // Skip blank lines between blocks
            if lines[pos].trim().is_empty() {
                pos += 1;
                continue;
            }

            let index_line = pos + 1;
            let index: usize = lines[pos].trim().parse().map_err(|_| SubtitleError::MissingIndex {
                line: index_line,
                found: lines[pos].to_string(),
            })?;
            pos += 1;

            let timing = lines.get(pos).ok_or(SubtitleError::UnexpectedEof { line: index_line })?;
            let caps = TIMING_REGEX.captures(timing.trim()).ok_or_else(|| SubtitleError::InvalidTiming {
                line: pos + 1,
                found: timing.to_string(),
            })?;
            let start = Self::timecode_from_captures(&caps, 1)?;
            let end = Self::timecode_from_captures(&caps, 5)?;
            pos += 1;

            let mut text_lines = Vec::new();
            while pos < lines.len() && !lines[pos].trim().is_empty() {
                text_lines.push(lines[pos]);
                pos += 1;
            }

            if text_lines.is_empty() {
                warn!("Cue {} has no text", index);
            }

            cues.push(Cue::new(index, start, end, text_lines.join("\n")));
        }

        Ok(cues)
    }

    /// Build a timecode from four consecutive capture groups
    fn timecode_from_captures(caps: &regex::Captures, start_idx: usize) -> Result<Timecode, SubtitleError> {
        let mut values = [0u32; 4];
        for (offset, value) in values.iter_mut().enumerate() {
            let group = caps.get(start_idx + offset).map_or("", |m| m.as_str());
            *value = group
                .parse()
                .map_err(|_| SubtitleError::InvalidTimecode(group.to_string()))?;
        }

        Timecode::new(values[0], values[1], values[2], values[3])
    }

    /// File name component of the source path
    pub fn file_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("Unknown file"))
    }
}

impl fmt::Display for SubtitleFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle File")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
