use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language utilities for the subtitle target languages
///
/// Subtitle deliveries use a fixed set of project language codes (KOR, ENG,
/// JPN, ...) carried in the file name. This module maps them to ISO 639-3 so
/// the usual language names are available, and implements the file name
/// convention used to infer a file's language.
/// Target language of a subtitle file
///
/// Variants are declared in display order, so sorting by `LanguageCode`
/// matches the order languages are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageCode {
    Kor,
    Eng,
    Jpn,
    Chn,
    Spa,
    Vie,
    Ind,
    Tha,
}

impl LanguageCode {
    /// All supported languages in display order
    pub const ALL: [LanguageCode; 8] = [
        LanguageCode::Kor,
        LanguageCode::Eng,
        LanguageCode::Jpn,
        LanguageCode::Chn,
        LanguageCode::Spa,
        LanguageCode::Vie,
        LanguageCode::Ind,
        LanguageCode::Tha,
    ];

    /// Project code as it appears in file names and settings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kor => "KOR",
            Self::Eng => "ENG",
            Self::Jpn => "JPN",
            Self::Chn => "CHN",
            Self::Spa => "SPA",
            Self::Vie => "VIE",
            Self::Ind => "IND",
            Self::Tha => "THA",
        }
    }

    /// ISO 639-3 code for the language
    pub fn iso_639_3(&self) -> &'static str {
        match self {
            Self::Kor => "kor",
            Self::Eng => "eng",
            Self::Jpn => "jpn",
            Self::Chn => "zho",
            Self::Spa => "spa",
            Self::Vie => "vie",
            Self::Ind => "ind",
            Self::Tha => "tha",
        }
    }

    /// English name of the language
    pub fn name(&self) -> String {
        Language::from_639_3(self.iso_639_3())
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| self.as_str().to_string())
    }

    /// Whether the language is written with CJK scripts whose line length is
    /// measured by display width rather than by character count
    pub fn uses_width_weighting(&self) -> bool {
        matches!(self, Self::Jpn | Self::Chn)
    }

    /// Parse a code, returning `None` for anything outside the supported set
    pub fn parse(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "KOR" => Ok(Self::Kor),
            "ENG" => Ok(Self::Eng),
            "JPN" => Ok(Self::Jpn),
            "CHN" => Ok(Self::Chn),
            "SPA" => Ok(Self::Spa),
            "VIE" => Ok(Self::Vie),
            "IND" => Ok(Self::Ind),
            "THA" => Ok(Self::Tha),
            _ => Err(anyhow!("Unsupported language code: {}", s)),
        }
    }
}

/// Infer the language code from a subtitle file name
///
/// The code is the token after the last underscore, cut at the first dot and
/// uppercased: `ep01_episode_subtitle_eng.srt` gives `ENG`. The result is not
/// checked against the supported set.
pub fn language_from_file_name(file_name: &str) -> String {
    let last_token = file_name.rsplit('_').next().unwrap_or(file_name);
    let code = last_token.split('.').next().unwrap_or(last_token);
    code.to_uppercase()
}

/// Get the English language name for a project language code
pub fn get_language_name(code: &str) -> Result<String> {
    let language: LanguageCode = code.parse()?;
    Ok(language.name())
}
