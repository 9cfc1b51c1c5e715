/*!
 * East Asian Width classification.
 *
 * Line length for Japanese and Chinese is measured in display cells rather
 * than characters: wide and fullwidth characters count as one unit, narrow
 * and halfwidth characters (and whitespace) count as half a unit. The tables
 * below cover the F, W, H and Na categories of the Unicode East Asian Width
 * property; everything else (ambiguous and neutral) counts as one unit.
 */

/// East Asian Width category of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EastAsianWidth {
    /// F
    Fullwidth,
    /// W
    Wide,
    /// H
    Halfwidth,
    /// Na
    Narrow,
    /// A and N
    Neutral,
}

impl EastAsianWidth {
    /// Whether the character renders in two cells
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Fullwidth | Self::Wide)
    }

    /// Whether the character renders in one cell by definition
    pub fn is_narrow(self) -> bool {
        matches!(self, Self::Halfwidth | Self::Narrow)
    }
}

const FULLWIDTH: &[(u32, u32)] = &[
    (0x3000, 0x3000),
    (0xFF01, 0xFF60),
    (0xFFE0, 0xFFE6),
];

const HALFWIDTH: &[(u32, u32)] = &[
    (0x20A9, 0x20A9),
    (0xFF61, 0xFFBE),
    (0xFFC2, 0xFFC7),
    (0xFFCA, 0xFFCF),
    (0xFFD2, 0xFFD7),
    (0xFFDA, 0xFFDC),
    (0xFFE8, 0xFFEE),
];

const NARROW: &[(u32, u32)] = &[
    (0x0020, 0x007E),
    (0x00A2, 0x00A3),
    (0x00A5, 0x00A6),
    (0x00AC, 0x00AC),
    (0x00AF, 0x00AF),
    (0x27E6, 0x27ED),
    (0x2985, 0x2986),
];

const WIDE: &[(u32, u32)] = &[
    (0x1100, 0x115F),
    (0x231A, 0x231B),
    (0x2329, 0x232A),
    (0x23E9, 0x23EC),
    (0x23F0, 0x23F0),
    (0x23F3, 0x23F3),
    (0x25FD, 0x25FE),
    (0x2614, 0x2615),
    (0x2648, 0x2653),
    (0x267F, 0x267F),
    (0x2693, 0x2693),
    (0x26A1, 0x26A1),
    (0x26AA, 0x26AB),
    (0x26BD, 0x26BE),
    (0x26C4, 0x26C5),
    (0x26CE, 0x26CE),
    (0x26D4, 0x26D4),
    (0x26EA, 0x26EA),
    (0x26F2, 0x26F3),
    (0x26F5, 0x26F5),
    (0x26FA, 0x26FA),
    (0x26FD, 0x26FD),
    (0x2705, 0x2705),
    (0x270A, 0x270B),
    (0x2728, 0x2728),
    (0x274C, 0x274C),
    (0x274E, 0x274E),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2795, 0x2797),
    (0x27B0, 0x27B0),
    (0x27BF, 0x27BF),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x2E80, 0x2E99),
    (0x2E9B, 0x2EF3),
    (0x2F00, 0x2FD5),
    (0x2FF0, 0x2FFF),
    (0x3001, 0x303E),
    (0x3041, 0x3096),
    (0x3099, 0x30FF),
    (0x3105, 0x312F),
    (0x3131, 0x318E),
    (0x3190, 0x31E3),
    (0x31EF, 0x321E),
    (0x3220, 0x3247),
    (0x3250, 0x4DBF),
    (0x4E00, 0xA48C),
    (0xA490, 0xA4C6),
    (0xA960, 0xA97C),
    (0xAC00, 0xD7A3),
    (0xF900, 0xFAFF),
    (0xFE10, 0xFE19),
    (0xFE30, 0xFE52),
    (0xFE54, 0xFE66),
    (0xFE68, 0xFE6B),
    (0x16FE0, 0x16FE4),
    (0x16FF0, 0x16FF1),
    (0x17000, 0x187F7),
    (0x18800, 0x18CD5),
    (0x18D00, 0x18D08),
    (0x1AFF0, 0x1B2FB),
    (0x1F004, 0x1F004),
    (0x1F0CF, 0x1F0CF),
    (0x1F18E, 0x1F18E),
    (0x1F191, 0x1F19A),
    (0x1F200, 0x1F202),
    (0x1F210, 0x1F23B),
    (0x1F240, 0x1F248),
    (0x1F250, 0x1F251),
    (0x1F260, 0x1F265),
    (0x1F300, 0x1F320),
    (0x1F32D, 0x1F335),
    (0x1F337, 0x1F37C),
    (0x1F37E, 0x1F393),
    (0x1F3A0, 0x1F3CA),
    (0x1F3CF, 0x1F3D3),
    (0x1F3E0, 0x1F3F0),
    (0x1F3F4, 0x1F3F4),
    (0x1F3F8, 0x1F43E),
    (0x1F440, 0x1F440),
    (0x1F442, 0x1F4FC),
    (0x1F4FF, 0x1F53D),
    (0x1F54B, 0x1F54E),
    (0x1F550, 0x1F567),
    (0x1F57A, 0x1F57A),
    (0x1F595, 0x1F596),
    (0x1F5A4, 0x1F5A4),
    (0x1F5FB, 0x1F64F),
    (0x1F680, 0x1F6C5),
    (0x1F6CC, 0x1F6CC),
    (0x1F6D0, 0x1F6D2),
    (0x1F6D5, 0x1F6D7),
    (0x1F6DC, 0x1F6DF),
    (0x1F6EB, 0x1F6EC),
    (0x1F6F4, 0x1F6FC),
    (0x1F7E0, 0x1F7EB),
    (0x1F7F0, 0x1F7F0),
    (0x1F90C, 0x1F93A),
    (0x1F93C, 0x1F945),
    (0x1F947, 0x1F9FF),
    (0x1FA70, 0x1FA7C),
    (0x1FA80, 0x1FA88),
    (0x1FA90, 0x1FABD),
    (0x1FABF, 0x1FAC5),
    (0x1FACE, 0x1FADB),
    (0x1FAE0, 0x1FAE8),
    (0x1FAF0, 0x1FAF8),
    (0x20000, 0x2FFFD),
    (0x30000, 0x3FFFD),
];

fn in_table(table: &[(u32, u32)], cp: u32) -> bool {
    table
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// East Asian Width category of a character
pub fn east_asian_width(c: char) -> EastAsianWidth {
    let cp = c as u32;

    if in_table(NARROW, cp) {
        EastAsianWidth::Narrow
    } else if in_table(FULLWIDTH, cp) {
        EastAsianWidth::Fullwidth
    } else if in_table(HALFWIDTH, cp) {
        EastAsianWidth::Halfwidth
    } else if in_table(WIDE, cp) {
        EastAsianWidth::Wide
    } else {
        EastAsianWidth::Neutral
    }
}

/// Weight of one character in a width-weighted line length
pub fn char_weight(c: char) -> f64 {
    let width = east_asian_width(c);

    if width.is_wide() {
        1.0
    } else if width.is_narrow() || c.is_whitespace() {
        0.5
    } else {
        1.0
    }
}

/// Width-weighted length of a line
pub fn weighted_length(line: &str) -> f64 {
    line.chars().map(char_weight).sum()
}
