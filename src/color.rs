//! Colors accepted in inline style markup.
//!
//! Markup tags such as `<fg=red;bg=bright-white>` name colors by word
//! (the eight ANSI colors, their `bright-` variants and `default`) or by
//! `#rrggbb` / `#rgb` hex.
//!
//! ```
//! use adaptive_table::color::Color;
//!
//! let red = Color::parse("red").unwrap();
//! assert_eq!(red.ansi_codes(true), vec!["31".to_string()]);
//!
//! let orange = Color::parse("#ff8800").unwrap();
//! assert_eq!(orange.ansi_codes(false), vec!["48", "2", "255", "136", "0"]);
//! ```

use std::fmt;

/// Names of the eight standard ANSI colors, indexed by color number.
const STANDARD_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's default foreground/background.
    Default,
    /// One of the 16 ANSI colors (0-7 normal, 8-15 bright).
    Standard(u8),
    /// 24-bit RGB color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color name or hex code.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        let normalized = color.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if normalized == "default" {
            return Ok(Self::Default);
        }
        if let Some(hex) = normalized.strip_prefix('#') {
            return parse_hex(hex).ok_or(ColorParseError::InvalidHex(normalized.clone()));
        }

        let (base, bright) = match normalized
            .strip_prefix("bright-")
            .or_else(|| normalized.strip_prefix("bright_"))
        {
            Some(base) => (base, true),
            None => (normalized.as_str(), false),
        };

        STANDARD_NAMES
            .iter()
            .position(|name| *name == base)
            .map(|number| {
                #[allow(clippy::cast_possible_truncation)]
                let number = number as u8;
                Self::Standard(if bright { number + 8 } else { number })
            })
            .ok_or(ColorParseError::UnknownColor(normalized))
    }

    /// SGR parameters selecting this color as foreground or background.
    #[must_use]
    pub fn ansi_codes(&self, foreground: bool) -> Vec<String> {
        match *self {
            Self::Default => vec![if foreground { "39" } else { "49" }.to_string()],
            Self::Standard(number) => {
                let code = if number < 8 {
                    if foreground { 30 + number } else { 40 + number }
                } else if foreground {
                    82 + number
                } else {
                    92 + number
                };
                vec![code.to_string()]
            }
            Self::Rgb(red, green, blue) => vec![
                if foreground { "38" } else { "48" }.to_string(),
                "2".to_string(),
                red.to_string(),
                green.to_string(),
                blue.to_string(),
            ],
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
