//! Styles named by markup tags.
//!
//! A tag such as `<info>` names a built-in style, while a tag such as
//! `<fg=white;bg=red;options=bold,underscore>` describes one inline.
//! [`Style::from_tag`] resolves either form; unknown names resolve to `None`
//! and are left as literal text by the markup tokenizer.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use bitflags::bitflags;
use lru::LruCache;

use crate::color::{Color, ColorParseError};

bitflags! {
    /// Text attribute flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold/bright text (SGR 1).
        const BOLD       = 1 << 0;
        /// Single underline (SGR 4).
        const UNDERSCORE = 1 << 1;
        /// Slow blinking text (SGR 5).
        const BLINK      = 1 << 2;
        /// Reverse video (SGR 7).
        const REVERSE    = 1 << 3;
        /// Concealed/hidden text (SGR 8).
        const CONCEAL    = 1 << 4;
    }
}

impl Attributes {
    /// Map of attribute flags to their ANSI SGR codes.
    const SGR_CODES: [(Self, u8); 5] = [
        (Self::BOLD, 1),
        (Self::UNDERSCORE, 4),
        (Self::BLINK, 5),
        (Self::REVERSE, 7),
        (Self::CONCEAL, 8),
    ];

    /// Get the ANSI SGR codes for enabled attributes.
    #[must_use]
    pub fn to_sgr_codes(&self) -> Vec<u8> {
        Self::SGR_CODES
            .iter()
            .filter_map(|(attr, code)| self.contains(*attr).then_some(*code))
            .collect()
    }
}

/// Visual style for a run of terminal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: None,
            bgcolor: None,
            attributes: Attributes::empty(),
        }
    }

    /// Returns true if applying this style changes nothing.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.bgcolor.is_none() && self.attributes.is_empty()
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    /// Enable attributes.
    #[must_use]
    pub fn with(mut self, attributes: Attributes) -> Self {
        self.attributes.insert(attributes);
        self
    }

    /// Combine this style with another, with the other style taking precedence.
    #[must_use]
    pub fn combine(&self, other: &Style) -> Style {
        Style {
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            attributes: self.attributes | other.attributes,
        }
    }

    /// Generate the SGR parameter list for this style.
    #[must_use]
    pub fn make_ansi_codes(&self) -> String {
        let mut codes: Vec<String> = self
            .attributes
            .to_sgr_codes()
            .into_iter()
            .map(|code| code.to_string())
            .collect();
        if let Some(color) = &self.color {
            codes.extend(color.ansi_codes(true));
        }
        if let Some(bgcolor) = &self.bgcolor {
            codes.extend(bgcolor.ansi_codes(false));
        }
        codes.join(";")
    }

    /// Get ANSI codes as (prefix, suffix) tuple.
    ///
    /// Both are empty for a plain style.
    #[must_use]
    pub fn render_ansi(&self) -> (String, String) {
        let codes = self.make_ansi_codes();
        if codes.is_empty() {
            return (String::new(), String::new());
        }
        (format!("\x1b[{codes}m"), String::from("\x1b[0m"))
    }

    /// Resolve the style named by a markup tag (cached).
    ///
    /// Returns `None` when the tag names neither a built-in style nor a
    /// valid inline definition.
    #[must_use]
    pub fn from_tag(name: &str) -> Option<Self> {
        static CACHE: LazyLock<Mutex<LruCache<String, Option<Style>>>> = LazyLock::new(|| {
            Mutex::new(LruCache::new(NonZeroUsize::new(256).expect("non-zero")))
        });

        let normalized = name.trim().to_lowercase();

        if let Ok(mut cache) = CACHE.lock()
            && let Some(cached) = cache.get(&normalized)
        {
            return *cached;
        }

        let resolved = builtin(&normalized).or_else(|| Self::parse(&normalized).ok());

        if let Ok(mut cache) = CACHE.lock() {
            cache.put(normalized, resolved);
        }

        resolved
    }

    /// Parse an inline definition: `fg=<color>;bg=<color>;options=<a>,<b>`.
    pub fn parse(definition: &str) -> Result<Self, StyleParseError> {
        let mut style = Style::new();
        let mut seen_any = false;

        for part in definition.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = part.split_once('=') else {
                return Err(StyleParseError::InvalidFormat(part.to_string()));
            };
            match key.trim() {
                "fg" => style.color = Some(Color::parse(value)?),
                "bg" => style.bgcolor = Some(Color::parse(value)?),
                "options" => {
                    for option in value.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                        let attr = parse_option(option)
                            .ok_or_else(|| StyleParseError::UnknownOption(option.to_string()))?;
                        style.attributes.insert(attr);
                    }
                }
                other => return Err(StyleParseError::UnknownKey(other.to_string())),
            }
            seen_any = true;
        }

        if seen_any {
            Ok(style)
        } else {
            Err(StyleParseError::InvalidFormat(definition.to_string()))
        }
    }
}

fn builtin(name: &str) -> Option<Style> {
    match name {
        "info" => Some(Style::new().color(Color::Standard(2))),
        "comment" => Some(Style::new().color(Color::Standard(3))),
        "question" => Some(
            Style::new()
                .color(Color::Standard(0))
                .bgcolor(Color::Standard(6)),
        ),
        "error" => Some(
            Style::new()
                .color(Color::Standard(7))
                .bgcolor(Color::Standard(1)),
        ),
        _ => None,
    }
}

fn parse_option(name: &str) -> Option<Attributes> {
    match name {
        "bold" => Some(Attributes::BOLD),
        "underscore" => Some(Attributes::UNDERSCORE),
        "blink" => Some(Attributes::BLINK),
        "reverse" => Some(Attributes::REVERSE),
        "conceal" => Some(Attributes::CONCEAL),
        _ => None,
    }
}

/// A stack of styles opened by nested markup tags.
#[derive(Debug, Clone, Default)]
pub struct StyleStack {
    stack: Vec<(String, Style)>,
}

impl StyleStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The combination of every open style.
    #[must_use]
    pub fn current(&self) -> Style {
        self.stack
            .iter()
            .fold(Style::new(), |acc, (_, style)| acc.combine(style))
    }

    /// Open a style under its tag name.
    pub fn push(&mut self, name: &str, style: Style) {
        self.stack.push((name.to_lowercase(), style));
    }

    /// Close the most recent style, or the most recent one with `name`.
    pub fn pop(&mut self, name: Option<&str>) {
        match name {
            None => {
                self.stack.pop();
            }
            Some(name) => {
                let name = name.to_lowercase();
                if let Some(i) = self.stack.iter().rposition(|(open, _)| *open == name) {
                    self.stack.remove(i);
                }
            }
        }
    }

    /// Number of open styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if no style is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Error type for inline style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    InvalidFormat(String),
    UnknownKey(String),
    UnknownOption(String),
    Color(ColorParseError),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid style definition: {s}"),
            Self::UnknownKey(s) => write!(f, "Unknown style key: {s}"),
            Self::UnknownOption(s) => write!(f, "Unknown style option: {s}"),
            Self::Color(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StyleParseError {}

impl From<ColorParseError> for StyleParseError {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}
