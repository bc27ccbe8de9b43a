//! Inline style markup.
//!
//! Cell text may carry tags such as `<info>done</info>` or
//! `<fg=red;options=bold>failed</>`. A closing tag `</name>` closes the
//! nearest open tag of that name and `</>` closes the most recent one. A
//! backslash escapes a literal bracket: `\<`. A tag whose name resolves to
//! no [`Style`] is not markup at all, so `Vec<String>` stays as written.
//!
//! The wrapper and the console both work from [`tokenize`]. The wrapper
//! additionally uses a [`ChunkMap`] to translate offsets in the stripped
//! text back into offsets in the marked-up text.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::cells::max_line_len;
use crate::style::Style;

/// Error type for markup validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Closing tag with nothing to close.
    UnmatchedClosingTag(Option<String>),
    /// Tag still open at the end of the text.
    UnclosedTag(String),
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedClosingTag(None) => {
                write!(f, "closing tag '</>' has nothing to close")
            }
            Self::UnmatchedClosingTag(Some(tag)) => {
                write!(f, "closing tag '</{tag}>' doesn't match any open tag")
            }
            Self::UnclosedTag(tag) => write!(f, "tag '<{tag}>' is never closed"),
        }
    }
}

impl std::error::Error for MarkupError {}

/// A lexical unit of marked-up text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text.
    Text(&'a str),
    /// An escaped `<`.
    Escape,
    /// Opening tag, holding the tag name.
    Open(&'a str),
    /// Closing tag; `None` for `</>`.
    Close(Option<&'a str>),
}

/// A token together with where it sits in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    /// Byte offset of the token in the source.
    pub offset: usize,
    /// The source text of the token.
    pub raw: &'a str,
    pub token: Token<'a>,
}

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\<|</>|</?[a-zA-Z][a-zA-Z0-9_=;,#-]*>").expect("invalid regex")
});

/// Split marked-up text into tokens.
#[must_use]
pub fn tokenize(markup: &str) -> Vec<Element<'_>> {
    let mut elements = Vec::new();
    let mut last_end = 0;

    for found in TAG_PATTERN.find_iter(markup) {
        if found.start() > last_end {
            let raw = &markup[last_end..found.start()];
            elements.push(Element {
                offset: last_end,
                raw,
                token: Token::Text(raw),
            });
        }

        let raw = found.as_str();
        let token = if raw == "\\<" {
            Token::Escape
        } else if raw == "</>" {
            Token::Close(None)
        } else if let Some(name) = raw.strip_prefix("</").and_then(|r| r.strip_suffix('>')) {
            named_tag(name, raw, Token::Close(Some(name)))
        } else {
            let name = raw
                .strip_prefix('<')
                .and_then(|r| r.strip_suffix('>'))
                .unwrap_or(raw);
            named_tag(name, raw, Token::Open(name))
        };
        elements.push(Element {
            offset: found.start(),
            raw,
            token,
        });

        last_end = found.end();
    }

    if last_end < markup.len() {
        let raw = &markup[last_end..];
        elements.push(Element {
            offset: last_end,
            raw,
            token: Token::Text(raw),
        });
    }

    elements
}

/// A tag only counts as markup when its name resolves to a style.
fn named_tag<'a>(name: &str, raw: &'a str, tag: Token<'a>) -> Token<'a> {
    if Style::from_tag(name).is_some() {
        tag
    } else {
        Token::Text(raw)
    }
}

/// Remove markup, leaving the text a reader would see.
#[must_use]
pub fn strip(markup: &str) -> String {
    if !markup.contains('<') {
        return markup.to_string();
    }
    let mut plain = String::with_capacity(markup.len());
    for element in tokenize(markup) {
        match element.token {
            Token::Text(text) => plain.push_str(text),
            Token::Escape => plain.push('<'),
            Token::Open(_) | Token::Close(_) => {}
        }
    }
    plain
}

/// Display width of the widest line of marked-up text.
#[must_use]
pub fn measure(markup: &str) -> usize {
    max_line_len(&strip(markup))
}

/// Escape text so every `<` is taken literally.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('<', "\\<")
}

/// Remove the most recent open tag called `name`.
fn pop_matching(stack: &mut Vec<&str>, name: &str) -> bool {
    match stack.iter().rposition(|open| open.eq_ignore_ascii_case(name)) {
        Some(i) => {
            stack.remove(i);
            true
        }
        None => false,
    }
}

/// Check that every tag is closed and every close has a match.
pub fn validate(markup: &str) -> Result<(), MarkupError> {
    let mut stack: Vec<&str> = Vec::new();

    for element in tokenize(markup) {
        match element.token {
            Token::Open(name) => stack.push(name),
            Token::Close(None) => {
                stack.pop().ok_or(MarkupError::UnmatchedClosingTag(None))?;
            }
            Token::Close(Some(name)) => {
                if !pop_matching(&mut stack, name) {
                    return Err(MarkupError::UnmatchedClosingTag(Some(name.to_string())));
                }
            }
            Token::Text(_) | Token::Escape => {}
        }
    }

    match stack.pop() {
        Some(name) => Err(MarkupError::UnclosedTag(name.to_string())),
        None => Ok(()),
    }
}

/// Close the styles open at each line break and reopen them on the next line.
///
/// Every line of the result carries its own balanced markup, so lines can be
/// painted side by side without styles bleeding across borders.
///
/// ```
/// use adaptive_table::markup::balance_lines;
///
/// assert_eq!(
///     balance_lines("<info>one\ntwo</info>"),
///     "<info>one</info>\n<info>two</info>"
/// );
/// ```
#[must_use]
pub fn balance_lines(markup: &str) -> String {
    if !markup.contains('\n') || !markup.contains('<') {
        return markup.to_string();
    }

    let mut out = String::with_capacity(markup.len() + 16);
    let mut stack: Vec<&str> = Vec::new();

    for element in tokenize(markup) {
        match element.token {
            Token::Text(text) => {
                let mut lines = text.split('\n');
                if let Some(first) = lines.next() {
                    out.push_str(first);
                }
                for line in lines {
                    for name in stack.iter().rev() {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                    out.push('\n');
                    for name in &stack {
                        out.push('<');
                        out.push_str(name);
                        out.push('>');
                    }
                    out.push_str(line);
                }
            }
            Token::Escape => out.push_str(element.raw),
            Token::Open(name) => {
                stack.push(name);
                out.push_str(element.raw);
            }
            Token::Close(None) => {
                stack.pop();
                out.push_str(element.raw);
            }
            Token::Close(Some(name)) => {
                pop_matching(&mut stack, name);
                out.push_str(element.raw);
            }
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
struct Chunk {
    raw_start: usize,
    raw_len: usize,
    plain_start: usize,
    plain_len: usize,
}

impl Chunk {
    fn is_escape(&self) -> bool {
        self.raw_len != self.plain_len
    }
}

/// Map between offsets in marked-up text and offsets in its stripped form.
///
/// Each chunk is a run of visible text together with where it sits in the
/// marked-up source. A position in the stripped text may correspond to
/// several source offsets when tags sit at that position; the map can
/// answer with the earliest (before the tags) or the latest (after them).
#[derive(Debug, Clone)]
pub struct ChunkMap<'a> {
    markup: &'a str,
    plain: String,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkMap<'a> {
    /// Build the map for a marked-up string.
    #[must_use]
    pub fn new(markup: &'a str) -> Self {
        let mut plain = String::with_capacity(markup.len());
        let mut chunks = Vec::new();

        for element in tokenize(markup) {
            let text = match element.token {
                Token::Text(text) => text,
                Token::Escape => "<",
                Token::Open(_) | Token::Close(_) => continue,
            };
            chunks.push(Chunk {
                raw_start: element.offset,
                raw_len: element.raw.len(),
                plain_start: plain.len(),
                plain_len: text.len(),
            });
            plain.push_str(text);
        }

        Self {
            markup,
            plain,
            chunks,
        }
    }

    /// The marked-up source.
    #[must_use]
    pub fn markup(&self) -> &'a str {
        self.markup
    }

    /// The stripped text.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Chunk holding the visible byte at `pos`.
    fn chunk_at(&self, pos: usize) -> Option<&Chunk> {
        let i = self
            .chunks
            .partition_point(|chunk| chunk.plain_start + chunk.plain_len <= pos);
        self.chunks.get(i)
    }

    /// Source offset just after the first `pos` visible bytes, before any
    /// tags that follow them.
    #[must_use]
    pub fn earliest_raw(&self, pos: usize) -> usize {
        if pos == 0 {
            return 0;
        }
        self.chunk_at(pos - 1)
            .map_or(self.markup.len(), |chunk| {
                if chunk.is_escape() {
                    chunk.raw_start + chunk.raw_len
                } else {
                    chunk.raw_start + (pos - chunk.plain_start)
                }
            })
    }

    /// Source offset of the visible byte at `pos`, after any tags that
    /// precede it.
    #[must_use]
    pub fn latest_raw(&self, pos: usize) -> usize {
        if pos >= self.plain.len() {
            return self.markup.len();
        }
        self.chunk_at(pos).map_or(self.markup.len(), |chunk| {
            if chunk.is_escape() {
                chunk.raw_start
            } else {
                chunk.raw_start + (pos - chunk.plain_start)
            }
        })
    }
}
