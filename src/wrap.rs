//! Word wrapping for marked-up cell text.
//!
//! [`wrap_plain`] breaks stripped text greedily: at the last space that
//! fits, or mid-word when a single word is wider than the line. [`wrap`]
//! applies the same breaks to marked-up text. Tags are never split, the
//! whitespace around an inserted break is dropped, and every style open at
//! a break is closed before it and reopened after it.
//!
//! ```
//! use adaptive_table::wrap::wrap;
//!
//! assert_eq!(wrap("hello world", 5), "hello\nworld");
//! assert_eq!(
//!     wrap("<info>hello world</info>", 5),
//!     "<info>hello</info>\n<info>world</info>"
//! );
//! ```

use std::ops::Range;

use crate::cells::{cell_len, chop_cells};
use crate::markup::{ChunkMap, Token, balance_lines, tokenize};

/// One line of wrapped plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Byte range of the line in the unwrapped text.
    pub range: Range<usize>,
    /// Whether the line ends at a newline already present in the text.
    pub hard: bool,
}

/// Greedy word wrap of plain text, as byte ranges.
///
/// Existing newlines are kept. A source line no wider than `width` is kept
/// whole, trailing spaces included. A wider line keeps its leading indent on
/// its first line only and wraps the rest at `width - indent`.
#[must_use]
pub fn wrap_lines(text: &str, width: usize) -> Vec<Line> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut base = 0;

    for source in text.split('\n') {
        let first = lines.len();

        if cell_len(source) <= width {
            lines.push(Line {
                range: base..base + source.len(),
                hard: true,
            });
        } else {
            let indent = source.len() - source.trim_start_matches(' ').len();
            let inner = (width.saturating_sub(indent)).max(1);
            break_words(source, base, indent, inner, &mut lines);
            if lines.len() == first {
                lines.push(Line {
                    range: base..base,
                    hard: true,
                });
            }
            lines[first].range.start = base;
        }

        if let Some(last) = lines.last_mut() {
            last.hard = true;
        }
        base += source.len() + 1;
    }

    if let Some(last) = lines.last_mut() {
        last.hard = false;
    }
    lines
}

/// Break `source[start..]` into lines of at most `width` cells.
fn break_words(source: &str, base: usize, start: usize, width: usize, lines: &mut Vec<Line>) {
    let mut pos = start;

    while pos < source.len() {
        let rest = &source[pos..];

        if cell_len(rest) <= width {
            let kept = rest.trim_end_matches(' ').len();
            if kept > 0 {
                lines.push(Line {
                    range: base + pos..base + pos + kept,
                    hard: false,
                });
            }
            break;
        }

        let (head, tail) = chop_cells(rest, width);
        let taken = if tail.starts_with(' ') && !head.trim_end_matches(' ').is_empty() {
            head.trim_end_matches(' ').len()
        } else if let Some(space) = head.rfind(' ').filter(|&i| i > 0) {
            head[..space].trim_end_matches(' ').len()
        } else if head.is_empty() {
            rest.chars().next().map_or(rest.len(), char::len_utf8)
        } else {
            head.len()
        };

        lines.push(Line {
            range: base + pos..base + pos + taken,
            hard: false,
        });

        pos += taken;
        pos += source[pos..].len() - source[pos..].trim_start_matches(' ').len();
    }
}

/// Greedy word wrap of plain text.
#[must_use]
pub fn wrap_plain(text: &str, width: usize) -> String {
    let lines = wrap_lines(text, width);
    let mut out = String::with_capacity(text.len() + lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&text[line.range.clone()]);
    }
    out
}

/// Copy the markup between two lines, keeping tags and newlines and dropping
/// the spaces the break consumed.
///
/// At an inserted break, closing tags stay on the line above and everything
/// from the first opening tag on moves to the line below.
fn push_gap(out: &mut String, gap: &str, hard: bool) {
    let mut broke = hard;
    for element in tokenize(gap) {
        match element.token {
            Token::Text(text) => {
                out.extend(text.chars().filter(|&c| c == '\n'));
            }
            Token::Open(_) => {
                if !broke {
                    out.push('\n');
                    broke = true;
                }
                out.push_str(element.raw);
            }
            Token::Close(_) | Token::Escape => out.push_str(element.raw),
        }
    }
    if !broke {
        out.push('\n');
    }
}

/// Wrap marked-up text to `width` cells.
///
/// Text whose lines all fit is returned unchanged. Otherwise the stripped
/// result equals [`wrap_plain`] of the stripped input, and every line of the
/// result carries balanced markup.
#[must_use]
pub fn wrap(markup: &str, width: usize) -> String {
    let width = width.max(1);
    let map = ChunkMap::new(markup);
    let plain = map.plain();

    if plain.split('\n').all(|line| cell_len(line) <= width) {
        return markup.to_string();
    }

    let lines = wrap_lines(plain, width);
    tracing::trace!(width, lines = lines.len(), "wrapping cell");

    let mut out = String::with_capacity(markup.len() + lines.len() * 8);
    let mut cursor = 0;

    for (i, line) in lines.iter().enumerate() {
        let end = map.earliest_raw(line.range.end).max(cursor);
        out.push_str(&markup[cursor..end]);

        let next = match lines.get(i + 1) {
            Some(following) => map.latest_raw(following.range.start).max(end),
            None => markup.len(),
        };
        let gap = &markup[end..next];
        if i + 1 < lines.len() {
            push_gap(&mut out, gap, line.hard);
        } else {
            for element in tokenize(gap) {
                if !matches!(element.token, Token::Text(_)) {
                    out.push_str(element.raw);
                }
            }
        }
        cursor = next;
    }

    balance_lines(&out)
}
