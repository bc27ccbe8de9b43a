//! Terminal cell widths.
//!
//! Every width in this crate is measured in terminal cells: most characters
//! take one cell, CJK ideographs and most emoji take two, and control and
//! combining characters take none.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use unicode_width::UnicodeWidthChar;

/// Strings shorter than this are measured directly.
const CACHE_MIN_LEN: usize = 8;

static CELL_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Cell width of a single character.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

fn compute_cell_width(text: &str) -> usize {
    text.chars().map(get_character_cell_size).sum()
}

/// Total cell width of a string.
///
/// Widths of strings of eight bytes or more are kept in a process-wide LRU
/// cache, since table layout measures the same cell text several times per
/// render.
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_cell_width(text);
    }

    if let Ok(mut cache) = CELL_LEN_CACHE.lock()
        && let Some(&cached) = cache.get(text)
    {
        return cached;
    }

    let width = compute_cell_width(text);

    if let Ok(mut cache) = CELL_LEN_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Width of the widest line in a multi-line string.
#[must_use]
pub fn max_line_len(text: &str) -> usize {
    text.split('\n').map(cell_len).max().unwrap_or(0)
}

/// Split a string so the left part fits in `max_size` cells.
///
/// A wide character that would straddle the boundary goes to the right part.
#[must_use]
pub fn chop_cells(text: &str, max_size: usize) -> (&str, &str) {
    let mut width = 0;
    let mut byte_pos = 0;

    for (i, c) in text.char_indices() {
        let char_width = get_character_cell_size(c);
        if width + char_width > max_size {
            break;
        }
        width += char_width;
        byte_pos = i + c.len_utf8();
    }

    text.split_at(byte_pos)
}

/// Pad a string on the right with spaces up to `total` cells.
///
/// `width` is the string's visible width, which differs from its byte
/// content when it carries markup. Text already at least `total` wide is
/// returned as is.
#[must_use]
pub fn pad_to(text: &str, width: usize, total: usize) -> String {
    let mut out = String::with_capacity(text.len() + total.saturating_sub(width));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', total.saturating_sub(width)));
    out
}
