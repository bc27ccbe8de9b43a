//! Grid painter for already-wrapped rows.
//!
//! The painter sizes each column to the widest line of content it holds
//! and draws borders around multi-line cells. It does no wrapping of its
//! own: cells arrive wrapped to their planned widths.

use std::fmt;

use crate::r#box::{BoxChars, Rule};
use crate::cells::pad_to;
use crate::markup::{self, balance_lines};
use crate::renderables::table::Row;

/// Paints rows of multi-line cells into a bordered grid.
#[derive(Clone, Copy)]
pub struct GridPainter<'a> {
    box_chars: &'a BoxChars,
    padding: usize,
    measure: &'a dyn Fn(&str) -> usize,
}

impl fmt::Debug for GridPainter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridPainter")
            .field("box_chars", self.box_chars)
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}

impl<'a> GridPainter<'a> {
    /// Create a painter that measures cells with [`markup::measure`].
    #[must_use]
    pub fn new(box_chars: &'a BoxChars, padding: usize) -> Self {
        Self {
            box_chars,
            padding,
            measure: &markup::measure,
        }
    }

    /// Measure cell lines with `measure` instead.
    #[must_use]
    pub fn with_measure(mut self, measure: &'a dyn Fn(&str) -> usize) -> Self {
        self.measure = measure;
        self
    }

    /// Width between the content of two adjacent cells.
    fn gutter(&self) -> usize {
        1 + 2 * self.padding
    }

    /// Content width of each column.
    ///
    /// Single-column cells size their column directly. A spanning cell that
    /// is wider than the columns it covers, gutters included, widens the
    /// last of them.
    #[must_use]
    pub fn column_widths(&self, headers: &[Row], rows: &[Row]) -> Vec<usize> {
        let all = || headers.iter().chain(rows).filter_map(Row::cells);
        let columns = all()
            .map(|cells| cells.iter().map(|c| c.colspan().max(1)).sum::<usize>())
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];

        for cells in all() {
            let mut column = 0;
            for cell in cells {
                if cell.colspan() <= 1 {
                    widths[column] = widths[column].max((self.measure)(cell.text()));
                }
                column += cell.colspan().max(1);
            }
        }

        for cells in all() {
            let mut column = 0;
            for cell in cells {
                let span = cell.colspan().max(1);
                if span > 1 {
                    let end = column + span;
                    let available = self.span_width(&widths, column, span);
                    let needed = (self.measure)(cell.text());
                    if needed > available {
                        widths[end - 1] += needed - available;
                    }
                }
                column += span;
            }
        }

        widths
    }

    fn span_width(&self, widths: &[usize], column: usize, span: usize) -> usize {
        widths[column..column + span].iter().sum::<usize>() + (span - 1) * self.gutter()
    }

    /// Paint header rows, a header rule, and body rows.
    ///
    /// Returns the painted lines, each ending in a newline, or an empty
    /// string when there are no columns.
    #[must_use]
    pub fn paint(&self, headers: &[Row], rows: &[Row]) -> String {
        let widths = self.column_widths(headers, rows);
        if widths.is_empty() {
            return String::new();
        }
        let outer: Vec<usize> = widths.iter().map(|w| w + 2 * self.padding).collect();

        let mut out = String::new();
        self.box_chars.push_rule(&mut out, &outer, Rule::Top);

        for row in headers {
            self.push_row(&mut out, &widths, row);
        }
        if !headers.is_empty() && !rows.is_empty() {
            self.box_chars.push_rule(&mut out, &outer, Rule::Header);
        }
        for row in rows {
            if row.is_separator() {
                self.box_chars.push_rule(&mut out, &outer, Rule::Separator);
            } else {
                self.push_row(&mut out, &widths, row);
            }
        }

        self.box_chars.push_rule(&mut out, &outer, Rule::Bottom);
        out
    }

    fn push_row(&self, out: &mut String, widths: &[usize], row: &Row) {
        let Some(cells) = row.cells() else {
            return;
        };

        // (lines, content width) per painted cell, with empty cells
        // filling any columns the row leaves uncovered.
        let mut painted: Vec<(Vec<String>, usize)> = Vec::new();
        let mut column = 0;
        for cell in cells {
            let span = cell.colspan().max(1);
            let lines = balance_lines(cell.text())
                .split('\n')
                .map(String::from)
                .collect();
            painted.push((lines, self.span_width(widths, column, span)));
            column += span;
        }
        for &width in &widths[column.min(widths.len())..] {
            painted.push((Vec::new(), width));
        }

        let height = painted.iter().map(|(lines, _)| lines.len()).max().unwrap_or(0).max(1);
        let pad = " ".repeat(self.padding);

        for line in 0..height {
            out.push(self.box_chars.cell_left());
            for (i, (lines, width)) in painted.iter().enumerate() {
                if i > 0 {
                    out.push(self.box_chars.cell_divider());
                }
                let text = lines.get(line).map_or("", String::as_str);
                out.push_str(&pad);
                out.push_str(&pad_to(text, (self.measure)(text), *width));
                out.push_str(&pad);
            }
            out.push(self.box_chars.cell_right());
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#box::ASCII;
    use crate::renderables::table::{Cell, TableCell};

    fn painter() -> GridPainter<'static> {
        GridPainter::new(&ASCII, 1)
    }

    #[test]
    fn test_paint_header_and_body() {
        let headers = vec![Row::from(vec!["id", "name"])];
        let rows = vec![Row::from(vec!["1", "alpha"])];
        assert_eq!(
            painter().paint(&headers, &rows),
            "+----+-------+\n\
             | id | name  |\n\
             +----+-------+\n\
             | 1  | alpha |\n\
             +----+-------+\n"
        );
    }

    #[test]
    fn test_paint_multiline_cells() {
        let rows = vec![Row::from(vec!["a\nb\nc", "x"])];
        assert_eq!(
            painter().paint(&[], &rows),
            "+---+---+\n\
             | a | x |\n\
             | b |   |\n\
             | c |   |\n\
             +---+---+\n"
        );
    }

    #[test]
    fn test_paint_separator_row() {
        let rows = vec![Row::from(vec!["a"]), Row::Separator, Row::from(vec!["b"])];
        assert_eq!(
            painter().paint(&[], &rows),
            "+---+\n| a |\n+---+\n| b |\n+---+\n"
        );
    }

    #[test]
    fn test_missing_cells_painted_empty() {
        let rows = vec![Row::from(vec!["a", "b"]), Row::from(vec!["c"])];
        let out = painter().paint(&[], &rows);
        assert!(out.contains("| c |   |\n"));
    }

    #[test]
    fn test_spanning_cell() {
        let rows = vec![
            Row::from(vec!["ab", "cd"]),
            Row::new(vec![Cell::from(TableCell::new("0123456789").colspan(2))]),
        ];
        let painter = painter();
        assert_eq!(painter.column_widths(&[], &rows), vec![2, 5]);
        assert_eq!(
            painter.paint(&[], &rows),
            "+----+-------+\n\
             | ab | cd    |\n\
             | 0123456789 |\n\
             +----+-------+\n"
        );
    }

    #[test]
    fn test_markup_is_balanced_per_line() {
        let rows = vec![Row::from(vec!["<info>a\nb</info>"])];
        let out = painter().paint(&[], &rows);
        assert!(out.contains("| <info>a</info> |\n"));
        assert!(out.contains("| <info>b</info> |\n"));
    }

    #[test]
    fn test_custom_measure_sizes_columns() {
        let rows = vec![Row::from(vec!["<info>ab</info>", "c"])];
        assert_eq!(painter().column_widths(&[], &rows), vec![2, 1]);

        let raw_len = |text: &str| text.len();
        let painter = GridPainter::new(&ASCII, 1).with_measure(&raw_len);
        assert_eq!(painter.column_widths(&[], &rows), vec![15, 1]);
        assert_eq!(
            painter.paint(&[], &rows),
            "+-----------------+---+\n\
             | <info>ab</info> | c |\n\
             +-----------------+---+\n"
        );
    }

    #[test]
    fn test_no_columns() {
        assert_eq!(painter().paint(&[], &[Row::Separator]), "");
        assert_eq!(painter().paint(&[], &[]), "");
    }
}
