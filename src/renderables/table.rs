//! Adaptive table - rows of styled cells sized to the terminal.
//!
//! An [`AdaptiveTable`] is filled with header and body rows, then rendered
//! once or many times. Each render plans column widths for the table's
//! maximum width, wraps the body cells that do not fit their columns, and
//! paints the wrapped rows through its [`OutputSink`]. The stored rows are
//! never modified, so rendering twice writes the same output.
//!
//! # Examples
//!
//! ```
//! use adaptive_table::console::Console;
//! use adaptive_table::renderables::table::{AdaptiveTable, Cell, Row, TableCell};
//!
//! let mut console = Console::new(Vec::new());
//! let mut table = AdaptiveTable::builder()
//!     .max_width(30)
//!     .box_style("ascii")
//!     .build(&mut console);
//! table.set_headers([vec!["Key", "Value"]]).unwrap();
//! table
//!     .add_row(vec!["name", "<info>a value that needs wrapping</info>"])
//!     .unwrap();
//! table
//!     .add_row(Row::new(vec![Cell::from(TableCell::new("spans both").colspan(2))]))
//!     .unwrap();
//! table.render().unwrap();
//! drop(table);
//!
//! let out = String::from_utf8(console.into_inner()).unwrap();
//! assert!(out.lines().all(|line| line.chars().count() <= 30));
//! ```

use std::fmt;
use std::io;

use crate::r#box::{self, BoxChars, SQUARE};
use crate::console::OutputSink;
use crate::export::TableFormat;
use crate::layout::{DEFAULT_MIN_COLUMN_WIDTH, LayoutPlan, LayoutPlanner, Overhead};
use crate::renderables::grid::GridPainter;
use crate::terminal;
use crate::wrap;

/// A cell with explicit span and wrapping metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Cell text, possibly carrying inline markup.
    pub text: String,
    /// Number of columns the cell covers.
    pub colspan: usize,
    /// Whether the cell may be wrapped to fit its column.
    pub wrappable: bool,
}

impl TableCell {
    /// Create a wrappable cell spanning one column.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            colspan: 1,
            wrappable: true,
        }
    }

    /// Set the number of columns the cell covers.
    #[must_use]
    pub fn colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan;
        self
    }

    /// Never wrap this cell; its column is kept at least as wide as it.
    #[must_use]
    pub fn no_wrap(mut self) -> Self {
        self.wrappable = false;
        self
    }
}

/// One cell of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Text spanning one column, wrappable.
    Plain(String),
    /// Text with explicit span and wrapping.
    Structured(TableCell),
}

impl Cell {
    /// The cell text, markup included.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Structured(cell) => &cell.text,
        }
    }

    /// Number of columns the cell covers.
    #[must_use]
    pub fn colspan(&self) -> usize {
        match self {
            Self::Plain(_) => 1,
            Self::Structured(cell) => cell.colspan,
        }
    }

    /// Whether the cell may be wrapped.
    #[must_use]
    pub fn is_wrappable(&self) -> bool {
        match self {
            Self::Plain(_) => true,
            Self::Structured(cell) => cell.wrappable,
        }
    }

    /// The same cell with different text.
    #[must_use]
    pub fn with_text(&self, text: String) -> Self {
        match self {
            Self::Plain(_) => Self::Plain(text),
            Self::Structured(cell) => Self::Structured(TableCell {
                text,
                ..cell.clone()
            }),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<TableCell> for Cell {
    fn from(value: TableCell) -> Self {
        Self::Structured(value)
    }
}

/// A table row: cells, or a horizontal rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Cells laid out left to right.
    Cells(Vec<Cell>),
    /// A horizontal rule across the table.
    Separator,
}

impl Row {
    /// Create a row of cells.
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        Self::Cells(cells)
    }

    /// The row's cells, or `None` for a separator.
    #[must_use]
    pub fn cells(&self) -> Option<&[Cell]> {
        match self {
            Self::Cells(cells) => Some(cells),
            Self::Separator => None,
        }
    }

    /// Returns true for a separator row.
    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }

    /// Number of columns the row covers.
    #[must_use]
    pub fn span(&self) -> usize {
        self.cells()
            .map_or(0, |cells| cells.iter().map(Cell::colspan).sum())
    }
}

impl<T: Into<Cell>> From<Vec<T>> for Row {
    fn from(cells: Vec<T>) -> Self {
        Self::Cells(cells.into_iter().map(Into::into).collect())
    }
}

/// Error type for table construction and rendering.
#[derive(Debug)]
pub enum TableError {
    /// A cell declared a span of zero columns.
    ZeroColspan { row: usize, column: usize },
    /// A separator was given as a header row.
    SeparatorHeader,
    /// Writing to the sink failed.
    Io(io::Error),
    /// Delimited export failed.
    Csv(csv::Error),
    /// Export output could not be collected.
    Export(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColspan { row, column } => {
                write!(f, "cell {column} of row {row} spans zero columns")
            }
            Self::SeparatorHeader => write!(f, "a separator cannot be a header row"),
            Self::Io(err) => write!(f, "failed to write table: {err}"),
            Self::Csv(err) => write!(f, "failed to export table: {err}"),
            Self::Export(msg) => write!(f, "failed to export table: {msg}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TableError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for TableError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for TableError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Export(err.to_string())
    }
}

fn check_row(row: &Row, index: usize, is_header: bool) -> Result<(), TableError> {
    match row.cells() {
        None if is_header => Err(TableError::SeparatorHeader),
        None => Ok(()),
        Some(cells) => match cells.iter().position(|cell| cell.colspan() == 0) {
            Some(column) => Err(TableError::ZeroColspan { row: index, column }),
            None => Ok(()),
        },
    }
}

/// Builder for [`AdaptiveTable`].
#[derive(Debug, Clone)]
pub struct TableBuilder {
    max_width: Option<usize>,
    min_column_width: usize,
    box_chars: &'static BoxChars,
    padding: usize,
    format: TableFormat,
    show_header: bool,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self {
            max_width: None,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            box_chars: &SQUARE,
            padding: 1,
            format: TableFormat::Table,
            show_header: true,
        }
    }
}

impl TableBuilder {
    /// Create a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum table width, borders included. Defaults to the terminal width.
    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Width below which wrappable columns are not squeezed.
    #[must_use]
    pub fn min_column_width(mut self, width: usize) -> Self {
        self.min_column_width = width;
        self
    }

    /// Border characters.
    #[must_use]
    pub fn box_chars(mut self, box_chars: &'static BoxChars) -> Self {
        self.box_chars = box_chars;
        self
    }

    /// Border characters by name; unknown names keep the current style.
    #[must_use]
    pub fn box_style(mut self, name: &str) -> Self {
        match r#box::get_box(name) {
            Some(box_chars) => self.box_chars = box_chars,
            None => {
                let known: Vec<&str> = r#box::BOX_STYLES.iter().map(|(style, _)| *style).collect();
                tracing::warn!(name, known = ?known, "unknown box style, keeping current");
            }
        }
        self
    }

    /// Spaces on each side of cell content.
    #[must_use]
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Output format.
    #[must_use]
    pub fn format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }

    /// Whether header rows are written.
    #[must_use]
    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Build the table writing to `sink`.
    ///
    /// Without an explicit maximum width the terminal width is detected now
    /// and kept for the table's lifetime.
    pub fn build<'a, S: OutputSink + 'a>(self, sink: S) -> AdaptiveTable<'a> {
        let max_width = self.max_width.unwrap_or_else(terminal::get_terminal_width);
        AdaptiveTable {
            sink: Box::new(sink),
            headers: Vec::new(),
            rows: Vec::new(),
            max_width,
            min_column_width: self.min_column_width,
            box_chars: self.box_chars,
            padding: self.padding,
            format: self.format,
            show_header: self.show_header,
        }
    }
}

/// A table that fits its columns to a maximum width.
pub struct AdaptiveTable<'a> {
    sink: Box<dyn OutputSink + 'a>,
    headers: Vec<Row>,
    rows: Vec<Row>,
    max_width: usize,
    min_column_width: usize,
    box_chars: &'static BoxChars,
    padding: usize,
    format: TableFormat,
    show_header: bool,
}

impl fmt::Debug for AdaptiveTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveTable")
            .field("headers", &self.headers)
            .field("rows", &self.rows)
            .field("max_width", &self.max_width)
            .field("min_column_width", &self.min_column_width)
            .field("padding", &self.padding)
            .field("format", &self.format)
            .field("show_header", &self.show_header)
            .finish_non_exhaustive()
    }
}

impl<'a> AdaptiveTable<'a> {
    /// Start configuring a table.
    #[must_use]
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Table with default settings, sized to the terminal.
    pub fn new<S: OutputSink + 'a>(sink: S) -> Self {
        TableBuilder::new().build(sink)
    }

    /// Maximum table width, borders included.
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Width below which wrappable columns are not squeezed.
    #[must_use]
    pub fn min_column_width(&self) -> usize {
        self.min_column_width
    }

    /// Header rows.
    #[must_use]
    pub fn headers(&self) -> &[Row] {
        &self.headers
    }

    /// Body rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replace the header rows.
    ///
    /// Nothing changes if any row is a separator or has a zero-span cell.
    pub fn set_headers<I, R>(&mut self, rows: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Row>,
    {
        let rows: Vec<Row> = rows.into_iter().map(Into::into).collect();
        for (index, row) in rows.iter().enumerate() {
            check_row(row, index, true)?;
        }
        self.headers = rows;
        Ok(())
    }

    /// Append a body row.
    pub fn add_row(&mut self, row: impl Into<Row>) -> Result<(), TableError> {
        let row = row.into();
        check_row(&row, self.rows.len(), false)?;
        self.rows.push(row);
        Ok(())
    }

    /// Append several body rows.
    ///
    /// Nothing is appended if any row is invalid.
    pub fn add_rows<I, R>(&mut self, rows: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Row>,
    {
        let rows: Vec<Row> = rows.into_iter().map(Into::into).collect();
        for (offset, row) in rows.iter().enumerate() {
            check_row(row, self.rows.len() + offset, false)?;
        }
        self.rows.extend(rows);
        Ok(())
    }

    fn overhead(&self) -> Overhead {
        Overhead {
            border_width: 1,
            padding_width: self.padding,
        }
    }

    fn visible_headers(&self) -> &[Row] {
        if self.show_header { &self.headers } else { &[] }
    }

    /// Plan column widths for the current rows, measured by the sink.
    #[must_use]
    pub fn plan(&self) -> LayoutPlan {
        LayoutPlanner::new(self.max_width, self.min_column_width, self.overhead()).plan_with(
            self.visible_headers(),
            &self.rows,
            &|text: &str| self.sink.measure(text),
        )
    }

    /// Body rows with every oversized cell wrapped to its planned width.
    #[must_use]
    pub fn wrapped_rows(&self, plan: &LayoutPlan) -> Vec<Row> {
        let overhead = self.overhead();
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let Some(cells) = row.cells() else {
                    return Row::Separator;
                };
                let mut column = 0;
                let wrapped = cells
                    .iter()
                    .map(|cell| {
                        let start = column;
                        let width = plan.span_width(start, cell.colspan(), &overhead);
                        column += cell.colspan();
                        if cell.is_wrappable() && self.sink.measure(cell.text()) > width {
                            tracing::debug!(row = index, column = start, width, "wrapping cell");
                            cell.with_text(wrap::wrap(cell.text(), width))
                        } else {
                            cell.clone()
                        }
                    })
                    .collect();
                Row::Cells(wrapped)
            })
            .collect()
    }

    /// Render to a string instead of the sink.
    ///
    /// The grid format returns marked-up text; export formats return their
    /// records.
    pub fn render_to_string(&self) -> Result<String, TableError> {
        let strip = |text: &str| self.sink.strip(text);
        if let Some(exported) = self.format.export(self.visible_headers(), &self.rows, &strip) {
            return exported;
        }

        let plan = self.plan();
        if plan.is_empty() {
            return Ok(String::new());
        }
        let rows = self.wrapped_rows(&plan);
        let measure = |text: &str| self.sink.measure(text);
        Ok(GridPainter::new(self.box_chars, self.padding)
            .with_measure(&measure)
            .paint(self.visible_headers(), &rows))
    }

    /// Plan, wrap and paint the table to its sink.
    pub fn render(&mut self) -> Result<(), TableError> {
        let span = tracing::debug_span!(
            "render",
            headers = self.headers.len(),
            rows = self.rows.len(),
            max_width = self.max_width,
            format = %self.format,
        );
        let _enter = span.enter();

        let out = self.render_to_string()?;
        if out.is_empty() {
            return Ok(());
        }
        match self.format {
            TableFormat::Table => self.sink.write_styled(&out)?,
            TableFormat::Csv | TableFormat::Tsv | TableFormat::Plain => {
                self.sink.write_plain(&out)?;
            }
        }
        Ok(())
    }
}
