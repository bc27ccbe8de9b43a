//! Column width planning.
//!
//! The planner measures every cell, derives a natural and a minimum width
//! per column, and shares the width left after borders and padding among
//! the columns in proportion to their natural widths.
//!
//! Columns are served narrowest first. Each gets its proportional share of
//! what is left, raised to its minimum, and the columns served later absorb
//! whatever the raise cost. A column whose minimum is forced (a header, or
//! a cell that must not wrap) can push the table past the maximum width;
//! that is accepted and logged.
//!
//! ```
//! use adaptive_table::layout::{LayoutPlanner, Overhead};
//! use adaptive_table::renderables::table::Row;
//!
//! let rows = vec![Row::from(vec!["a".repeat(10), "b".repeat(90)])];
//! // 50 cells of content once borders and padding are paid for.
//! let planner = LayoutPlanner::new(50 + 3 + 4, 10, Overhead::default());
//! let plan = planner.plan(&[], &rows);
//! assert_eq!(plan.widths(), &[10, 40]);
//! ```

use num_rational::Ratio;

use crate::markup;
use crate::renderables::table::{Cell, Row};

/// Minimum column width used when none is configured.
pub const DEFAULT_MIN_COLUMN_WIDTH: usize = 10;

/// Width the table spends outside cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overhead {
    /// Width of one vertical border.
    pub border_width: usize,
    /// Padding on each side of a cell.
    pub padding_width: usize,
}

impl Default for Overhead {
    fn default() -> Self {
        Self {
            border_width: 1,
            padding_width: 1,
        }
    }
}

impl Overhead {
    /// Total overhead of a table with `columns` columns.
    #[must_use]
    pub fn total(&self, columns: usize) -> usize {
        (columns + 1) * self.border_width + columns * 2 * self.padding_width
    }

    /// Width between the content of two adjacent cells.
    #[must_use]
    pub fn gutter(&self) -> usize {
        self.border_width + 2 * self.padding_width
    }
}

/// The planner's decision: a content width per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    widths: Vec<usize>,
    minimums: Vec<usize>,
    naturals: Vec<usize>,
    budget: usize,
}

impl LayoutPlan {
    /// Target content width of each column, by index.
    #[must_use]
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Target width of one column.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<usize> {
        self.widths.get(column).copied()
    }

    /// Minimum width of each column.
    #[must_use]
    pub fn minimums(&self) -> &[usize] {
        &self.minimums
    }

    /// Widest content of each column.
    #[must_use]
    pub fn naturals(&self) -> &[usize] {
        &self.naturals
    }

    /// Width available for cell content.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Returns true if the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Sum of all column widths.
    #[must_use]
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Whether forced minimums pushed the columns past the budget.
    #[must_use]
    pub fn exceeds_budget(&self) -> bool {
        self.total() > self.budget
    }

    /// Content width available to a cell starting at `column` and spanning
    /// `colspan` columns, including the gutters it covers.
    #[must_use]
    pub fn span_width(&self, column: usize, colspan: usize, overhead: &Overhead) -> usize {
        let end = (column + colspan).min(self.widths.len());
        let covered = self.widths.get(column..end).unwrap_or_default();
        covered.iter().sum::<usize>() + covered.len().saturating_sub(1) * overhead.gutter()
    }
}

/// Plans column widths for a maximum table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlanner {
    max_table_width: usize,
    min_column_width: usize,
    overhead: Overhead,
}

impl LayoutPlanner {
    /// Create a planner.
    #[must_use]
    pub fn new(max_table_width: usize, min_column_width: usize, overhead: Overhead) -> Self {
        Self {
            max_table_width,
            min_column_width,
            overhead,
        }
    }

    /// Plan the widths for the given header and body rows.
    #[must_use]
    pub fn plan(&self, headers: &[Row], rows: &[Row]) -> LayoutPlan {
        self.plan_with(headers, rows, &markup::measure)
    }

    /// Plan with a custom measure of cell text.
    ///
    /// `measure` returns the display width of a cell's widest line.
    #[must_use]
    pub fn plan_with(
        &self,
        headers: &[Row],
        rows: &[Row],
        measure: &dyn Fn(&str) -> usize,
    ) -> LayoutPlan {
        let mut naturals: Vec<usize> = Vec::new();
        let mut minimums: Vec<usize> = Vec::new();

        let tagged = headers
            .iter()
            .map(|row| (row, true))
            .chain(rows.iter().map(|row| (row, false)));
        for (row, is_header) in tagged {
            let Some(cells) = row.cells() else {
                continue;
            };
            let mut column = 0;
            for cell in cells {
                let span = cell.colspan().max(1);
                let share = measure(cell.text()).div_ceil(span);
                let minimum = self.cell_minimum(cell, share, is_header);

                let end = column + span;
                if naturals.len() < end {
                    naturals.resize(end, 0);
                    minimums.resize(end, 0);
                }
                for c in column..end {
                    naturals[c] = naturals[c].max(share);
                    minimums[c] = minimums[c].max(minimum);
                }
                column = end;
            }
        }

        let columns = naturals.len();
        let budget = self
            .max_table_width
            .saturating_sub(self.overhead.total(columns));

        for (column, (natural, minimum)) in naturals.iter().zip(&minimums).enumerate() {
            tracing::trace!(column, natural, minimum, "column measured");
        }

        let widths = allocate(&naturals, &minimums, budget);
        let plan = LayoutPlan {
            widths,
            minimums,
            naturals,
            budget,
        };

        if plan.exceeds_budget() {
            tracing::debug!(
                total = plan.total(),
                budget,
                max_width = self.max_table_width,
                "table exceeds maximum width: forced minimums over-allocate"
            );
        }

        plan
    }

    fn cell_minimum(&self, cell: &Cell, width: usize, is_header: bool) -> usize {
        if is_header || !cell.is_wrappable() {
            width
        } else {
            width.min(self.min_column_width)
        }
    }
}

/// Share `budget` among columns in proportion to their natural widths.
fn allocate(naturals: &[usize], minimums: &[usize], budget: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..naturals.len()).collect();
    order.sort_by_key(|&c| (naturals[c], c));

    let mut widths = vec![0; naturals.len()];
    let mut remaining_budget = budget;
    let mut remaining_natural: usize = naturals.iter().sum();

    for column in order {
        let natural = naturals[column];
        let minimum = minimums[column];

        let share = if remaining_natural == 0 {
            0
        } else {
            (Ratio::new(natural, remaining_natural) * remaining_budget)
                .round()
                .to_integer()
        };
        if share < minimum {
            tracing::debug!(
                column,
                allocated = share,
                minimum,
                "raising column to its minimum width"
            );
        }
        let width = share.max(minimum).max(1);

        widths[column] = width;
        remaining_budget = remaining_budget.saturating_sub(width);
        remaining_natural -= natural;
    }

    widths
}

/// Plan column widths in one call.
///
/// Returns one target width per column, indexed by column.
#[must_use]
pub fn compute_column_widths(
    headers: &[Row],
    rows: &[Row],
    max_table_width: usize,
    min_column_width: usize,
    overhead: Overhead,
) -> Vec<usize> {
    LayoutPlanner::new(max_table_width, min_column_width, overhead)
        .plan(headers, rows)
        .widths
}
