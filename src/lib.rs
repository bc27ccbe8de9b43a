//! # adaptive_table
//!
//! Terminal tables whose columns adapt to the available width.
//!
//! Cells hold text with inline style markup such as
//! `<info>ok</info>` or `<fg=red;options=bold>failed</>`. Before a table is
//! painted, a layout planner shares the width among the columns in
//! proportion to their content, and every cell that does not fit its column
//! is word-wrapped without breaking its markup: a style cut by a line break
//! is closed before the break and reopened after it.
//!
//! ## Quick Start
//!
//! ```
//! use adaptive_table::prelude::*;
//!
//! let mut out = Console::new(Vec::new());
//! let mut table = AdaptiveTable::builder().max_width(40).build(&mut out);
//! table.set_headers([vec!["Service", "Status"]])?;
//! table.add_row(vec!["api", "<info>running</info>"])?;
//! table.add_row(vec!["worker", "<error>stopped after three failed restarts</error>"])?;
//! table.render()?;
//! # Ok::<(), adaptive_table::renderables::TableError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Layout planner** ([`layout`]): target content width per column
//! - **Wrapper** ([`wrap`]): markup-preserving word wrap
//! - **Markup** ([`markup`]): tokenizer, stripping, validation
//! - **Output sink** ([`console`]): where rendered tables go

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod r#box;
pub mod cells;
pub mod color;
pub mod console;
pub mod export;
pub mod layout;
pub mod markup;
pub mod renderables;
pub mod style;
pub mod terminal;
pub mod wrap;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::r#box::BoxChars;
    pub use crate::color::Color;
    pub use crate::console::{Console, OutputSink};
    pub use crate::export::TableFormat;
    pub use crate::layout::{LayoutPlan, LayoutPlanner, Overhead, compute_column_widths};
    pub use crate::renderables::{
        AdaptiveTable, Cell, GridPainter, Row, TableBuilder, TableCell, TableError,
    };
    pub use crate::style::{Attributes, Style};
    pub use crate::wrap::{wrap, wrap_plain};
}

pub use console::{Console, OutputSink};
pub use layout::compute_column_widths;
pub use renderables::{AdaptiveTable, Cell, Row, TableCell, TableError};
pub use wrap::wrap;
