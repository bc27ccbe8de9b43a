//! Renderable components.
//!
//! - [`AdaptiveTable`]: rows of styled cells fitted to a maximum width
//! - [`GridPainter`]: borders and padding around already-wrapped rows

pub mod grid;
pub mod table;

pub use grid::GridPainter;
pub use table::{AdaptiveTable, Cell, Row, TableBuilder, TableCell, TableError};
