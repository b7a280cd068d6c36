//! Grid geometry and column layout.
//!
//! This module handles:
//! - Viewport and row geometry snapshots read from the host
//! - Generating column definitions from row data
//! - Generating the CSS `grid-template-columns` value for rows

mod columns;
mod viewport;

pub use columns::{generate_columns, generate_template_columns};
pub use viewport::{RowGeometry, Viewport};
