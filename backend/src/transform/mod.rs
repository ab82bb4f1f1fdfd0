//! Transformation module.
//!
//! - Header: locate the column-name row by its sentinel
//! - Materialize: grid to raw table
//! - Reorder: filter and order columns against the reference list
//! - Pipeline: the full import

pub mod header;
pub mod materialize;
pub mod pipeline;
pub mod reorder;

pub use header::detect_header_row;
pub use materialize::materialize;
pub use pipeline::*;
pub use reorder::{plan_columns, reorder_columns, reorder_with_report, ReorderReport};
