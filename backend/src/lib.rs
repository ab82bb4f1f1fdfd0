//! # colreorder - spreadsheet column filter, reorder and re-export
//!
//! Imports the first worksheet of a spreadsheet, finds the header row by a
//! sentinel cell, keeps only the columns of a reference list (in that order),
//! and writes the result as a formatted workbook with a banner block.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐     ┌────────────┐     ┌────────────┐     ┌────────────┐
//! │ xlsx / xls │────▶│   Reader   │────▶│ Transform  │────▶│   Export   │
//! │   / csv    │     │ (1st sheet)│     │ (hdr+cols) │     │ (banner)   │
//! └────────────┘     └────────────┘     └────────────┘     └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use colreorder::{export, import, ReportProfile};
//! use std::path::Path;
//!
//! let profile = ReportProfile::default();
//! let table = import(Path::new("ventas.xlsx"), &profile)?;
//! export(&table, Path::new("libro.xlsx"), &profile)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Grid and table types
//! - [`profile`] - Sentinel, reference columns and export template
//! - [`reader`] - Workbook and CSV input
//! - [`transform`] - Header detection, materialization, column reorder
//! - [`export`] - Formatted workbook output
//! - [`display`] - Text rendering
//! - [`session`] - Explicit import/export state
//! - [`logs`] - Progress log

// Core modules
pub mod error;
pub mod models;
pub mod profile;

// Input
pub mod reader;

// Transformation
pub mod transform;

// Output
pub mod display;
pub mod export;

// Flow
pub mod logs;
pub mod session;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ExportError,
    ImportError,
    PipelineError,
    ProfileError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    HeaderRow,
    NormalizedTable,
    SheetGrid,
    Table,
};

// =============================================================================
// Re-exports - Profile
// =============================================================================

pub use profile::{
    BorderStyle,
    ExportTemplate,
    ReferenceColumns,
    ReportProfile,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    detect_header_row,
    materialize,
    reorder_columns,
    reorder_with_report,
    ReorderReport,
    import,
    import_detailed,
    normalize_grid,
    ImportOutcome,
    SourceInfo,
};

// =============================================================================
// Re-exports - Reader / Export / Display
// =============================================================================

pub use reader::read_first_sheet;

pub use export::{
    export,
    export_to_buffer,
    default_output_path,
};

pub use display::render_table;

// =============================================================================
// Re-exports - Session
// =============================================================================

pub use session::{Session, SessionState, LoadedTable};
