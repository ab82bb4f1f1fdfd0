//! Error types for the colreorder import/export flow.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ImportError`] - reading a source spreadsheet
//! - [`ExportError`] - writing the formatted workbook
//! - [`ProfileError`] - loading or checking a report profile
//! - [`PipelineError`] - top-level wrapper used by the CLI and [`crate::Session`]
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Import Errors
// =============================================================================

/// Errors while importing a spreadsheet.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Failed to open or read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be parsed.
    #[error("Failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The CSV content could not be parsed.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Extension is not one of the supported spreadsheet formats.
    #[error("Unsupported input format: '{0}' (expected .xlsx, .xlsm, .xls or .csv)")]
    UnsupportedFormat(String),

    /// The workbook contains no worksheet at all.
    #[error("Workbook has no worksheet")]
    NoWorksheet,

    /// The first worksheet has no used range.
    #[error("Worksheet '{0}' is empty")]
    EmptyWorksheet(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while exporting the formatted workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Destination extension is not `.xlsx`.
    #[error("Unsupported output format: '{0}' (expected .xlsx)")]
    UnsupportedFormat(String),

    /// The workbook writer rejected a cell, range or format.
    #[error("Workbook writer error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Failed to write the temporary file.
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to move the finished file into place.
    #[error("Failed to save output: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// The style template cannot be rendered.
    #[error("Invalid export template: {0}")]
    InvalidTemplate(String),

    /// Export was requested with no table loaded.
    #[error("Nothing to export: no table is loaded")]
    NothingLoaded,
}

// =============================================================================
// Profile Errors
// =============================================================================

/// Errors while loading or checking a report profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Failed to read the profile file.
    #[error("Failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    /// The profile JSON is malformed.
    #[error("Invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The profile parsed but breaks an invariant.
    #[error("Invalid profile: {0}")]
    Invalid(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::Session`] and the CLI.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Import failure.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Export failure.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Profile failure.
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
