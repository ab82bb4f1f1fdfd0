//! Report profile: the sentinel, the reference column list and the export style.
//!
//! The built-in profile ([`ReportProfile::default`]) reproduces the sales ledger
//! ("Libro oficial de ventas") layout. An alternate profile can be loaded from
//! JSON with the same shape as [`ReportProfile::to_json`] produces; missing
//! template fields fall back to the built-in values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ProfileError, ProfileResult};

/// Ordered, duplicate-free list of canonical column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ReferenceColumns(Vec<String>);

impl ReferenceColumns {
    /// Build a reference list, rejecting empty lists and repeated names.
    pub fn new<I, S>(names: I) -> ProfileResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ProfileError::Invalid("reference column list is empty".into()));
        }

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ProfileError::Invalid(format!(
                    "reference column '{}' appears more than once",
                    name
                )));
            }
        }

        Ok(Self(names))
    }

    /// Index of a name in the reference order (exact, case-sensitive).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for ReferenceColumns {
    type Error = ProfileError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReferenceColumns> for Vec<String> {
    fn from(value: ReferenceColumns) -> Self {
        value.0
    }
}

/// Cell border style used for the table rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    #[default]
    Thin,
    Medium,
    Thick,
}

/// Static styling for the exported workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportTemplate {
    /// Name of the single output worksheet
    pub sheet_name: String,

    /// Banner lines, top to bottom: title, organization name, identifier
    pub title: String,
    pub organization: String,
    pub organization_id: String,

    /// Number of merged banner rows at the top of the sheet
    pub banner_rows: u32,
    /// Banner background, `#RRGGBB`
    pub banner_fill: String,
    pub banner_font_color: String,
    pub title_font_size: f64,
    pub subtitle_font_size: f64,

    /// 1-based row holding the column names
    pub header_row: u32,
    /// Header background, `#RRGGBB`
    pub header_fill: String,

    /// Columns written as numbers with `numeric_format`
    pub numeric_columns: Vec<String>,
    pub numeric_format: String,
    /// Columns written as dates with `date_format`
    pub date_columns: Vec<String>,
    pub date_format: String,

    pub border: BorderStyle,
    /// Freeze rows above and including the header row
    pub freeze_header: bool,

    /// Label used in the suggested output filename
    pub file_label: String,
}

impl Default for ExportTemplate {
    fn default() -> Self {
        Self {
            sheet_name: "Hoja1".to_string(),
            title: "Libro oficial de ventas".to_string(),
            organization: "IMPORTADORA DE INSERTOS SAS".to_string(),
            organization_id: "900433608-0".to_string(),
            banner_rows: 5,
            banner_fill: "#1E90FF".to_string(),
            banner_font_color: "#FFFFFF".to_string(),
            title_font_size: 30.0,
            subtitle_font_size: 15.0,
            header_row: 7,
            header_fill: "#D3D3D3".to_string(),
            numeric_columns: vec![
                "Base gravada".to_string(),
                "IVA".to_string(),
                "Total".to_string(),
            ],
            numeric_format: "#,##0".to_string(),
            date_columns: vec!["Fecha elaboración".to_string()],
            date_format: "dd/mm/yyyy".to_string(),
            border: BorderStyle::Thin,
            freeze_header: true,
            file_label: "Libro Oficial de Ventas".to_string(),
        }
    }
}

impl ExportTemplate {
    /// Non-empty banner lines in display order.
    pub fn banner_lines(&self) -> Vec<&str> {
        [
            self.title.as_str(),
            self.organization.as_str(),
            self.organization_id.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect()
    }

    pub fn is_numeric_column(&self, name: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == name)
    }

    pub fn is_date_column(&self, name: &str) -> bool {
        self.date_columns.iter().any(|c| c == name)
    }

    /// Suggested output filename for an export made on `date`.
    pub fn default_file_name(&self, date: NaiveDate) -> String {
        format!("{} {}.xlsx", date.format("%Y-%m-%d"), self.file_label)
    }

    fn validate(&self) -> ProfileResult<()> {
        if self.sheet_name.trim().is_empty() {
            return Err(ProfileError::Invalid("sheet name is empty".into()));
        }
        if self.header_row == 0 {
            return Err(ProfileError::Invalid("header row is 1-based".into()));
        }
        if self.banner_rows >= self.header_row {
            return Err(ProfileError::Invalid(format!(
                "banner ({} rows) overlaps header row {}",
                self.banner_rows, self.header_row
            )));
        }
        let lines = self.banner_lines().len() as u32;
        if lines > self.banner_rows {
            return Err(ProfileError::Invalid(format!(
                "{} banner lines do not fit in {} banner rows",
                lines, self.banner_rows
            )));
        }
        Ok(())
    }
}

/// Everything the import and export steps need to know about a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProfile {
    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// Exact text of column 1 that marks the header row
    pub sentinel: String,

    /// Output columns, in output order
    pub columns: ReferenceColumns,

    #[serde(default)]
    pub template: ExportTemplate,
}

impl Default for ReportProfile {
    fn default() -> Self {
        Self::sales_ledger()
    }
}

impl ReportProfile {
    /// Built-in sales ledger profile.
    pub fn sales_ledger() -> Self {
        let columns = ReferenceColumns(
            [
                "Comprobante",
                "Fecha elaboración",
                "Base gravada",
                "IVA",
                "Total",
                "Identificación",
                "Suc",
                "Nombre tercero",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        );

        Self {
            name: "Libro oficial de ventas".to_string(),
            sentinel: "Comprobante".to_string(),
            columns,
            template: ExportTemplate::default(),
        }
    }

    /// Parse and check a profile from a JSON string.
    pub fn from_json(json: &str) -> ProfileResult<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and check a profile from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ProfileResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ProfileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ProfileResult<()> {
        if self.sentinel.is_empty() {
            return Err(ProfileError::Invalid("sentinel is empty".into()));
        }
        self.template.validate()
    }
}
