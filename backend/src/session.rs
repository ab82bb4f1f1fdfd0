//! Explicit session state for the import → display → export flow.
//!
//! ```text
//! Idle ──import ok──▶ Loaded ──export ok──▶ Idle
//!   ▲                  │  ▲
//!   └──import failed   │  └──export failed (stays Loaded)
//!                      └──import ok (table replaced)
//! ```
//!
//! A failed import leaves the previous state untouched.

use std::path::{Path, PathBuf};

use crate::error::{ExportError, PipelineResult};
use crate::export::export;
use crate::logs::log_error;
use crate::models::NormalizedTable;
use crate::profile::ReportProfile;
use crate::transform::pipeline::{import_detailed, ImportOutcome};

/// The table currently on display and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub source: PathBuf,
    pub outcome: ImportOutcome,
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loaded(LoadedTable),
}

/// Owns the profile and the current state; no global state is involved.
#[derive(Debug, Clone)]
pub struct Session {
    profile: ReportProfile,
    state: SessionState,
}

impl Session {
    pub fn new(profile: ReportProfile) -> Self {
        Self {
            profile,
            state: SessionState::Idle,
        }
    }

    pub fn profile(&self) -> &ReportProfile {
        &self.profile
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded(_))
    }

    /// The table on display, if any.
    pub fn table(&self) -> Option<&NormalizedTable> {
        match &self.state {
            SessionState::Loaded(loaded) => Some(&loaded.outcome.table),
            SessionState::Idle => None,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedTable> {
        match &self.state {
            SessionState::Loaded(loaded) => Some(loaded),
            SessionState::Idle => None,
        }
    }

    /// Import `path`, replacing the current table on success.
    pub fn import(&mut self, path: &Path) -> PipelineResult<()> {
        let outcome = match import_detailed(path, &self.profile) {
            Ok(outcome) => outcome,
            Err(e) => {
                log_error(format!("Import failed: {}", e));
                return Err(e.into());
            }
        };

        self.state = SessionState::Loaded(LoadedTable {
            source: path.to_path_buf(),
            outcome,
        });
        Ok(())
    }

    /// Export the loaded table to `path`; the session returns to idle on success.
    pub fn export(&mut self, path: &Path) -> PipelineResult<()> {
        let table = self.table().ok_or(ExportError::NothingLoaded)?;

        if let Err(e) = export(table, path, &self.profile) {
            log_error(format!("Export failed: {}", e));
            return Err(e.into());
        }

        self.state = SessionState::Idle;
        Ok(())
    }

    /// Drop the loaded table.
    pub fn clear(&mut self) {
        self.state = SessionState::Idle;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ReportProfile::default())
    }
}
