use std::path::PathBuf;

use sir_viewer::{DepthAxis, PlotToggles, Session, SirError, Snapshot, ViewerConfig};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Checkbox state.
    pub toggles: PlotToggles,

    /// Directory the file dialog starts in.
    pub initial_dir: Option<PathBuf>,

    /// Current file selection (None until the user picks files).
    pub session: Option<Session>,

    /// Result of the last "Plot" request.
    pub snapshot: Option<Snapshot>,

    /// One colour per entity of the current selection.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(ViewerConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: ViewerConfig) -> Self {
        Self {
            toggles: config.toggles,
            initial_dir: config.initial_dir,
            session: None,
            snapshot: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Replace the selection. The previous plot is discarded.
    pub fn set_selection(&mut self, paths: &[PathBuf]) {
        self.snapshot = None;
        match Session::open(paths) {
            Ok(session) => {
                self.color_map = Some(ColorMap::new(&session.selection().names));
                self.status_message = Some(format!(
                    "{} file(s) selected, {} entities",
                    paths.len(),
                    session.selection().len()
                ));
                self.session = Some(session);
            }
            Err(e) => {
                log::warn!("file selection rejected: {e}");
                self.session = None;
                self.color_map = None;
                self.status_message = Some(format!("Warning: {e}"));
            }
        }
    }

    /// Load every selected file and resolve the plot.
    pub fn plot(&mut self) {
        let Some(session) = &self.session else {
            self.status_message = Some(format!("Warning: {}", SirError::NoFilesSelected));
            return;
        };
        match session.plot(&self.toggles) {
            Ok(snapshot) => {
                self.status_message = if snapshot.warnings.is_empty() {
                    None
                } else {
                    Some(snapshot.warnings.join("; "))
                };
                // The plan fell back to log τ; the toggle follows it.
                if snapshot.plan.axis == DepthAxis::LogTau && self.toggles.height_scale {
                    self.toggles.height_scale = false;
                }
                self.snapshot = Some(snapshot);
            }
            Err(e) => {
                log::warn!("plot request rejected: {e}");
                self.status_message = Some(format!("Warning: {e}"));
            }
        }
    }

    /// Flip between log τ and height. Refused when the last plot had no
    /// height data.
    pub fn toggle_height_scale(&mut self) {
        let wants_height = !self.toggles.height_scale;
        if wants_height {
            if let Some(snap) = &self.snapshot {
                if !snap.dataset.has_height_data {
                    self.status_message =
                        Some("None of the loaded models has a height scale".to_string());
                    return;
                }
            }
        }
        self.toggles.height_scale = wants_height;
        if self.snapshot.is_some() {
            self.plot();
        }
    }

    /// Toggle error bands and re-plot, reading the files again.
    pub fn set_errors(&mut self, on: bool) {
        self.toggles.errors = on;
        if self.snapshot.is_some() {
            self.plot();
        }
    }
}
