use std::path::Path;

use crate::config::PlotToggles;
use crate::data::dataset::PlotDataset;
use crate::data::model::{ModelColumn, Stokes};
use crate::data::reconcile::{reconcile, Selection};
use crate::error::{Result, SirError};

// ---------------------------------------------------------------------------
// DepthAxis / PlotPlan
// ---------------------------------------------------------------------------

/// Abscissa used for model quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthAxis {
    LogTau,
    Height,
}

impl DepthAxis {
    pub fn column(self) -> ModelColumn {
        match self {
            DepthAxis::LogTau => ModelColumn::LogTau,
            DepthAxis::Height => ModelColumn::Height,
        }
    }
}

/// What to draw, resolved against the data actually loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPlan {
    pub stokes: Vec<Stokes>,
    pub parameters: Vec<ModelColumn>,
    pub axis: DepthAxis,
    pub show_errors: bool,
}

impl PlotPlan {
    /// Resolve toggles against a dataset. A height axis is only granted when
    /// some model carries height data; otherwise log τ is used and a warning
    /// is returned alongside the plan.
    pub fn resolve(toggles: &PlotToggles, dataset: &PlotDataset) -> Result<(Self, Option<String>)> {
        if toggles.series_count() == 0 {
            return Err(SirError::NothingToPlot);
        }

        let mut warning = None;
        let axis = if toggles.height_scale && dataset.has_height_data {
            DepthAxis::Height
        } else {
            if toggles.height_scale {
                warning = Some("no model has a height scale; plotting against log(τ)".to_string());
            }
            DepthAxis::LogTau
        };

        let plan = PlotPlan {
            stokes: Stokes::ALL
                .into_iter()
                .filter(|s| toggles.stokes(*s))
                .collect(),
            parameters: ModelColumn::PLOTTABLE
                .into_iter()
                .filter(|c| toggles.model(*c))
                .collect(),
            axis,
            show_errors: toggles.errors,
        };
        Ok((plan, warning))
    }

    pub fn panel_count(&self) -> usize {
        self.stokes.len() + self.parameters.len()
    }

    /// Warnings for panels that would come out empty. Ends with a summary
    /// line when no selected series has any data at all.
    pub fn missing_series(&self, dataset: &PlotDataset) -> Vec<String> {
        let has_profiles = dataset.profiles().next().is_some();
        let has_models = dataset.models().next().is_some();

        let mut warnings = Vec::new();
        if !self.stokes.is_empty() && !has_profiles {
            warnings.push("no profile loaded for the selected Stokes parameters".to_string());
        }
        if !self.parameters.is_empty() && !has_models {
            warnings.push("no model loaded for the selected model parameters".to_string());
        }

        let drawable = (!self.stokes.is_empty() && has_profiles)
            || (!self.parameters.is_empty() && has_models);
        if !drawable {
            warnings.push("nothing to plot: none of the selected series has data".to_string());
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Session / Snapshot
// ---------------------------------------------------------------------------

/// One file selection. Replaced wholesale when the user selects again.
#[derive(Debug, Clone)]
pub struct Session {
    selection: Selection,
}

/// An immutable result of one plot request.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub dataset: PlotDataset,
    pub plan: PlotPlan,
    /// Human-readable warnings for the status line.
    pub warnings: Vec<String>,
}

impl Session {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }

    /// Reconcile a list of selected paths.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        reconcile(paths).map(Self::new)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Read every file for the selection and resolve what to draw.
    /// Files are re-read on every call.
    pub fn plot(&self, toggles: &PlotToggles) -> Result<Snapshot> {
        // Checked before touching the disk.
        if toggles.series_count() == 0 {
            return Err(SirError::NothingToPlot);
        }

        let dataset = PlotDataset::build(&self.selection, toggles.errors);
        let (plan, axis_warning) = PlotPlan::resolve(toggles, &dataset)?;

        let mut warnings: Vec<String> = self
            .selection
            .ignored
            .iter()
            .map(|p| SirError::UnsupportedExtension(p.clone()).to_string())
            .collect();
        warnings.extend(dataset.warnings.iter().map(ToString::to_string));
        warnings.extend(axis_warning);
        warnings.extend(plan.missing_series(&dataset));

        Ok(Snapshot {
            dataset,
            plan,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_off() -> PlotToggles {
        PlotToggles {
            stokes_i: false,
            stokes_q: false,
            stokes_u: false,
            stokes_v: false,
            temperature: false,
            electron_pressure: false,
            microturbulence: false,
            field_strength: false,
            los_velocity: false,
            inclination: false,
            azimuth: false,
            errors: false,
            height_scale: false,
        }
    }

    #[test]
    fn nothing_selected_is_reported() {
        let session = Session::open(&["/nowhere/a.mod"]).unwrap();
        assert!(matches!(session.plot(&all_off()), Err(SirError::NothingToPlot)));
    }

    #[test]
    fn plan_lists_only_enabled_series() {
        let session = Session::open(&["/nowhere/a.mod"]).unwrap();
        let toggles = PlotToggles {
            stokes_v: true,
            field_strength: true,
            ..all_off()
        };
        let snap = session.plot(&toggles).unwrap();
        assert_eq!(snap.plan.stokes, vec![Stokes::V]);
        assert_eq!(snap.plan.parameters, vec![ModelColumn::FieldStrength]);
        assert_eq!(snap.plan.panel_count(), 2);
        // load warning, one per empty half of the plan, then the summary
        assert_eq!(snap.warnings.len(), 4);
        assert!(snap.warnings[0].contains("no .mod file for a"));
        assert!(snap.warnings[3].starts_with("nothing to plot"));
    }

    #[test]
    fn height_axis_falls_back_without_height_data() {
        let session = Session::open(&["/nowhere/a.mod"]).unwrap();
        let toggles = PlotToggles {
            height_scale: true,
            ..PlotToggles::default()
        };
        let snap = session.plot(&toggles).unwrap();
        assert_eq!(snap.plan.axis, DepthAxis::LogTau);
        assert!(snap.warnings.iter().any(|w| w.contains("height")));
    }

    #[test]
    fn partial_data_warns_only_for_the_empty_half() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.per"), "1 0.0 1.0 0.0 0.0 0.0\n").unwrap();
        let selection = reconcile(&[dir.path().join("a.per")]).unwrap();
        let dataset = PlotDataset::build(&selection, false);
        let plan = PlotPlan {
            stokes: vec![Stokes::I],
            parameters: vec![ModelColumn::Temperature],
            axis: DepthAxis::LogTau,
            show_errors: false,
        };

        let warnings = plan.missing_series(&dataset);
        assert_eq!(
            warnings,
            vec!["no model loaded for the selected model parameters".to_string()]
        );
    }
}
