use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::{ModelColumn, Stokes};

/// Environment variable naming a JSON [`ViewerConfig`] file.
pub const CONFIG_ENV: &str = "SIR_VIEWER_CONFIG";

// ---------------------------------------------------------------------------
// PlotToggles – which series the user wants to see
// ---------------------------------------------------------------------------

/// User-facing switches: one per Stokes parameter and plottable model
/// quantity, plus error bands and the depth axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotToggles {
    pub stokes_i: bool,
    pub stokes_q: bool,
    pub stokes_u: bool,
    pub stokes_v: bool,
    pub temperature: bool,
    pub electron_pressure: bool,
    pub microturbulence: bool,
    pub field_strength: bool,
    pub los_velocity: bool,
    pub inclination: bool,
    pub azimuth: bool,
    /// Read `.err` siblings and draw uncertainty bands.
    pub errors: bool,
    /// Plot model quantities against height instead of log τ.
    pub height_scale: bool,
}

impl Default for PlotToggles {
    fn default() -> Self {
        Self {
            stokes_i: true,
            stokes_q: true,
            stokes_u: true,
            stokes_v: true,
            temperature: true,
            electron_pressure: false,
            microturbulence: false,
            field_strength: true,
            los_velocity: true,
            inclination: true,
            azimuth: true,
            errors: false,
            height_scale: false,
        }
    }
}

impl PlotToggles {
    pub fn stokes(&self, s: Stokes) -> bool {
        match s {
            Stokes::I => self.stokes_i,
            Stokes::Q => self.stokes_q,
            Stokes::U => self.stokes_u,
            Stokes::V => self.stokes_v,
        }
    }

    pub fn stokes_mut(&mut self, s: Stokes) -> &mut bool {
        match s {
            Stokes::I => &mut self.stokes_i,
            Stokes::Q => &mut self.stokes_q,
            Stokes::U => &mut self.stokes_u,
            Stokes::V => &mut self.stokes_v,
        }
    }

    /// Whether a model quantity is switched on. Depth-axis columns are never
    /// plotted as series.
    pub fn model(&self, c: ModelColumn) -> bool {
        match c {
            ModelColumn::Temperature => self.temperature,
            ModelColumn::ElectronPressure => self.electron_pressure,
            ModelColumn::Microturbulence => self.microturbulence,
            ModelColumn::FieldStrength => self.field_strength,
            ModelColumn::LosVelocity => self.los_velocity,
            ModelColumn::Inclination => self.inclination,
            ModelColumn::Azimuth => self.azimuth,
            _ => false,
        }
    }

    pub fn model_mut(&mut self, c: ModelColumn) -> Option<&mut bool> {
        match c {
            ModelColumn::Temperature => Some(&mut self.temperature),
            ModelColumn::ElectronPressure => Some(&mut self.electron_pressure),
            ModelColumn::Microturbulence => Some(&mut self.microturbulence),
            ModelColumn::FieldStrength => Some(&mut self.field_strength),
            ModelColumn::LosVelocity => Some(&mut self.los_velocity),
            ModelColumn::Inclination => Some(&mut self.inclination),
            ModelColumn::Azimuth => Some(&mut self.azimuth),
            _ => None,
        }
    }

    /// Number of series panels the toggles ask for.
    pub fn series_count(&self) -> usize {
        Stokes::ALL.iter().filter(|s| self.stokes(**s)).count()
            + ModelColumn::PLOTTABLE
                .iter()
                .filter(|c| self.model(**c))
                .count()
    }
}

// ---------------------------------------------------------------------------
// ViewerConfig – startup settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial toggle state.
    pub toggles: PlotToggles,
    /// Directory the file dialog opens in.
    pub initial_dir: Option<PathBuf>,
}

impl ViewerConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from the file named by `SIR_VIEWER_CONFIG`, or defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("using config {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("{e:#}; falling back to defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let t = PlotToggles::default();
        assert_eq!(t.series_count(), 9);
        assert!(!t.electron_pressure);
        assert!(!t.microturbulence);
        assert!(!t.errors);
        assert!(!t.height_scale);
    }

    #[test]
    fn depth_columns_are_not_series() {
        let mut t = PlotToggles::default();
        assert!(!t.model(ModelColumn::LogTau));
        assert!(t.model_mut(ModelColumn::Height).is_none());
        *t.model_mut(ModelColumn::Temperature).unwrap() = false;
        assert!(!t.model(ModelColumn::Temperature));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ViewerConfig =
            serde_json::from_str(r#"{ "toggles": { "errors": true, "stokes_q": false } }"#).unwrap();
        assert!(cfg.toggles.errors);
        assert!(!cfg.toggles.stokes_q);
        assert!(cfg.toggles.stokes_i);
        assert!(cfg.initial_dir.is_none());
    }

    #[test]
    fn load_reads_file_and_names_it_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, r#"{ "initial_dir": "/data/sir" }"#).unwrap();

        let cfg = ViewerConfig::load(&path).unwrap();
        assert_eq!(cfg.initial_dir, Some(PathBuf::from("/data/sir")));
        assert_eq!(cfg.toggles, PlotToggles::default());

        std::fs::write(&path, "{ not json").unwrap();
        let err = ViewerConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("viewer.json"));
    }
}
