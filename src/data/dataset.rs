use std::ops::Index;
use std::path::Path;

use crate::error::{LoadWarning, Result};

use super::loader::{read_error, read_model, read_profile};
use super::model::{ErrorRecord, FileKind, ModelColumn, ModelRecord, ProfileRecord};
use super::reconcile::Selection;

// ---------------------------------------------------------------------------
// AxisBounds – default plot limits per model column
// ---------------------------------------------------------------------------

/// A `(lower, upper)` pair for each model column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds([(f64, f64); ModelColumn::COUNT]);

impl AxisBounds {
    /// Bounds over every value of every model: `min * 0.9` and `max * 1.1`.
    /// With no models both ends are 0. A degenerate range is widened to
    /// `(lo - 1, hi + 1)`.
    pub fn from_models<'a>(models: impl IntoIterator<Item = &'a ModelRecord> + Clone) -> Self {
        let mut bounds = [(0.0, 0.0); ModelColumn::COUNT];
        for c in ModelColumn::ALL {
            let (min, max) = models
                .clone()
                .into_iter()
                .flat_map(|m| m.column(c).iter().copied())
                .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                    None => Some((v, v)),
                    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                })
                .map(|(lo, hi)| (lo * 0.9, hi * 1.1))
                .unwrap_or((0.0, 0.0));
            bounds[c.index()] = if min == max {
                (min - 1.0, max + 1.0)
            } else {
                (min, max)
            };
        }
        AxisBounds(bounds)
    }

    pub fn get(&self, c: ModelColumn) -> (f64, f64) {
        self.0[c.index()]
    }
}

impl Index<ModelColumn> for AxisBounds {
    type Output = (f64, f64);

    fn index(&self, c: ModelColumn) -> &Self::Output {
        &self.0[c.index()]
    }
}

// ---------------------------------------------------------------------------
// Entity – everything loaded for one base name
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub profile: Option<ProfileRecord>,
    /// Model with display units applied.
    pub model: Option<ModelRecord>,
    /// Uncertainties with the same units as `model`.
    pub error: Option<ErrorRecord>,
}

// ---------------------------------------------------------------------------
// PlotDataset – the loaded snapshot for one selection
// ---------------------------------------------------------------------------

/// Records loaded for a [`Selection`], one slot per entity.
#[derive(Debug, Clone)]
pub struct PlotDataset {
    entities: Vec<Entity>,
    /// Selected profiles that could not be read.
    pub profile_misses: usize,
    /// Selected models that could not be read.
    pub model_misses: usize,
    /// Error files that were attempted (model loaded) but not read.
    pub error_misses: usize,
    pub bounds: AxisBounds,
    /// At least one loaded model carries a real height scale.
    pub has_height_data: bool,
    pub warnings: Vec<LoadWarning>,
}

impl PlotDataset {
    /// Read every file the selection points at.
    ///
    /// A file that fails to read leaves its slot empty and adds a warning;
    /// the remaining entities are still loaded. Error files are only tried
    /// for entities whose model loaded.
    pub fn build(selection: &Selection, include_errors: bool) -> Self {
        let mut entities = Vec::with_capacity(selection.len());
        let mut warnings = Vec::new();
        let (mut profile_misses, mut model_misses, mut error_misses) = (0, 0, 0);

        for (i, name) in selection.names.iter().enumerate() {
            let mut attempt = AttemptLog {
                selection,
                index: i,
                warnings: &mut warnings,
            };

            let profile = if selection.per_mask[i] {
                attempt.read(FileKind::Profile, read_profile, &mut profile_misses)
            } else {
                None
            };

            let model = if selection.mod_mask[i] {
                attempt.read(FileKind::Model, read_model, &mut model_misses)
            } else {
                None
            };

            let error = if include_errors && model.is_some() {
                attempt.read(FileKind::Error, read_error, &mut error_misses)
            } else {
                None
            };

            entities.push(Entity {
                name: name.clone(),
                profile,
                model: model.map(|m| m.scaled()),
                error: error.map(|e| e.scaled()),
            });
        }

        let bounds = AxisBounds::from_models(entities.iter().filter_map(|e| e.model.as_ref()));
        let has_height_data = entities
            .iter()
            .filter_map(|e| e.model.as_ref())
            .any(ModelRecord::has_height);

        log::info!(
            "loaded {} entities: {} profile, {} model, {} error files missing",
            entities.len(),
            profile_misses,
            model_misses,
            error_misses
        );

        Self {
            entities,
            profile_misses,
            model_misses,
            error_misses,
            bounds,
            has_height_data,
            warnings,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entities.iter().map(|e| e.name.as_str())
    }

    /// Entities whose profile loaded.
    pub fn per_mask(&self) -> Vec<bool> {
        self.entities.iter().map(|e| e.profile.is_some()).collect()
    }

    /// Entities whose model loaded.
    pub fn mod_mask(&self) -> Vec<bool> {
        self.entities.iter().map(|e| e.model.is_some()).collect()
    }

    /// Entities whose error file loaded.
    pub fn err_mask(&self) -> Vec<bool> {
        self.entities.iter().map(|e| e.error.is_some()).collect()
    }

    /// `(entity index, name, profile)` for every loaded profile.
    pub fn profiles(&self) -> impl Iterator<Item = (usize, &str, &ProfileRecord)> + '_ {
        self.entities
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.profile.as_ref().map(|p| (i, e.name.as_str(), p)))
    }

    /// `(entity index, name, model)` for every loaded model.
    pub fn models(&self) -> impl Iterator<Item = (usize, &str, &ModelRecord)> + '_ {
        self.entities
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.model.as_ref().map(|m| (i, e.name.as_str(), m)))
    }

    pub fn error_for(&self, i: usize) -> Option<&ErrorRecord> {
        self.entities.get(i).and_then(|e| e.error.as_ref())
    }
}

/// Reads the sibling files of one entity, turning failures into warnings.
struct AttemptLog<'a> {
    selection: &'a Selection,
    index: usize,
    warnings: &'a mut Vec<LoadWarning>,
}

impl AttemptLog<'_> {
    fn read<T>(
        &mut self,
        kind: FileKind,
        reader: fn(&Path) -> Result<T>,
        misses: &mut usize,
    ) -> Option<T> {
        let path = self.selection.sibling(self.index, kind);
        match reader(&path) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("{e}");
                let name = &self.selection.names[self.index];
                self.warnings.push(LoadWarning::new(name, kind, &e));
                *misses += 1;
                None
            }
        }
    }
}
