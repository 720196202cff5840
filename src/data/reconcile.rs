use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, SirError};

use super::model::FileKind;

// ---------------------------------------------------------------------------
// Selection – the reconciled entity list
// ---------------------------------------------------------------------------

/// Base names found in a file selection, with which kinds were selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Entity base names; legend labels for the plot.
    pub names: Vec<String>,
    /// `per_mask[i]`: a `.per` file for `names[i]` was selected.
    pub per_mask: Vec<bool>,
    /// `mod_mask[i]`: a `.mod` file for `names[i]` was selected.
    pub mod_mask: Vec<bool>,
    /// Directory the siblings (`.per`, `.mod`, `.err`) are looked up in.
    pub directory: PathBuf,
    /// Selected paths that were neither `.per` nor `.mod`.
    pub ignored: Vec<PathBuf>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Path of the sibling file of `kind` for entity `i`.
    pub fn sibling(&self, i: usize, kind: FileKind) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.names[i], kind.extension()))
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Group selected `.per` / `.mod` paths by base name.
///
/// When both kinds name the same set of entities, the model files' order is
/// kept. Otherwise the entity list is the union of both sets in
/// lexicographic order and the masks record which kinds each entity has.
pub fn reconcile<P: AsRef<Path>>(paths: &[P]) -> Result<Selection> {
    if paths.is_empty() {
        return Err(SirError::NoFilesSelected);
    }

    let mut per_names: Vec<String> = Vec::new();
    let mut mod_names: Vec<String> = Vec::new();
    let mut ignored = Vec::new();
    let mut directory: Option<PathBuf> = None;

    for path in paths.iter().map(AsRef::as_ref) {
        let kind = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(FileKind::from_selectable_extension);
        let (Some(kind), Some(stem)) = (kind, path.file_stem().and_then(|s| s.to_str())) else {
            log::warn!("ignoring unsupported file {}", path.display());
            ignored.push(path.to_path_buf());
            continue;
        };

        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        match &directory {
            None => directory = Some(parent),
            Some(dir) if *dir != parent => {
                log::warn!(
                    "{} is outside {}; siblings are looked up in the latter",
                    path.display(),
                    dir.display()
                );
            }
            Some(_) => {}
        }

        let names = match kind {
            FileKind::Profile => &mut per_names,
            _ => &mut mod_names,
        };
        if !names.iter().any(|n| n == stem) {
            names.push(stem.to_string());
        }
    }

    let Some(directory) = directory else {
        return Err(SirError::UnsupportedExtension(ignored.swap_remove(0)));
    };

    let per_set: BTreeSet<&str> = per_names.iter().map(String::as_str).collect();
    let mod_set: BTreeSet<&str> = mod_names.iter().map(String::as_str).collect();

    let names: Vec<String> = if per_set == mod_set {
        mod_names.clone()
    } else {
        per_set.union(&mod_set).map(|s| s.to_string()).collect()
    };

    let per_mask = names.iter().map(|n| per_set.contains(n.as_str())).collect();
    let mod_mask = names.iter().map(|n| mod_set.contains(n.as_str())).collect();

    log::info!(
        "selection: {} entities ({} profiles, {} models) in {}",
        names.len(),
        per_names.len(),
        mod_names.len(),
        directory.display()
    );

    Ok(Selection {
        names,
        per_mask,
        mod_mask,
        directory,
        ignored,
    })
}
