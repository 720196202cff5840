use std::fs;
use std::path::{Path, PathBuf};

use sir_viewer::{
    reconcile, DepthAxis, FileKind, ModelColumn, PlotDataset, PlotToggles, Session, Stokes,
};
use tempfile::{tempdir, TempDir};

const PROFILE: &str = "1 -10.0 0.9 0.001 0.002 0.003\n1 10.0 0.95 0.001 0.002 -0.003\n";
const MODEL_8: &str = "1.5 1.0 0.0\n-1.0 6000 100 1.0e5 1000 2.0e5 90 0\n0.0 6500 200 1.0e5 1200 1.0e5 80 10\n";
const MODEL_11: &str = "0.0 1.0 0.0\n-1.0 5000 100 1.0e5 500 0 45 0 150 1e-8 1e4\n0.0 6000 200 1.0e5 600 0 45 0 0 2e-8 2e4\n";
const ERRORS_8: &str = "0.0 0.0 0.0\n0.0 100 1 1.0e4 50 1.0e4 5 5\n0.0 100 1 1.0e4 50 1.0e4 5 5\n";

/// Write `files` (name, contents) into a fresh directory.
fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, text) in files {
        fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

fn paths(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| dir.join(n)).collect()
}

#[test]
fn profile_without_model_only_loads_profile() {
    let dir = fixture(&[("a.per", PROFILE), ("a.mod", MODEL_8), ("b.per", PROFILE)]);
    let sel = reconcile(&paths(dir.path(), &["a.per", "a.mod", "b.per"])).unwrap();

    assert_eq!(sel.names, vec!["a", "b"]);
    assert_eq!(sel.per_mask, vec![true, true]);
    assert_eq!(sel.mod_mask, vec![true, false]);

    let ds = PlotDataset::build(&sel, false);
    assert_eq!(ds.profiles().count(), 2);
    let models: Vec<_> = ds.models().map(|(i, name, _)| (i, name)).collect();
    assert_eq!(models, vec![(0, "a")]);
    assert!(ds.warnings.is_empty());
}

#[test]
fn models_are_scaled_to_display_units() {
    let dir = fixture(&[("a.mod", MODEL_8)]);
    let sel = reconcile(&paths(dir.path(), &["a.mod"])).unwrap();
    let ds = PlotDataset::build(&sel, false);

    let (_, _, m) = ds.models().next().unwrap();
    assert_eq!(m.temperature(), &[6.0, 6.5]);
    assert_eq!(m.column(ModelColumn::Microturbulence), &[1.0, 1.0]);
    assert_eq!(m.column(ModelColumn::FieldStrength), &[1.0, 1.2]);
    assert_eq!(m.column(ModelColumn::LosVelocity), &[2.0, 1.0]);
    assert_eq!(m.column(ModelColumn::ElectronPressure), &[100.0, 200.0]);
    assert_eq!(m.log_tau(), &[-1.0, 0.0]);
}

#[test]
fn missing_error_file_is_a_warning() {
    let dir = fixture(&[("a.mod", MODEL_8), ("a.per", PROFILE)]);
    let sel = reconcile(&paths(dir.path(), &["a.mod", "a.per"])).unwrap();
    let ds = PlotDataset::build(&sel, true);

    assert_eq!(ds.err_mask(), vec![false]);
    assert_eq!(ds.mod_mask(), vec![true]);
    assert_eq!(ds.error_misses, 1);
    assert_eq!(ds.warnings.len(), 1);
    assert_eq!(ds.warnings[0].kind, FileKind::Error);
    assert!(ds.warnings[0].to_string().contains("no .err file for a"));
}

#[test]
fn error_files_align_with_their_entity() {
    // b has no model, c has no .err: the error for d must still be d's.
    let dir = fixture(&[
        ("a.mod", MODEL_8),
        ("a.err", ERRORS_8),
        ("b.per", PROFILE),
        ("c.mod", MODEL_8),
        ("d.mod", MODEL_8),
        ("d.err", "0.0 0.0 0.0\n0.0 7000 1 1 1 1 1 1\n0.0 7000 1 1 1 1 1 1\n"),
    ]);
    let sel = reconcile(&paths(dir.path(), &["a.mod", "b.per", "c.mod", "d.mod"])).unwrap();
    let ds = PlotDataset::build(&sel, true);

    assert_eq!(sel.names, vec!["a", "b", "c", "d"]);
    assert_eq!(ds.err_mask(), vec![true, false, false, true]);
    assert_eq!(ds.error_for(0).unwrap().temperature(), &[0.1, 0.1]);
    assert!(ds.error_for(2).is_none());
    assert_eq!(ds.error_for(3).unwrap().temperature(), &[7.0, 7.0]);
    // only c's .err was attempted and missing; b had no model
    assert_eq!(ds.error_misses, 1);
}

#[test]
fn errors_not_read_unless_requested() {
    let dir = fixture(&[("a.mod", MODEL_8), ("a.err", ERRORS_8)]);
    let sel = reconcile(&paths(dir.path(), &["a.mod"])).unwrap();
    let ds = PlotDataset::build(&sel, false);
    assert_eq!(ds.err_mask(), vec![false]);
    assert_eq!(ds.error_misses, 0);
}

#[test]
fn loaded_plus_missing_matches_selection_for_every_prefix() {
    let dir = fixture(&[
        ("a.per", PROFILE),
        ("b.per", "not a profile\n"),
        ("c.mod", MODEL_8),
        ("e.per", PROFILE),
    ]);
    // d.per is selected but never written
    let sel = reconcile(&paths(
        dir.path(),
        &["a.per", "b.per", "c.mod", "d.per", "e.per"],
    ))
    .unwrap();
    let ds = PlotDataset::build(&sel, false);
    let loaded = ds.per_mask();

    let mut missing = 0;
    for i in 0..sel.len() {
        if sel.per_mask[i] && !loaded[i] {
            missing += 1;
        }
        let selected = sel.per_mask[..=i].iter().filter(|m| **m).count();
        let ok = loaded[..=i].iter().filter(|m| **m).count();
        assert_eq!(ok + missing, selected, "prefix ending at {}", sel.names[i]);
    }
    assert_eq!(missing, ds.profile_misses);
    assert_eq!(ds.profile_misses, 2);
}

#[test]
fn height_data_needs_a_real_height_column() {
    let dir = fixture(&[("flat.mod", MODEL_8), ("tall.mod", MODEL_11)]);

    let flat = reconcile(&paths(dir.path(), &["flat.mod"])).unwrap();
    assert!(!PlotDataset::build(&flat, false).has_height_data);

    let both = reconcile(&paths(dir.path(), &["flat.mod", "tall.mod"])).unwrap();
    let ds = PlotDataset::build(&both, false);
    assert!(ds.has_height_data);
    let (_, _, tall) = ds.models().find(|(_, n, _)| *n == "tall").unwrap();
    assert_eq!(tall.height(), &[0.15, 0.0]);
}

#[test]
fn bounds_cover_all_loaded_models() {
    let dir = fixture(&[("a.mod", MODEL_8), ("b.mod", MODEL_11)]);
    let sel = reconcile(&paths(dir.path(), &["a.mod", "b.mod"])).unwrap();
    let ds = PlotDataset::build(&sel, false);

    let (lo, hi) = ds.bounds[ModelColumn::Temperature];
    assert!((lo - 5.0 * 0.9).abs() < 1e-9);
    assert!((hi - 6.5 * 1.1).abs() < 1e-9);
    // identical inclinations in one model, different in the other
    let (lo, hi) = ds.bounds[ModelColumn::Inclination];
    assert!((lo - 45.0 * 0.9).abs() < 1e-9);
    assert!((hi - 90.0 * 1.1).abs() < 1e-9);
}

#[test]
fn session_plot_uses_height_when_available() {
    let dir = fixture(&[("tall.mod", MODEL_11), ("tall.per", PROFILE)]);
    let session = Session::open(&paths(dir.path(), &["tall.mod", "tall.per"])).unwrap();
    let toggles = PlotToggles {
        height_scale: true,
        ..PlotToggles::default()
    };

    let snap = session.plot(&toggles).unwrap();
    assert_eq!(snap.plan.axis, DepthAxis::Height);
    assert_eq!(snap.plan.stokes, Stokes::ALL.to_vec());
    assert!(snap.warnings.is_empty());
}

#[test]
fn session_rereads_files_on_every_plot() {
    let dir = fixture(&[("a.mod", MODEL_8)]);
    let session = Session::open(&paths(dir.path(), &["a.mod"])).unwrap();
    let toggles = PlotToggles::default();

    let first = session.plot(&toggles).unwrap();
    assert_eq!(first.dataset.mod_mask(), vec![true]);

    fs::remove_file(dir.path().join("a.mod")).unwrap();
    let second = session.plot(&toggles).unwrap();
    assert_eq!(second.dataset.mod_mask(), vec![false]);
    assert!(second.warnings.iter().any(|w| w.contains("no .mod file for a")));
}

#[test]
fn stokes_only_plot_of_models_only_selection_warns() {
    let dir = fixture(&[("a.mod", MODEL_8)]);
    let session = Session::open(&paths(dir.path(), &["a.mod"])).unwrap();
    let toggles = PlotToggles {
        temperature: false,
        field_strength: false,
        los_velocity: false,
        inclination: false,
        azimuth: false,
        ..PlotToggles::default()
    };

    let snap = session.plot(&toggles).unwrap();
    assert_eq!(snap.plan.stokes, Stokes::ALL.to_vec());
    assert!(snap.plan.parameters.is_empty());
    assert_eq!(snap.dataset.profiles().count(), 0);
    assert_eq!(
        snap.warnings,
        vec![
            "no profile loaded for the selected Stokes parameters".to_string(),
            "nothing to plot: none of the selected series has data".to_string(),
        ]
    );
}

#[test]
fn unreadable_model_is_reported_under_its_kind() {
    let dir = fixture(&[("a.per", PROFILE), ("a.mod", "1.0 1.0\n")]);
    let sel = reconcile(&paths(dir.path(), &["a.per", "a.mod"])).unwrap();
    let ds = PlotDataset::build(&sel, true);

    assert_eq!(ds.per_mask(), vec![true]);
    assert_eq!(ds.mod_mask(), vec![false]);
    assert_eq!(ds.model_misses, 1);
    // no model, so the .err is never tried
    assert_eq!(ds.error_misses, 0);
    assert_eq!(ds.warnings.len(), 1);
    assert_eq!(ds.warnings[0].kind, FileKind::Model);
}
