//! Reading, writing and reconciling SIR inversion output.
//!
//! A file selection of `.per` Stokes profiles and `.mod` model atmospheres is
//! grouped by base name ([`data::reconcile`]), every file is loaded into a
//! per-entity [`data::dataset::PlotDataset`], and a [`session::Session`]
//! turns the user's [`config::PlotToggles`] into a plot plan. Drawing is left
//! to the caller.

pub mod config;
pub mod data;
pub mod error;
pub mod session;

pub use config::{PlotToggles, ViewerConfig};
pub use data::dataset::{AxisBounds, Entity, PlotDataset};
pub use data::loader::{read_error, read_model, read_profile};
pub use data::model::{
    ErrorRecord, FileKind, ModelColumn, ModelHeader, ModelRecord, ProfileRecord, Stokes,
};
pub use data::reconcile::{reconcile, Selection};
pub use data::writer::{write_model, write_profile};
pub use error::{FormatError, LoadWarning, SirError};
pub use session::{DepthAxis, PlotPlan, Session, Snapshot};
