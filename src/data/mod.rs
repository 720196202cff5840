//! Data layer: SIR records, file codec, selection reconciliation, loading.
//!
//! Architecture:
//! ```text
//!  selected paths (.per / .mod)
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ reconcile │  base names + per/mod masks + directory
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐      ┌────────┐
//!   │ dataset  │ ───▶ │ loader │  .per / .mod / .err → records
//!   └──────────┘      └────────┘
//!        │
//!        ▼
//!   PlotDataset: Option<record> per entity, scaled units, axis bounds
//! ```
//!
//! `writer` is the inverse of `loader`.

pub mod dataset;
pub mod loader;
pub mod model;
pub mod reconcile;
pub mod writer;
