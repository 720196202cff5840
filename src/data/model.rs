use std::fmt;

// ---------------------------------------------------------------------------
// FileKind – the three SIR file types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    /// `.per` Stokes profile.
    Profile,
    /// `.mod` model atmosphere.
    Model,
    /// `.err` model uncertainties.
    Error,
}

impl FileKind {
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Profile => "per",
            FileKind::Model => "mod",
            FileKind::Error => "err",
        }
    }

    /// Kinds a user may select directly; `.err` files are only found as siblings.
    pub fn from_selectable_extension(ext: &str) -> Option<Self> {
        match ext {
            "per" => Some(FileKind::Profile),
            "mod" => Some(FileKind::Model),
            _ => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileKind::Profile => "profile",
            FileKind::Model => "model",
            FileKind::Error => "error",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Stokes – the four polarization parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stokes {
    I,
    Q,
    U,
    V,
}

impl Stokes {
    pub const ALL: [Stokes; 4] = [Stokes::I, Stokes::Q, Stokes::U, Stokes::V];

    pub fn title(self) -> &'static str {
        match self {
            Stokes::I => "Stokes I",
            Stokes::Q => "Stokes Q",
            Stokes::U => "Stokes U",
            Stokes::V => "Stokes V",
        }
    }
}

// ---------------------------------------------------------------------------
// ModelColumn – the eleven depth-dependent model quantities
// ---------------------------------------------------------------------------

/// Columns of a model atmosphere, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelColumn {
    LogTau,
    Temperature,
    ElectronPressure,
    Microturbulence,
    FieldStrength,
    LosVelocity,
    Inclination,
    Azimuth,
    Height,
    Density,
    GasPressure,
}

impl ModelColumn {
    pub const COUNT: usize = 11;

    /// Columns present in every model file.
    pub const BASIC_COUNT: usize = 8;

    pub const ALL: [ModelColumn; Self::COUNT] = [
        ModelColumn::LogTau,
        ModelColumn::Temperature,
        ModelColumn::ElectronPressure,
        ModelColumn::Microturbulence,
        ModelColumn::FieldStrength,
        ModelColumn::LosVelocity,
        ModelColumn::Inclination,
        ModelColumn::Azimuth,
        ModelColumn::Height,
        ModelColumn::Density,
        ModelColumn::GasPressure,
    ];

    /// The seven quantities a user can choose to plot against depth.
    pub const PLOTTABLE: [ModelColumn; 7] = [
        ModelColumn::Temperature,
        ModelColumn::ElectronPressure,
        ModelColumn::Microturbulence,
        ModelColumn::FieldStrength,
        ModelColumn::LosVelocity,
        ModelColumn::Inclination,
        ModelColumn::Azimuth,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Divisor applied before display (cgs → kK, km/s, kG, Mm).
    pub fn display_divisor(self) -> f64 {
        match self {
            ModelColumn::Temperature | ModelColumn::FieldStrength | ModelColumn::Height => 1e3,
            ModelColumn::Microturbulence | ModelColumn::LosVelocity => 1e5,
            _ => 1.0,
        }
    }

    /// Axis title for the scaled quantity.
    pub fn title(self) -> &'static str {
        match self {
            ModelColumn::LogTau => "log(τ)",
            ModelColumn::Temperature => "Temperature (kK)",
            ModelColumn::ElectronPressure => "Pe (dyn cm⁻²)",
            ModelColumn::Microturbulence => "Microturbulence (km/s)",
            ModelColumn::FieldStrength => "B (kG)",
            ModelColumn::LosVelocity => "Vlos (km/s)",
            ModelColumn::Inclination => "Inclination (°)",
            ModelColumn::Azimuth => "Azimuth (°)",
            ModelColumn::Height => "z (Mm)",
            ModelColumn::Density => "ρ (g cm⁻³)",
            ModelColumn::GasPressure => "Pg (dyn cm⁻²)",
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileRecord – one `.per` file
// ---------------------------------------------------------------------------

/// Stokes profiles sampled at a set of wavelength offsets.
///
/// All six columns have the same length; rows keep file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRecord {
    /// Spectral line index. Read as float; SIR writes integers here.
    pub line_index: Vec<f64>,
    /// Wavelength offset from line centre.
    pub wavelength: Vec<f64>,
    pub stokes_i: Vec<f64>,
    pub stokes_q: Vec<f64>,
    pub stokes_u: Vec<f64>,
    pub stokes_v: Vec<f64>,
}

impl ProfileRecord {
    pub fn push_row(&mut self, row: [f64; 6]) {
        self.line_index.push(row[0]);
        self.wavelength.push(row[1]);
        self.stokes_i.push(row[2]);
        self.stokes_q.push(row[3]);
        self.stokes_u.push(row[4]);
        self.stokes_v.push(row[5]);
    }

    /// Number of spectral samples.
    pub fn len(&self) -> usize {
        self.line_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_index.is_empty()
    }

    pub fn stokes(&self, s: Stokes) -> &[f64] {
        match s {
            Stokes::I => &self.stokes_i,
            Stokes::Q => &self.stokes_q,
            Stokes::U => &self.stokes_u,
            Stokes::V => &self.stokes_v,
        }
    }

    /// Iterate rows as `[index, wavelength, I, Q, U, V]`.
    pub fn rows(&self) -> impl Iterator<Item = [f64; 6]> + '_ {
        (0..self.len()).map(move |k| {
            [
                self.line_index[k],
                self.wavelength[k],
                self.stokes_i[k],
                self.stokes_q[k],
                self.stokes_u[k],
                self.stokes_v[k],
            ]
        })
    }
}

// ---------------------------------------------------------------------------
// ModelRecord – one `.mod` (or `.err`) file
// ---------------------------------------------------------------------------

/// Scalar header line of a model file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelHeader {
    /// Macroturbulent velocity.
    pub vmac: f64,
    pub filling_factor: f64,
    /// Stray-light fraction.
    pub stray_light: f64,
}

/// A model atmosphere: header plus eleven depth-indexed columns.
///
/// Files with only eight columns are stored with height, density and gas
/// pressure zero-filled and `extended == false`; consumers must check the
/// flag rather than the values.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    pub header: ModelHeader,
    columns: [Vec<f64>; ModelColumn::COUNT],
    extended: bool,
}

/// Uncertainty file; shares the model layout.
pub type ErrorRecord = ModelRecord;

impl ModelRecord {
    pub fn new(header: ModelHeader, extended: bool) -> Self {
        Self {
            header,
            columns: Default::default(),
            extended,
        }
    }

    /// Append one depth point. `row` holds 8 or 11 values; missing optional
    /// columns are zero-filled.
    pub fn push_row(&mut self, row: &[f64]) {
        for (k, column) in self.columns.iter_mut().enumerate() {
            column.push(row.get(k).copied().unwrap_or(0.0));
        }
    }

    /// Whether height, density and gas pressure came from the file.
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Number of depth points.
    pub fn len(&self) -> usize {
        self.columns[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns[0].is_empty()
    }

    pub fn column(&self, c: ModelColumn) -> &[f64] {
        &self.columns[c.index()]
    }

    pub fn column_mut(&mut self, c: ModelColumn) -> &mut Vec<f64> {
        &mut self.columns[c.index()]
    }

    pub fn log_tau(&self) -> &[f64] {
        self.column(ModelColumn::LogTau)
    }

    pub fn temperature(&self) -> &[f64] {
        self.column(ModelColumn::Temperature)
    }

    pub fn height(&self) -> &[f64] {
        self.column(ModelColumn::Height)
    }

    /// True when the file carried a height scale that is not all zeros.
    pub fn has_height(&self) -> bool {
        self.extended && self.height().iter().any(|z| *z != 0.0)
    }

    /// Copy with every column divided by its display divisor.
    pub fn scaled(&self) -> Self {
        let mut out = self.clone();
        for c in ModelColumn::ALL {
            let divisor = c.display_divisor();
            if divisor != 1.0 {
                out.column_mut(c).iter_mut().for_each(|v| *v /= divisor);
            }
        }
        out
    }
}
