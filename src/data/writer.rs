use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SirError};

use super::model::{ModelColumn, ModelRecord, ProfileRecord};

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write a `.per` file in the fixed-width layout SIR reads back.
/// Creates or truncates `path`.
pub fn write_profile(path: &Path, profile: &ProfileRecord) -> Result<()> {
    write_text(path, &render_profile(profile))
}

/// Write a `.mod` (or `.err`) file. With `has_extended` the height, density
/// and gas-pressure columns are written as well.
pub fn write_model(path: &Path, model: &ModelRecord, has_extended: bool) -> Result<()> {
    write_text(path, &render_model(model, has_extended))
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| SirError::io(path, e))?;
    let mut out = BufWriter::new(file);
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| SirError::io(path, e))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

pub fn render_profile(profile: &ProfileRecord) -> String {
    let mut text = String::new();
    for [index, wl, i, q, u, v] in profile.rows() {
        text.push_str(&format!(
            "     {}   {}  {} {} {} {} \n",
            line_index(index),
            fixed(wl, 10, 4),
            sci(i, 8, 6, false),
            sci(q, 8, 6, false),
            sci(u, 8, 6, false),
            sci(v, 8, 6, false),
        ));
    }
    text
}

pub fn render_model(model: &ModelRecord, has_extended: bool) -> String {
    let h = &model.header;
    let mut text = format!(
        "  {}      {}      {} \n",
        fixed(h.vmac, 10, 8),
        fixed(h.filling_factor, 10, 8),
        fixed(h.stray_light, 10, 8),
    );

    let col = |c: ModelColumn, k: usize| model.column(c)[k];
    for k in 0..model.len() {
        text.push_str(&format!(
            " {}  {} {} {} {} {} {} {}",
            fixed(col(ModelColumn::LogTau, k), 7, 4),
            fixed(col(ModelColumn::Temperature, k), 6, 1),
            sci(col(ModelColumn::ElectronPressure, k), 8, 5, true),
            sci(col(ModelColumn::Microturbulence, k), 5, 3, true),
            sci(col(ModelColumn::FieldStrength, k), 6, 4, true),
            sci(col(ModelColumn::LosVelocity, k), 6, 4, true),
            sci(col(ModelColumn::Inclination, k), 6, 4, true),
            sci(col(ModelColumn::Azimuth, k), 6, 4, true),
        ));
        if has_extended {
            text.push_str(&format!(
                " {} {} {}",
                sci(col(ModelColumn::Height, k), 6, 4, true),
                sci(col(ModelColumn::Density, k), 6, 4, true),
                sci(col(ModelColumn::GasPressure, k), 6, 4, true),
            ));
        }
        text.push_str(" \n");
    }
    text
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Integral indices are written without a fractional part.
fn line_index(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Fixed-point, right-aligned in `width`, with a blank in place of a `+` sign.
fn fixed(value: f64, width: usize, precision: usize) -> String {
    pad_signed(format!("{value:.precision$}"), width)
}

/// Scientific notation with a signed, at-least-two-digit exponent
/// (`1.000000e+00`), right-aligned in `width` with a blank sign.
fn sci(value: f64, width: usize, precision: usize, uppercase: bool) -> String {
    let raw = format!("{value:.precision$e}");
    let Some((mantissa, exp)) = raw.split_once('e') else {
        // inf / NaN carry no exponent
        return pad_signed(raw, width);
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let body = format!(
        "{mantissa}{}{}{:02}",
        if uppercase { 'E' } else { 'e' },
        if exp < 0 { '-' } else { '+' },
        exp.unsigned_abs()
    );
    pad_signed(body, width)
}

fn pad_signed(body: String, width: usize) -> String {
    let signed = if body.starts_with('-') {
        body
    } else {
        format!(" {body}")
    };
    format!("{signed:>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ModelHeader;

    #[test]
    fn fixed_uses_blank_sign_and_width() {
        assert_eq!(fixed(-1.5, 10, 4), "   -1.5000");
        assert_eq!(fixed(0.00004, 10, 4), "    0.0000");
        assert_eq!(fixed(6000.0, 6, 1), " 6000.0");
    }

    #[test]
    fn sci_pads_exponent_to_two_digits() {
        assert_eq!(sci(1.0, 8, 6, false), " 1.000000e+00");
        assert_eq!(sci(-2.0e-3, 8, 6, false), "-2.000000e-03");
        assert_eq!(sci(9.9999999, 8, 6, false), " 1.000000e+01");
        assert_eq!(sci(1e-100, 6, 4, true), " 1.0000E-100");
        assert_eq!(sci(0.0, 5, 3, true), " 0.000E+00");
    }

    #[test]
    fn line_index_prefers_integers() {
        assert_eq!(line_index(1.0), "1");
        assert_eq!(line_index(2.5), "2.5");
    }

    #[test]
    fn profile_row_layout() {
        let mut p = ProfileRecord::default();
        p.push_row([1.0, -150.0, 0.98, 1.0e-3, -2.0e-3, 5.0e-4]);
        assert_eq!(
            render_profile(&p),
            "     1    -150.0000   9.800000e-01  1.000000e-03 -2.000000e-03  5.000000e-04 \n"
        );
    }

    #[test]
    fn model_layout_basic_and_extended() {
        let header = ModelHeader {
            vmac: 1.5,
            filling_factor: 1.0,
            stray_light: 0.0,
        };
        let mut m = ModelRecord::new(header, false);
        m.push_row(&[-1.0, 6000.0, 100.0, 1.0e5, 0.0, 0.0, 90.0, 0.0]);
        assert_eq!(
            render_model(&m, false),
            "   1.50000000       1.00000000       0.00000000 \n \
             -1.0000   6000.0  1.00000E+02  1.000E+05  0.0000E+00  0.0000E+00  9.0000E+01  0.0000E+00 \n"
        );

        let mut x = ModelRecord::new(header, true);
        x.push_row(&[
            -4.0, 4500.0, 0.1, 0.0, 1000.0, -150000.0, 45.0, 10.0, 500.0, 1e-9, 250.0,
        ]);
        let text = render_model(&x, true);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            " -4.0000   4500.0  1.00000E-01  0.000E+00  1.0000E+03 -1.5000E+05  4.5000E+01  1.0000E+01  5.0000E+02  1.0000E-09  2.5000E+02 "
        );
    }
}
