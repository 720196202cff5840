use std::path::Path;

use crate::error::{FormatError, Result, SirError};

use super::model::{ErrorRecord, ModelColumn, ModelHeader, ModelRecord, ProfileRecord};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a `.per` Stokes profile file.
pub fn read_profile(path: &Path) -> Result<ProfileRecord> {
    let text = read_text(path)?;
    parse_profile(&text).map_err(|source| format_error(path, source))
}

/// Read a `.mod` model atmosphere with 8 or 11 columns.
pub fn read_model(path: &Path) -> Result<ModelRecord> {
    let text = read_text(path)?;
    parse_model(&text).map_err(|source| format_error(path, source))
}

/// Read a `.err` file. Same layout as a model.
pub fn read_error(path: &Path) -> Result<ErrorRecord> {
    read_model(path)
}

fn read_text(path: &Path) -> Result<String> {
    log::debug!("reading {}", path.display());
    std::fs::read_to_string(path).map_err(|e| SirError::io(path, e))
}

fn format_error(path: &Path, source: FormatError) -> SirError {
    SirError::Format {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Text parsers
// ---------------------------------------------------------------------------

/// Parse profile text: one sample per line,
/// `line_index wavelength I Q U V`. Fields past the sixth are ignored.
pub fn parse_profile(text: &str) -> std::result::Result<ProfileRecord, FormatError> {
    let mut record = ProfileRecord::default();

    for (line_no, fields) in data_lines(text) {
        if fields.len() < 6 {
            return Err(FormatError::new(
                line_no,
                format!("expected 6 columns, found {}", fields.len()),
            ));
        }
        let mut row = [0.0; 6];
        for (slot, tok) in row.iter_mut().zip(&fields) {
            *slot = parse_field(tok, line_no)?;
        }
        record.push_row(row);
    }

    Ok(record)
}

/// Parse model text: a `vmac filling_factor stray_light` header followed by
/// depth rows of 8 or 11 columns.
///
/// The first data row fixes the column count; every later row must match it.
pub fn parse_model(text: &str) -> std::result::Result<ModelRecord, FormatError> {
    let mut lines = data_lines(text);

    let (header_no, header_fields) = lines
        .next()
        .ok_or_else(|| FormatError::new(1, "missing header line"))?;
    if header_fields.len() != 3 {
        return Err(FormatError::new(
            header_no,
            format!(
                "header must hold vmac, filling factor and stray light, found {} values",
                header_fields.len()
            ),
        ));
    }
    let header = ModelHeader {
        vmac: parse_field(header_fields[0], header_no)?,
        filling_factor: parse_field(header_fields[1], header_no)?,
        stray_light: parse_field(header_fields[2], header_no)?,
    };

    let mut lines = lines.peekable();
    let (first_no, ncol) = match lines.peek() {
        Some((line_no, fields)) => (*line_no, fields.len()),
        None => return Ok(ModelRecord::new(header, false)),
    };
    if ncol != ModelColumn::BASIC_COUNT && ncol != ModelColumn::COUNT {
        return Err(FormatError::new(
            first_no,
            format!("expected 8 or 11 columns, found {ncol}"),
        ));
    }

    let mut record = ModelRecord::new(header, ncol == ModelColumn::COUNT);
    let mut row = Vec::with_capacity(ncol);

    for (line_no, fields) in lines {
        if fields.len() != ncol {
            return Err(FormatError::new(
                line_no,
                format!(
                    "expected {ncol} columns like the first row, found {}",
                    fields.len()
                ),
            ));
        }
        row.clear();
        for tok in &fields {
            row.push(parse_field(tok, line_no)?);
        }
        record.push_row(&row);
    }

    Ok(record)
}

/// Non-blank lines split on whitespace, with 1-based line numbers.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> + '_ {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, fields)| !fields.is_empty())
}

fn parse_field(tok: &str, line_no: usize) -> std::result::Result<f64, FormatError> {
    tok.parse::<f64>()
        .or_else(|_| parse_fortran_exponent(tok))
        .map_err(|_| FormatError::new(line_no, format!("'{tok}' is not a number")))
}

/// Fortran writes double-precision exponents with `D` (`1.0D+05`).
fn parse_fortran_exponent(tok: &str) -> std::result::Result<f64, std::num::ParseFloatError> {
    tok.replace(['D', 'd'], "e").parse::<f64>()
}
