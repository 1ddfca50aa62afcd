use crate::SfError;

/// Parse a scenario cell into an optional value.
///
/// Blank and unparsable cells are "no value for this scenario" (`None`),
/// distinct from an explicit `0`.
pub fn parse_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, SfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SfError::NonFinite { what, value: v })
    }
}
