//! CSV rendering for variable exports.
//!
//! Fixed column layout `name,units,description,type,value,init`; quoting
//! is handled by the csv writer.

use serde::{Deserialize, Serialize};

/// One exported model variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRow {
    pub name: String,
    pub units: String,
    pub description: String,
    pub kind: String,
    pub value: f64,
    pub init: String,
}

const HEADERS: [&str; 6] = ["name", "units", "description", "type", "value", "init"];

/// Render export rows as CSV text, header first.
pub fn render_csv(rows: &[VariableRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record([
            row.name.as_str(),
            row.units.as_str(),
            row.description.as_str(),
            row.kind.as_str(),
            &format!("{}", row.value),
            row.init.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, description: &str) -> VariableRow {
        VariableRow {
            name: name.into(),
            units: "kg".into(),
            description: description.into(),
            kind: "parameter".into(),
            value: 1.5,
            init: "1".into(),
        }
    }

    #[test]
    fn header_comes_first() {
        let csv = render_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "name,units,description,type,value,init");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let csv = render_csv(&[row("rate", "births, per capita")]).unwrap();
        assert!(csv.contains("\"births, per capita\""));
    }

    #[test]
    fn quotes_are_doubled() {
        let csv = render_csv(&[row("rate", "the \"real\" rate")]).unwrap();
        assert!(csv.contains("\"the \"\"real\"\" rate\""));
    }
}
