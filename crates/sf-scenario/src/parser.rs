//! CSV parser for enriched scenario tables.
//!
//! Expected layout: `name,type,units,description,init,<scenario columns...>`
//! where every metadata column except `name` is optional and detected by
//! header text. Anything after the last recognized metadata column is a
//! scenario column, named by its header.

use csv::ReaderBuilder;
use thiserror::Error;

use sf_core::parse_cell;

use crate::model::{InitValue, ParamKind, ParameterInfo, ScenarioData};

/// Errors fatal to a parse call. Messages are surfaced to the user verbatim.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV file is empty")]
    Empty,

    #[error("CSV must have a '{0}' column")]
    MissingColumn(&'static str),

    #[error("CSV must have at least one scenario column")]
    NoScenarioColumns,

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Recognized metadata header positions within the header row.
#[derive(Debug, Default)]
struct HeaderLayout {
    name: usize,
    kind: Option<usize>,
    units: Option<usize>,
    description: Option<usize>,
    init: Option<usize>,
    scenario_start: usize,
}

impl HeaderLayout {
    fn sniff(headers: &[String]) -> Result<Self, ParseError> {
        let lower: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();
        let find = |names: &[&str]| lower.iter().position(|h| names.contains(&h.as_str()));

        let name = find(&["name"]).ok_or(ParseError::MissingColumn("name"))?;
        let kind = find(&["type"]);
        let units = find(&["units", "unit"]);
        let description = find(&["description", "desc"]);
        let init = find(&["init", "initialvalue", "initial_value"]);

        // Scenario columns start after the last recognized metadata column;
        // with no metadata beyond `name`, that is everything after it.
        let scenario_start = 1 + [Some(name), kind, units, description, init]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0);

        Ok(Self {
            name,
            kind,
            units,
            description,
            init,
            scenario_start,
        })
    }
}

/// Parse raw CSV text into a [`ScenarioData`].
///
/// Rows with a blank or missing name are skipped silently. Blank or
/// unparsable scenario cells become `None`, never 0. Row order and header
/// order are preserved.
pub fn parse(text: &str) -> Result<ScenarioData, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = records.next().ok_or(ParseError::Empty)??;
    let headers: Vec<String> = header_record.iter().map(|h| h.to_string()).collect();

    let layout = HeaderLayout::sniff(&headers)?;

    let scenario_names: Vec<String> = headers[layout.scenario_start.min(headers.len())..]
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if scenario_names.is_empty() {
        return Err(ParseError::NoScenarioColumns);
    }

    let mut parameters = Vec::new();
    for record in records {
        let record = record?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::trim);

        let name = match cell(Some(layout.name)) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => continue,
        };

        let kind = cell(layout.kind)
            .map(ParamKind::from_cell)
            .unwrap_or(ParamKind::Parameter);
        let units = cell(layout.units)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let description = cell(layout.description)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let init = cell(layout.init).and_then(InitValue::from_cell);

        let values = (0..scenario_names.len())
            .map(|j| parse_cell(record.get(layout.scenario_start + j).unwrap_or("")))
            .collect();

        parameters.push(ParameterInfo {
            name,
            kind,
            units,
            description,
            init,
            values,
        });
    }

    Ok(ScenarioData {
        parameters,
        scenario_names,
    })
}
