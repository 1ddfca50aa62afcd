//! Matching CSV parameters against backend variable names.
//!
//! The name-resolution policy is fixed: exact match first, then the
//! `:`-prefixed global spelling. Nothing here talks to the backend;
//! these are pure functions over caller-supplied listings.

/// One CSV parameter matched (or not) against a backend variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMapping {
    /// Name as it appears in the CSV.
    pub source_name: String,
    /// Name the backend knows the variable by; empty when unmatched.
    pub target_name: String,
    /// Backend value handle; empty when unmatched or lookup failed.
    pub value_id: String,
    /// The variable's current init string; "0" when unknown.
    pub current_value: String,
    /// Value to apply for the selected scenario.
    pub new_value: f64,
    pub matched: bool,
    pub units: Option<String>,
    pub description: Option<String>,
}

/// Outcome of validating a matching pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub missing_variables: Vec<String>,
    pub mappings: Vec<ParameterMapping>,
}

/// Resolve a CSV parameter name against the backend's variable listing.
///
/// Exact name wins; otherwise the `:`-prefixed global spelling is tried.
pub fn resolve_target<'a>(existing: &'a [String], csv_name: &str) -> Option<&'a str> {
    let prefixed = format!(":{csv_name}");
    existing
        .iter()
        .find(|name| name.as_str() == csv_name)
        .or_else(|| existing.iter().find(|name| **name == prefixed))
        .map(String::as_str)
}

/// Validate a matching pass: usable iff at least one mapping matched.
///
/// Unmatched names are reported in `missing_variables`, not treated as
/// fatal.
pub fn validate_mappings(mappings: Vec<ParameterMapping>) -> ValidationResult {
    let missing_variables: Vec<String> = mappings
        .iter()
        .filter(|m| !m.matched)
        .map(|m| m.source_name.clone())
        .collect();
    let matched_count = mappings.iter().filter(|m| m.matched).count();

    ValidationResult {
        valid: matched_count > 0,
        errors: if matched_count == 0 {
            vec!["No variables from CSV found in model".to_string()]
        } else {
            Vec::new()
        },
        warnings: Vec::new(),
        missing_variables,
        mappings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn mapping(source: &str, matched: bool) -> ParameterMapping {
        ParameterMapping {
            source_name: source.into(),
            target_name: if matched { source.into() } else { String::new() },
            value_id: String::new(),
            current_value: "0".into(),
            new_value: 1.0,
            matched,
            units: None,
            description: None,
        }
    }

    #[test]
    fn exact_match_wins_over_prefixed() {
        let existing = names(&["y", ":y"]);
        assert_eq!(resolve_target(&existing, "y"), Some("y"));
    }

    #[test]
    fn prefixed_fallback_applies() {
        let existing = names(&["x", ":y"]);
        assert_eq!(resolve_target(&existing, "y"), Some(":y"));
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let existing = names(&["x", ":y"]);
        assert_eq!(resolve_target(&existing, "z"), None);
    }

    #[test]
    fn valid_needs_one_match() {
        let result = validate_mappings(vec![mapping("a", false), mapping("b", true)]);
        assert!(result.valid);
        assert_eq!(result.missing_variables, vec!["a"]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn no_matches_is_invalid_not_fatal() {
        let result = validate_mappings(vec![mapping("a", false)]);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.mappings.len(), 1);
    }
}
