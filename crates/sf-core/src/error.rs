use thiserror::Error;

pub type SfResult<T> = Result<T, SfError>;

#[derive(Error, Debug)]
pub enum SfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Contract violation: {what}")]
    Contract { what: String },
}

impl SfError {
    /// Shorthand for caller-contract failures (malformed input shapes).
    pub fn contract(what: impl Into<String>) -> Self {
        SfError::Contract { what: what.into() }
    }
}
