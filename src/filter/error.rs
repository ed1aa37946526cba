use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// A date bound that is neither RFC 3339 nor YYYY-MM-DD.
    #[error("Invalid {field} date: {value}")]
    InvalidDate { field: &'static str, value: String },
}
