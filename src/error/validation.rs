use thiserror::Error;

#[derive(Debug, Error, Clone, Copy)]
pub enum NumberKind {
    #[error("a number")]
    Float,
    #[error("an integer")]
    Integer,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Header must look like NAME=VALUE, got '{value}'.")]
    InvalidHeaderFormat { value: String },
    #[error("Header name cannot be empty.")]
    EmptyHeaderName,
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Expected {kind}, got '{value}'.")]
    NotANumber { value: String, kind: NumberKind },
    #[error("Value must be greater than 0, got '{value}'.")]
    NotPositive { value: String },
    #[error("Value must be >= 0, got '{value}'.")]
    Negative { value: String },
    #[error("Value '{value}' is too large for a duration.")]
    DurationOverflow { value: String },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
