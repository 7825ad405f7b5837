use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("supported formats: {}", .0.join(" "))]
    FormatHelp(Vec<&'static str>),

    #[error("unsupported type '{0}'")]
    UnsupportedType(String),

    #[error("invalid configuration: type '{0}' is not supported")]
    UnsupportedConfiguredType(String),

    #[error("missing required --type option")]
    MissingType,

    #[error("invalid {option} value {value}, must be in range {min} .. {max}")]
    OutOfRange {
        option: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid format string \"{0}\"")]
    InvalidFormatString(String),
}

pub type OptionsResult<T> = Result<T, OptionsError>;
