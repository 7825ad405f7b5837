use crate::formats::AudioFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("no output format selected, use --type")]
    MissingFormat,

    #[error("no {0} encoder is available, only --dry-run planning is supported")]
    NoEncoder(AudioFormat),
}

pub type SplitResult<T> = Result<T, SplitError>;
