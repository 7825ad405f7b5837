use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown text encoding \"{0}\"")]
    UnknownEncoding(String),

    #[error("{message}")]
    Syntax { line: usize, message: String },

    #[error("cue sheet parsing aborted at line {line}")]
    Aborted { line: usize },

    #[error("no cue file found in {}", .0.display())]
    NoCueFileFound(PathBuf),
}

impl CueError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        CueError::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Line number for errors tied to a position in the sheet.
    pub fn line(&self) -> Option<usize> {
        match self {
            CueError::Syntax { line, .. } | CueError::Aborted { line } => Some(*line),
            _ => None,
        }
    }
}

pub type CueResult<T> = Result<T, CueError>;
