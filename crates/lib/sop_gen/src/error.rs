use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::ir::{MAX_ARITY, MIN_ARITY};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("arity {0} is outside [{}, {}]", MIN_ARITY, MAX_ARITY)]
    ArityOutOfRange(usize),

    #[error("no line containing marker `{marker}`")]
    MissingMarker { marker: String },

    /// The end marker was found on or before the start marker line.
    #[error("end marker `{end}` does not follow start marker `{start}`")]
    MarkersOutOfOrder { start: String, end: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to overwrite existing file {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("formatter command is empty")]
    EmptyFormatterCommand,

    #[error("failed to run formatter `{program}`: {source}")]
    FormatterSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter `{program}` exited with {status}")]
    FormatterFailed { program: String, status: ExitStatus },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
