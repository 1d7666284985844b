use std::io;

use mojo_scanner::DriverError;

/// Anything that makes `mojo-scan` exit with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("missing file path")]
    MissingPath,
    #[error("invalid resume offset '{0}' (expected a byte offset)")]
    InvalidOffset(String),
    #[error("no checkpoint at offset {0}")]
    NoCheckpointAt(u32),
    #[error(transparent)]
    Resume(#[from] DriverError),
    #[error("cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
