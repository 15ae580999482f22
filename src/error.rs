// SPDX-License-Identifier: MPL-2.0

//! Error type shared by the page controllers and the config editor.

use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be started (usually not installed).
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("`{program}` exited with {status}: {stderr}")]
    Status {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no monitor line found in {}", .0.display())]
    MonitorLineMissing(PathBuf),

    #[error("line {index} is out of range ({len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    #[error("file watcher: {0}")]
    Watch(#[from] notify::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
