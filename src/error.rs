use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Panic: {message}")]
    Panic { message: String },

    #[error("Failed to write status output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub(crate) enum ActivationError {
    #[error("{program} not found. Please install it or set `command` in the config file.")]
    NotFound { program: String },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Command failed ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}
