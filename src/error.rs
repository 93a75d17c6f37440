use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DotenvError {
    #[error("File not readable at {}: {reason}", .path.display())]
    FileNotReadable { path: PathBuf, reason: Unreadable },

    #[error("File not writable at {}", .0.display())]
    FileNotWritable(PathBuf),

    #[error("Environment file already exists at: {}. Use --force to overwrite it.", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("Key '{0}' not found.")]
    KeyNotFound(String),

    #[error("Invalid line format: {0}")]
    InvalidLineFormat(String),

    #[error("Salts unavailable: {0}")]
    SaltsUnavailable(String),

    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("The salt generator returned no salts.")]
    EmptyResponse,

    #[error("Failed to fetch salts from {url}: {message}")]
    SaltFetch { url: String, message: String },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment file has not been loaded.")]
    NotLoaded,

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a path failed the readability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unreadable {
    Missing,
    NotAFile,
    PermissionDenied,
}

impl fmt::Display for Unreadable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unreadable::Missing => f.write_str("file does not exist"),
            Unreadable::NotAFile => f.write_str("not a regular file"),
            Unreadable::PermissionDenied => f.write_str("permission denied"),
        }
    }
}
