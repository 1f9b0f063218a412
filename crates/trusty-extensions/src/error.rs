use std::path::PathBuf;

use crate::name::{ExtensionName, to_sentence};

/// Errors that can occur while configuring or resolving extensions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more explicitly requested extensions were not discovered.
    ///
    /// Every missing name is listed, in the order it was requested.
    #[error("these configured extensions have not been found: {}", to_sentence(.names))]
    MissingExtensions { names: Vec<ExtensionName> },

    /// An extension settings file is not valid TOML or has the wrong shape.
    #[error("failed to parse extension settings at {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    /// The package naming convention cannot identify extensions.
    #[error("invalid package naming convention: {reason}")]
    InvalidConvention { reason: String },

    /// The package naming convention did not compile to a pattern.
    #[error("invalid package naming pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Filesystem error while scanning search roots or reading settings.
    #[error(transparent)]
    Fs(#[from] trusty_fs::Error),
}

impl Error {
    /// Names reported by [`Error::MissingExtensions`], empty for other kinds.
    pub fn missing_names(&self) -> &[ExtensionName] {
        match self {
            Error::MissingExtensions { names } => names,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
