//! Filesystem helpers for Trusty extension discovery
//!
//! Provides normalized path handling and the small set of blocking
//! directory and file reads the extension resolver needs.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use io::{list_subdirectories, read_text, read_text_if_exists, same_location};
pub use path::NormalizedPath;
