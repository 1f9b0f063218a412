//! Entries of the configured extension load order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::name::ExtensionName;

/// The wildcard entry meaning "every other available extension".
pub const WILDCARD: &str = "all";

/// One entry of the requested load order.
///
/// Written in settings as a plain string; `all` (or `:all`, or `*`) is the
/// wildcard and anything else names an extension:
///
/// ```toml
/// load = ["dashboard", "blog", "all", "comments"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RequestedExtension {
    /// A specific extension, loaded at this position.
    Named(ExtensionName),
    /// Every available extension not named elsewhere, alphabetically.
    All,
}

impl RequestedExtension {
    pub fn named(name: impl Into<ExtensionName>) -> Self {
        Self::Named(name.into())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn name(&self) -> Option<&ExtensionName> {
        match self {
            Self::Named(name) => Some(name),
            Self::All => None,
        }
    }
}

impl From<&str> for RequestedExtension {
    fn from(s: &str) -> Self {
        match s {
            WILDCARD | ":all" | "*" => Self::All,
            name => Self::Named(ExtensionName::new(name)),
        }
    }
}

impl From<String> for RequestedExtension {
    fn from(s: String) -> Self {
        match s.as_str() {
            WILDCARD | ":all" | "*" => Self::All,
            _ => Self::Named(ExtensionName::from(s)),
        }
    }
}

impl From<ExtensionName> for RequestedExtension {
    fn from(name: ExtensionName) -> Self {
        Self::Named(name)
    }
}

impl From<RequestedExtension> for String {
    fn from(entry: RequestedExtension) -> Self {
        entry.to_string()
    }
}

impl FromStr for RequestedExtension {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RequestedExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::All => f.write_str(WILDCARD),
        }
    }
}

/// Parse a list such as `["dashboard", "all"]` into requested entries.
pub fn requested<I, S>(entries: I) -> Vec<RequestedExtension>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| RequestedExtension::from(entry.as_ref()))
        .collect()
}
