//! Extension names and their canonical form.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an extension, e.g. `page_attachments`.
///
/// Names compare case-sensitively and exactly. Discovery produces names in
/// canonical form (see [`canonical_name`]); names written in settings files
/// are taken as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionName(String);

impl ExtensionName {
    /// Wrap `name` without any normalization.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Build a name from a directory basename or package segment.
    pub fn canonical(raw: &str) -> Self {
        Self(canonical_name(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExtensionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ExtensionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExtensionName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ExtensionName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Convert a directory or package name to lowercase words joined by `_`.
///
/// Camel-case boundaries start a new word, and any run of non-alphanumeric
/// characters becomes a single separator:
///
/// ```
/// use trusty_extensions::canonical_name;
///
/// assert_eq!(canonical_name("PageAttachments"), "page_attachments");
/// assert_eq!(canonical_name("page-attachments"), "page_attachments");
/// assert_eq!(canonical_name("HTMLSnippets"), "html_snippets");
/// ```
pub fn canonical_name(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() && !out.is_empty() && !out.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Join names the way an English list reads: `a`, `a and b`, `a, b and c`.
pub(crate) fn to_sentence(names: &[ExtensionName]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(ExtensionName::as_str).collect();
            format!("{} and {}", head.join(", "), last)
        }
    }
}
