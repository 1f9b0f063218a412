//! Package naming convention: `<prefix><name><suffix>`, e.g.
//! `trusty-page-attachments-extension`.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::name::ExtensionName;

pub const DEFAULT_PREFIX: &str = "trusty-";
pub const DEFAULT_SUFFIX: &str = "-extension";

/// The naming convention that marks an installed package as an extension.
///
/// Stored in settings as the `[convention]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PackageConvention {
    pub prefix: String,
    pub suffix: String,
}

impl Default for PackageConvention {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl PackageConvention {
    /// Compile the convention into a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConvention`] when both prefix and suffix are
    /// empty, since every package would then count as an extension.
    pub fn matcher(&self) -> Result<ConventionMatcher> {
        if self.prefix.is_empty() && self.suffix.is_empty() {
            return Err(Error::InvalidConvention {
                reason: "prefix and suffix cannot both be empty".to_string(),
            });
        }
        let pattern = format!(
            "^{}(?P<name>.+){}$",
            regex::escape(&self.prefix),
            regex::escape(&self.suffix)
        );
        Ok(ConventionMatcher {
            pattern: Regex::new(&pattern)?,
        })
    }
}

/// Compiled form of a [`PackageConvention`].
#[derive(Debug, Clone)]
pub struct ConventionMatcher {
    pattern: Regex,
}

impl ConventionMatcher {
    /// The middle segment of `package` if it follows the convention.
    pub fn extract<'a>(&self, package: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(package)
            .and_then(|caps| caps.name("name"))
            .map(|m| m.as_str())
    }

    /// Extension name for a package, or `None` if it is not an extension.
    pub fn package_extension(&self, package: &str) -> Option<ExtensionName> {
        self.extract(package)
            .map(ExtensionName::canonical)
            .filter(|name| !name.as_str().is_empty())
    }

    /// Extension name for a vendored directory.
    ///
    /// A checkout that kept its package name (`vendor/extensions/trusty-blog-extension`)
    /// is named like the package; any other basename is used as is.
    pub fn directory_extension(&self, basename: &str) -> ExtensionName {
        let raw = self.extract(basename).unwrap_or(basename);
        ExtensionName::canonical(raw)
    }
}
