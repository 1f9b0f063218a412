//! Extension root locations recorded during discovery.

use std::collections::HashMap;
use std::fmt;

use trusty_fs::NormalizedPath;

use crate::name::ExtensionName;

/// Where a discovered extension came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A subdirectory of one of the extension search paths.
    Vendored,
    /// An installed package following the naming convention.
    Packaged,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Vendored => write!(f, "vendored"),
            SourceKind::Packaged => write!(f, "packaged"),
        }
    }
}

/// The root directory of one discovered extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionLocation {
    pub name: ExtensionName,
    pub root: NormalizedPath,
    pub kind: SourceKind,
}

/// Every location recorded during discovery, keyed by extension name.
///
/// A name may be recorded more than once, for instance when an extension is
/// both vendored and installed as a package. All records are kept, and
/// lookups return the one recorded last.
#[derive(Debug, Clone, Default)]
pub struct ExtensionLocations {
    entries: HashMap<ExtensionName, Vec<ExtensionLocation>>,
}

impl ExtensionLocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a location. Returns the extension name for convenience.
    pub fn record(&mut self, location: ExtensionLocation) -> ExtensionName {
        let name = location.name.clone();
        let records = self.entries.entry(name.clone()).or_default();
        if let Some(previous) = records.last() {
            tracing::warn!(
                extension = %name,
                previous = %previous.root,
                previous_kind = %previous.kind,
                replacement = %location.root,
                replacement_kind = %location.kind,
                "Extension found in more than one location; using the later one"
            );
        }
        records.push(location);
        name
    }

    /// The location used for `name`: the last one recorded.
    pub fn get(&self, name: &str) -> Option<&ExtensionLocation> {
        self.entries.get(name).and_then(|records| records.last())
    }

    /// Root directory of `name`, if it was discovered.
    pub fn root_of(&self, name: &str) -> Option<&NormalizedPath> {
        self.get(name).map(|location| &location.root)
    }

    /// All locations recorded for `name`, in discovery order.
    pub fn all(&self, name: &str) -> &[ExtensionLocation] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Names with at least one recorded location (sorted).
    pub fn names(&self) -> Vec<ExtensionName> {
        let mut names: Vec<ExtensionName> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether `name` has been recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct extension names recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
