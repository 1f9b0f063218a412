//! Discovery of available extensions.
//!
//! Two kinds of candidate are scanned, in this order:
//!
//! 1. vendored extensions: every non-hidden subdirectory of every search
//!    path, search paths taken in configured order;
//! 2. packaged extensions: every installed package whose name follows the
//!    [`PackageConvention`](crate::PackageConvention), in enumeration order.
//!
//! Each candidate's root is recorded in [`ExtensionLocations`], so a package
//! sharing its name with a vendored directory is the location later used.

use std::collections::BTreeSet;

use trusty_fs::{NormalizedPath, list_subdirectories};

use crate::convention::ConventionMatcher;
use crate::error::Result;
use crate::location::{ExtensionLocation, ExtensionLocations, SourceKind};
use crate::name::ExtensionName;
use crate::package::InstalledPackage;

/// The outcome of scanning search paths and installed packages.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    available: Vec<ExtensionName>,
    locations: ExtensionLocations,
}

impl Discovery {
    /// Scan `extension_paths` and `packages` for extensions.
    pub fn scan(
        extension_paths: &[NormalizedPath],
        packages: &[InstalledPackage],
        convention: &ConventionMatcher,
    ) -> Result<Self> {
        let mut locations = ExtensionLocations::new();
        let mut found = BTreeSet::new();

        for name in vendored_extensions(extension_paths, convention, &mut locations)? {
            found.insert(name);
        }
        for name in packaged_extensions(packages, convention, &mut locations) {
            found.insert(name);
        }

        let available: Vec<ExtensionName> = found.into_iter().collect();
        tracing::debug!(count = available.len(), "Discovered available extensions");
        Ok(Self {
            available,
            locations,
        })
    }

    /// Every discovered extension name, sorted and deduplicated.
    pub fn available(&self) -> &[ExtensionName] {
        &self.available
    }

    pub fn locations(&self) -> &ExtensionLocations {
        &self.locations
    }

    pub fn into_parts(self) -> (Vec<ExtensionName>, ExtensionLocations) {
        (self.available, self.locations)
    }
}

/// Names of the subdirectories of every search path, in scan order.
pub fn vendored_extensions(
    extension_paths: &[NormalizedPath],
    convention: &ConventionMatcher,
    locations: &mut ExtensionLocations,
) -> Result<Vec<ExtensionName>> {
    let mut found = Vec::new();
    for search_path in extension_paths {
        for root in list_subdirectories(search_path)? {
            let Some(basename) = root.file_name() else {
                continue;
            };
            let name = convention.directory_extension(basename);
            if name.as_str().is_empty() {
                tracing::debug!(path = %root, "Skipping directory with no usable extension name");
                continue;
            }
            tracing::debug!(extension = %name, path = %root, "Found vendored extension");
            found.push(locations.record(ExtensionLocation {
                name,
                root,
                kind: SourceKind::Vendored,
            }));
        }
    }
    Ok(found)
}

/// Names of the installed packages that follow the naming convention.
pub fn packaged_extensions(
    packages: &[InstalledPackage],
    convention: &ConventionMatcher,
    locations: &mut ExtensionLocations,
) -> Vec<ExtensionName> {
    let mut found = Vec::new();
    for package in packages {
        let Some(name) = convention.package_extension(&package.name) else {
            continue;
        };
        tracing::debug!(
            extension = %name,
            package = %package.name,
            path = %package.path,
            "Found packaged extension"
        );
        found.push(locations.record(ExtensionLocation {
            name,
            root: package.path.clone(),
            kind: SourceKind::Packaged,
        }));
    }
    found
}
