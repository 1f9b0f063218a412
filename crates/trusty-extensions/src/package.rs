//! Installed packages that may provide extensions.

use std::collections::BTreeMap;

use semver::Version;
use trusty_fs::{NormalizedPath, list_subdirectories};

use crate::error::Result;

/// An installed package: its declared name and install directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub path: NormalizedPath,
}

impl InstalledPackage {
    pub fn new(name: impl Into<String>, path: impl Into<NormalizedPath>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Anything that can enumerate installed packages.
///
/// Enumeration order matters: when two packages map to the same extension,
/// the later one wins location lookup.
pub trait PackageSource {
    fn packages(&self) -> Result<Vec<InstalledPackage>>;
}

impl PackageSource for [InstalledPackage] {
    fn packages(&self) -> Result<Vec<InstalledPackage>> {
        Ok(self.to_vec())
    }
}

impl PackageSource for Vec<InstalledPackage> {
    fn packages(&self) -> Result<Vec<InstalledPackage>> {
        Ok(self.clone())
    }
}

/// A directory of unpacked packages named `<package>-<version>`, like a
/// gem or crate cache.
#[derive(Debug, Clone)]
pub struct PackageDirectory {
    dir: NormalizedPath,
}

impl PackageDirectory {
    pub fn new(dir: impl Into<NormalizedPath>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &NormalizedPath {
        &self.dir
    }
}

impl PackageSource for PackageDirectory {
    /// Packages sorted by name. Only the highest installed version of each
    /// package is reported.
    fn packages(&self) -> Result<Vec<InstalledPackage>> {
        let mut newest: BTreeMap<String, (Version, NormalizedPath)> = BTreeMap::new();

        for path in list_subdirectories(&self.dir)? {
            let Some(dirname) = path.file_name() else {
                continue;
            };
            let Some((name, version)) = split_versioned(dirname) else {
                tracing::debug!(path = %path, "Skipping unversioned package directory");
                continue;
            };
            match newest.get(name) {
                Some((current, _)) if *current >= version => {}
                _ => {
                    newest.insert(name.to_string(), (version, path.clone()));
                }
            }
        }

        Ok(newest
            .into_iter()
            .map(|(name, (_, path))| InstalledPackage { name, path })
            .collect())
    }
}

/// Split `trusty-blog-extension-1.2.0` into `("trusty-blog-extension", 1.2.0)`.
///
/// Pre-release versions contain dashes themselves, so every dash is tried
/// from the right until the remainder parses.
fn split_versioned(dirname: &str) -> Option<(&str, Version)> {
    dirname
        .rmatch_indices('-')
        .filter(|&(idx, _)| idx > 0)
        .find_map(|(idx, _)| {
            Version::parse(&dirname[idx + 1..])
                .ok()
                .map(|version| (&dirname[..idx], version))
        })
}
