//! Extension settings files.
//!
//! Settings are read from the application root in two layers:
//!
//! 1. `config/extensions.toml`, checked in with the site;
//! 2. `config/extensions.local.toml`, an optional machine-local overlay.
//!
//! ```toml
//! environment = "production"
//! load = ["dashboard", "all"]
//! ignore = ["layouts"]
//! packages_dir = "vendor/packages"
//!
//! [convention]
//! prefix = "trusty-"
//! suffix = "-extension"
//!
//! [[packages]]
//! name = "trusty-blog-extension"
//! path = "/opt/gems/trusty-blog-extension-1.0.0"
//! ```
//!
//! Every key is optional. Without `paths` the search paths default to
//! [`default_extension_paths`]; without `load` every available extension is
//! enabled.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trusty_fs::{NormalizedPath, read_text_if_exists};

use crate::convention::PackageConvention;
use crate::error::{Error, Result};
use crate::name::ExtensionName;
use crate::package::{InstalledPackage, PackageDirectory};
use crate::paths::{Roots, default_extension_paths};
use crate::request::RequestedExtension;
use crate::settings::ExtensionSettings;

/// Settings file relative to the application root.
pub const SETTINGS_FILE: &str = "config/extensions.toml";
/// Local overlay relative to the application root.
pub const LOCAL_SETTINGS_FILE: &str = "config/extensions.local.toml";
/// Environment variable overriding the configured environment name.
pub const ENVIRONMENT_VAR: &str = "TRUSTY_ENV";
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// One `[[packages]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageEntry {
    pub name: String,
    pub path: String,
}

/// The contents of one settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    /// Environment name, e.g. `production` or `test`.
    pub environment: Option<String>,
    /// Requested load order, possibly containing `all`.
    pub load: Option<Vec<RequestedExtension>>,
    /// Extensions never enabled.
    pub ignore: Vec<ExtensionName>,
    /// Extension search paths, relative paths taken from the app root.
    pub paths: Option<Vec<String>>,
    /// Directory of installed `<package>-<version>` directories.
    pub packages_dir: Option<String>,
    pub convention: Option<PackageConvention>,
    pub packages: Vec<PackageEntry>,
}

impl SettingsFile {
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read `path`, returning `None` when the file does not exist.
    pub fn load(path: &NormalizedPath) -> Result<Option<Self>> {
        let Some(content) = read_text_if_exists(path)? else {
            return Ok(None);
        };
        Self::parse(&content)
            .map(Some)
            .map_err(|e| Error::SettingsParse {
                path: path.to_native(),
                message: e.message().to_string(),
            })
    }

    /// Overlay `other` onto `self`.
    ///
    /// Values set in `other` replace those in `self`, except `ignore`, which
    /// is unioned, and `packages`, which are appended.
    pub fn merge(&mut self, other: &SettingsFile) {
        if other.environment.is_some() {
            self.environment.clone_from(&other.environment);
        }
        if other.load.is_some() {
            self.load.clone_from(&other.load);
        }
        for name in &other.ignore {
            if !self.ignore.contains(name) {
                self.ignore.push(name.clone());
            }
        }
        if other.paths.is_some() {
            self.paths.clone_from(&other.paths);
        }
        if other.packages_dir.is_some() {
            self.packages_dir.clone_from(&other.packages_dir);
        }
        if other.convention.is_some() {
            self.convention.clone_from(&other.convention);
        }
        self.packages.extend(other.packages.iter().cloned());
    }
}

/// Builds [`ExtensionSettings`] from the settings files under an app root.
pub struct SettingsLoader {
    roots: Roots,
    environment_override: Option<String>,
}

impl SettingsLoader {
    /// Create a loader for `roots`, honouring `TRUSTY_ENV` when set.
    pub fn new(roots: Roots) -> Self {
        let environment_override = std::env::var(ENVIRONMENT_VAR)
            .ok()
            .filter(|env| !env.is_empty());
        Self {
            roots,
            environment_override,
        }
    }

    /// Create a loader with an explicit environment, ignoring `TRUSTY_ENV`.
    ///
    /// Mostly useful in tests, which cannot safely mutate process
    /// environment variables.
    pub fn with_environment(roots: Roots, environment: impl Into<String>) -> Self {
        Self {
            roots,
            environment_override: Some(environment.into()),
        }
    }

    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    /// Read and merge both settings layers. Missing files count as empty.
    pub fn read(&self) -> Result<SettingsFile> {
        let mut merged = SettingsFile::default();

        let base_path = self.roots.app_root.join(SETTINGS_FILE);
        match SettingsFile::load(&base_path)? {
            Some(base) => {
                tracing::debug!(path = %base_path, "Loaded extension settings");
                merged.merge(&base);
            }
            None => {
                tracing::debug!(path = %base_path, "No extension settings found, using defaults");
            }
        }

        let local_path = self.roots.app_root.join(LOCAL_SETTINGS_FILE);
        if let Some(local) = SettingsFile::load(&local_path)? {
            tracing::debug!(path = %local_path, "Loaded local extension settings");
            merged.merge(&local);
        }

        Ok(merged)
    }

    /// The environment name: the override, else the settings value, else
    /// `development`.
    pub fn environment(&self, file: &SettingsFile) -> String {
        self.environment_override
            .clone()
            .or_else(|| file.environment.clone())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    /// Read the settings files and turn them into [`ExtensionSettings`].
    pub fn load(&self) -> Result<ExtensionSettings> {
        let file = self.read()?;
        self.build(&file)
    }

    /// Turn an already read [`SettingsFile`] into [`ExtensionSettings`].
    pub fn build(&self, file: &SettingsFile) -> Result<ExtensionSettings> {
        let environment = self.environment(file);
        let paths: Vec<NormalizedPath> = match &file.paths {
            Some(paths) => paths.iter().map(|p| self.resolve_path(p)).collect(),
            None => default_extension_paths(&self.roots, &environment),
        };
        tracing::info!(
            environment = %environment,
            paths = ?paths.iter().map(NormalizedPath::as_str).collect::<Vec<_>>(),
            "Configuring extensions"
        );

        let mut settings = ExtensionSettings::new(paths);
        if let Some(convention) = &file.convention {
            settings.set_convention(convention.clone());
        }
        for entry in &file.packages {
            settings.add_package(InstalledPackage::new(
                entry.name.clone(),
                self.resolve_path(&entry.path),
            ));
        }
        if let Some(dir) = &file.packages_dir {
            settings.add_packages_from(&PackageDirectory::new(self.resolve_path(dir)))?;
        }
        if let Some(load) = &file.load {
            settings.set_extensions(load.clone());
        }
        settings.ignore_extensions(file.ignore.iter().cloned());
        Ok(settings)
    }

    /// Absolute paths are kept; relative ones are taken from the app root.
    fn resolve_path(&self, path: &str) -> NormalizedPath {
        if Path::new(path).is_absolute() || path.starts_with('/') {
            NormalizedPath::new(path)
        } else {
            self.roots.app_root.join(path)
        }
    }
}
