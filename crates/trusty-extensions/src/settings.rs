//! Extension settings and their resolution.
//!
//! [`ExtensionSettings`] is the mutable build phase: search paths, installed
//! packages, the requested load order and the ignore list. Calling
//! [`ExtensionSettings::resolve`] scans once and produces an immutable
//! [`ResolvedExtensions`]; changing the settings afterwards does not affect
//! a value already resolved.

use trusty_fs::NormalizedPath;

use crate::convention::PackageConvention;
use crate::discovery::Discovery;
use crate::error::Result;
use crate::location::{ExtensionLocation, ExtensionLocations};
use crate::name::ExtensionName;
use crate::package::{InstalledPackage, PackageSource};
use crate::request::RequestedExtension;
use crate::resolver::{apply_ignores, expand};

/// Everything that determines which extensions are enabled.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSettings {
    extension_paths: Vec<NormalizedPath>,
    packages: Vec<InstalledPackage>,
    convention: PackageConvention,
    requested: Option<Vec<RequestedExtension>>,
    ignored: Vec<ExtensionName>,
}

impl ExtensionSettings {
    /// Settings that search `extension_paths`, with no packages, no explicit
    /// load order and nothing ignored.
    pub fn new(extension_paths: Vec<NormalizedPath>) -> Self {
        Self {
            extension_paths,
            ..Self::default()
        }
    }

    /// Directories whose subdirectories are vendored extensions.
    pub fn extension_paths(&self) -> &[NormalizedPath] {
        &self.extension_paths
    }

    pub fn set_extension_paths(&mut self, paths: Vec<NormalizedPath>) {
        self.extension_paths = paths;
    }

    /// Installed packages considered during discovery, in enumeration order.
    pub fn packages(&self) -> &[InstalledPackage] {
        &self.packages
    }

    pub fn add_package(&mut self, package: InstalledPackage) {
        self.packages.push(package);
    }

    /// Append every package enumerated by `source`.
    pub fn add_packages_from(&mut self, source: &dyn PackageSource) -> Result<()> {
        let packages = source.packages()?;
        tracing::debug!(count = packages.len(), "Adding installed packages");
        self.packages.extend(packages);
        Ok(())
    }

    pub fn convention(&self) -> &PackageConvention {
        &self.convention
    }

    pub fn set_convention(&mut self, convention: PackageConvention) {
        self.convention = convention;
    }

    /// Set the load order. It may contain the wildcard; an empty list
    /// enables nothing.
    ///
    /// ```
    /// use trusty_extensions::{ExtensionSettings, requested};
    ///
    /// let mut settings = ExtensionSettings::default();
    /// settings.set_extensions(requested(["dashboard", "blog", "all", "comments"]));
    /// ```
    pub fn set_extensions(&mut self, requested: Vec<RequestedExtension>) {
        self.requested = Some(requested);
    }

    /// The load order set with [`set_extensions`](Self::set_extensions), or
    /// `None` when every available extension should load alphabetically.
    pub fn extensions(&self) -> Option<&[RequestedExtension]> {
        self.requested.as_deref()
    }

    /// Add names to the ignore list. Names already ignored are not repeated.
    pub fn ignore_extensions<I, N>(&mut self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<ExtensionName>,
    {
        for name in names {
            let name = name.into();
            if !self.ignored.contains(&name) {
                self.ignored.push(name);
            }
        }
    }

    /// Ignored names, in the order they were first added.
    pub fn ignored_extensions(&self) -> &[ExtensionName] {
        &self.ignored
    }

    /// Scan search paths and packages.
    pub fn discover(&self) -> Result<Discovery> {
        let matcher = self.convention.matcher()?;
        Discovery::scan(&self.extension_paths, &self.packages, &matcher)
    }

    /// The requested load order expanded against `available`, before
    /// ignores are applied.
    pub fn expand(&self, available: &[ExtensionName]) -> Result<Vec<ExtensionName>> {
        match &self.requested {
            Some(requested) => expand(requested, available),
            None => Ok(available.to_vec()),
        }
    }

    /// Discover and resolve in one step.
    pub fn resolve(&self) -> Result<ResolvedExtensions> {
        let discovery = self.discover()?;
        self.resolve_with(discovery)
    }

    /// Resolve against an existing discovery result.
    pub fn resolve_with(&self, discovery: Discovery) -> Result<ResolvedExtensions> {
        let expanded = self.expand(discovery.available())?;
        let enabled = apply_ignores(&expanded, &self.ignored);
        tracing::info!(
            enabled = ?enabled.iter().map(ExtensionName::as_str).collect::<Vec<_>>(),
            "Resolved enabled extensions"
        );

        let (available, locations) = discovery.into_parts();
        Ok(ResolvedExtensions::from_parts(
            available,
            expanded,
            enabled,
            self.ignored.clone(),
            locations,
        ))
    }
}

/// The frozen result of resolving [`ExtensionSettings`].
#[derive(Debug, Clone)]
pub struct ResolvedExtensions {
    available: Vec<ExtensionName>,
    expanded: Vec<ExtensionName>,
    enabled: Vec<ExtensionName>,
    ignored: Vec<ExtensionName>,
    locations: ExtensionLocations,
}

impl ResolvedExtensions {
    pub(crate) fn from_parts(
        available: Vec<ExtensionName>,
        expanded: Vec<ExtensionName>,
        enabled: Vec<ExtensionName>,
        ignored: Vec<ExtensionName>,
        locations: ExtensionLocations,
    ) -> Self {
        Self {
            available,
            expanded,
            enabled,
            ignored,
            locations,
        }
    }

    /// Extensions to activate, in load order.
    pub fn enabled_extensions(&self) -> &[ExtensionName] {
        &self.enabled
    }

    /// The load order before ignored extensions were removed.
    pub fn expanded_extension_list(&self) -> &[ExtensionName] {
        &self.expanded
    }

    /// Every discovered extension, sorted.
    pub fn available_extensions(&self) -> &[ExtensionName] {
        &self.available
    }

    pub fn ignored_extensions(&self) -> &[ExtensionName] {
        &self.ignored
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|enabled| enabled.as_str() == name)
    }

    pub fn locations(&self) -> &ExtensionLocations {
        &self.locations
    }

    /// Root directory of `name`, if it was discovered.
    pub fn root_of(&self, name: &str) -> Option<&NormalizedPath> {
        self.locations.root_of(name)
    }

    /// Enabled extensions paired with the location each is activated from.
    pub fn enabled_locations(&self) -> impl Iterator<Item = &ExtensionLocation> + '_ {
        self.enabled
            .iter()
            .filter_map(|name| self.locations.get(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::request::requested;
    use std::fs;
    use tempfile::TempDir;

    fn vendor_with(names: &[&str]) -> (TempDir, NormalizedPath) {
        let tmp = TempDir::new().unwrap();
        let vendor = tmp.path().join("vendor/extensions");
        for name in names {
            fs::create_dir_all(vendor.join(name)).unwrap();
        }
        (tmp, NormalizedPath::new(vendor))
    }

    fn as_strs(names: &[ExtensionName]) -> Vec<&str> {
        names.iter().map(ExtensionName::as_str).collect()
    }

    #[test]
    fn test_default_enables_everything_alphabetically() {
        let (_tmp, vendor) = vendor_with(&["b", "a"]);
        let settings = ExtensionSettings::new(vec![vendor]);

        assert!(settings.extensions().is_none());
        let resolved = settings.resolve().unwrap();
        assert_eq!(as_strs(resolved.enabled_extensions()), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_load_order_enables_nothing() {
        let (_tmp, vendor) = vendor_with(&["a", "b"]);
        let mut settings = ExtensionSettings::new(vec![vendor]);
        settings.set_extensions(Vec::new());

        let resolved = settings.resolve().unwrap();
        assert!(resolved.enabled_extensions().is_empty());
        assert_eq!(resolved.available_extensions().len(), 2);
    }

    #[test]
    fn test_ignore_is_a_union() {
        let mut settings = ExtensionSettings::default();
        settings.ignore_extensions(["experimental", "broken"]);
        settings.ignore_extensions(["broken", "legacy"]);
        assert_eq!(
            as_strs(settings.ignored_extensions()),
            vec!["experimental", "broken", "legacy"]
        );
    }

    #[test]
    fn test_resolution_is_frozen() {
        let (_tmp, vendor) = vendor_with(&["blog", "comments"]);
        let mut settings = ExtensionSettings::new(vec![vendor]);
        let resolved = settings.resolve().unwrap();

        settings.ignore_extensions(["blog"]);
        assert_eq!(as_strs(resolved.enabled_extensions()), vec!["blog", "comments"]);
        assert!(resolved.is_enabled("blog"));
    }

    #[test]
    fn test_missing_extension_fails_resolution() {
        let (_tmp, vendor) = vendor_with(&["a"]);
        let mut settings = ExtensionSettings::new(vec![vendor]);
        settings.set_extensions(requested(["a", "x"]));

        let err = settings.resolve().unwrap_err();
        assert!(matches!(err, Error::MissingExtensions { .. }), "got: {err:?}");
        assert_eq!(as_strs(err.missing_names()), vec!["x"]);
    }

    #[test]
    fn test_enabled_locations_follow_load_order() {
        let (_tmp, vendor) = vendor_with(&["blog", "dashboard"]);
        let mut settings = ExtensionSettings::new(vec![vendor.clone()]);
        settings.set_extensions(requested(["dashboard", "all"]));

        let resolved = settings.resolve().unwrap();
        let roots: Vec<_> = resolved.enabled_locations().map(|l| l.root.clone()).collect();
        assert_eq!(roots, vec![vendor.join("dashboard"), vendor.join("blog")]);
    }
}
