//! Lazily resolving extension configuration.
//!
//! [`Configuration`] wraps [`ExtensionSettings`] with accessors that compute
//! on first use and then keep their answer for the lifetime of the object:
//!
//! - [`available_extensions`](Configuration::available_extensions) scans once;
//! - [`expanded_extension_list`](Configuration::expanded_extension_list)
//!   expands the load order once;
//! - [`enabled_extensions`](Configuration::enabled_extensions) applies the
//!   ignore list once.
//!
//! Settings changed after the corresponding value was computed are recorded
//! but do not change it; a warning is logged when that happens. Each cache is
//! a [`OnceCell`]: when threads share a configuration, the first caller
//! computes a value while the others block on it. A failed computation is
//! not stored, so the next caller tries again.

use once_cell::sync::OnceCell;

use trusty_fs::NormalizedPath;

use crate::discovery::Discovery;
use crate::error::{Error, Result};
use crate::location::ExtensionLocations;
use crate::name::ExtensionName;
use crate::request::RequestedExtension;
use crate::resolver::apply_ignores;
use crate::settings::{ExtensionSettings, ResolvedExtensions};

/// Extension configuration owned by one application instance.
#[derive(Debug, Default)]
pub struct Configuration {
    settings: ExtensionSettings,
    discovery: OnceCell<Discovery>,
    expanded: OnceCell<Vec<ExtensionName>>,
    enabled: OnceCell<Vec<ExtensionName>>,
}

impl Configuration {
    pub fn new(settings: ExtensionSettings) -> Self {
        Self {
            settings,
            discovery: OnceCell::new(),
            expanded: OnceCell::new(),
            enabled: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> &ExtensionSettings {
        &self.settings
    }

    pub fn extension_paths(&self) -> &[NormalizedPath] {
        self.settings.extension_paths()
    }

    /// Replace the search paths. Has no effect once extensions have been
    /// discovered.
    pub fn set_extension_paths(&mut self, paths: Vec<NormalizedPath>) {
        if self.discovery.get().is_some() {
            tracing::warn!("Extension paths changed after discovery; the change is ignored");
        }
        self.settings.set_extension_paths(paths);
    }

    /// Set the load order. Has no effect once the load order has been
    /// expanded.
    pub fn set_extensions(&mut self, requested: Vec<RequestedExtension>) {
        if self.expanded.get().is_some() {
            tracing::warn!("Extension load order changed after expansion; the change is ignored");
        }
        self.settings.set_extensions(requested);
    }

    /// The requested load order, or every available extension when none
    /// was set.
    pub fn extensions(&self) -> Result<Vec<RequestedExtension>> {
        match self.settings.extensions() {
            Some(requested) => Ok(requested.to_vec()),
            None => Ok(self
                .available_extensions()?
                .iter()
                .cloned()
                .map(RequestedExtension::Named)
                .collect()),
        }
    }

    /// Add names to the ignore list. Has no effect once the enabled list
    /// has been computed.
    pub fn ignore_extensions<I, N>(&mut self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<ExtensionName>,
    {
        if self.enabled.get().is_some() {
            tracing::warn!("Extensions ignored after the enabled list was computed; the change is ignored");
        }
        self.settings.ignore_extensions(names);
    }

    pub fn ignored_extensions(&self) -> &[ExtensionName] {
        self.settings.ignored_extensions()
    }

    fn discovery(&self) -> Result<&Discovery> {
        self.discovery.get_or_try_init(|| self.settings.discover())
    }

    /// Every extension found in the search paths and installed packages,
    /// sorted.
    pub fn available_extensions(&self) -> Result<&[ExtensionName]> {
        Ok(self.discovery()?.available())
    }

    /// Where each discovered extension lives.
    pub fn locations(&self) -> Result<&ExtensionLocations> {
        Ok(self.discovery()?.locations())
    }

    /// Root directory of `name`, if it was discovered.
    pub fn root_of(&self, name: &str) -> Result<Option<&NormalizedPath>> {
        Ok(self.locations()?.root_of(name))
    }

    /// The load order with the wildcard expanded, before ignores.
    pub fn expanded_extension_list(&self) -> Result<&[ExtensionName]> {
        self.expanded
            .get_or_try_init(|| self.settings.expand(self.available_extensions()?))
            .map(Vec::as_slice)
    }

    /// The extensions to activate, in load order.
    pub fn enabled_extensions(&self) -> Result<&[ExtensionName]> {
        self.enabled
            .get_or_try_init(|| {
                let enabled = apply_ignores(
                    self.expanded_extension_list()?,
                    self.settings.ignored_extensions(),
                );
                tracing::info!(
                    enabled = ?enabled.iter().map(ExtensionName::as_str).collect::<Vec<_>>(),
                    "Resolved enabled extensions"
                );
                Ok::<_, Error>(enabled)
            })
            .map(Vec::as_slice)
    }

    /// Resolve (if not done already) and consume the configuration,
    /// returning the frozen result.
    pub fn into_resolved(self) -> Result<ResolvedExtensions> {
        self.enabled_extensions()?;
        let Self {
            settings,
            discovery,
            expanded,
            enabled,
        } = self;
        let discovery = match discovery.into_inner() {
            Some(discovery) => discovery,
            None => settings.discover()?,
        };
        let (available, locations) = discovery.into_parts();
        Ok(ResolvedExtensions::from_parts(
            available,
            expanded.into_inner().unwrap_or_default(),
            enabled.into_inner().unwrap_or_default(),
            settings.ignored_extensions().to_vec(),
            locations,
        ))
    }
}

impl From<ExtensionSettings> for Configuration {
    fn from(settings: ExtensionSettings) -> Self {
        Self::new(settings)
    }
}
