//! Extension discovery and load-order resolution for Trusty CMS.
//!
//! Extensions come from two places: subdirectories of the extension search
//! paths (vendored extensions) and installed packages named
//! `trusty-<name>-extension` (packaged extensions). This crate finds them,
//! expands the configured load order (where `all` stands for every extension
//! not named explicitly), removes ignored extensions, and records where each
//! extension lives so it can be activated later.
//!
//! ```no_run
//! use trusty_extensions::{Configuration, Roots, SettingsLoader};
//!
//! # fn main() -> trusty_extensions::Result<()> {
//! let loader = SettingsLoader::new(Roots::new("/srv/site", "/opt/trusty"));
//! let config = Configuration::new(loader.load()?);
//!
//! for name in config.enabled_extensions()? {
//!     println!("{name} from {:?}", config.root_of(name.as_str())?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod configuration;
pub mod convention;
pub mod discovery;
pub mod error;
pub mod location;
pub mod logging;
pub mod name;
pub mod package;
pub mod paths;
pub mod request;
pub mod resolver;
pub mod settings;

pub use config::{SettingsFile, SettingsLoader};
pub use configuration::Configuration;
pub use convention::{ConventionMatcher, PackageConvention};
pub use discovery::Discovery;
pub use error::{Error, Result};
pub use location::{ExtensionLocation, ExtensionLocations, SourceKind};
pub use name::{ExtensionName, canonical_name};
pub use package::{InstalledPackage, PackageDirectory, PackageSource};
pub use paths::{Roots, default_extension_paths, is_test_environment};
pub use request::{RequestedExtension, WILDCARD, requested};
pub use settings::{ExtensionSettings, ResolvedExtensions};
