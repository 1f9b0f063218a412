//! Installation roots and default extension search paths.

use std::sync::LazyLock;

use regex::Regex;
use trusty_fs::{NormalizedPath, same_location};

/// Environment names that also search the extension test fixtures.
static TEST_ENVIRONMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("test|cucumber").expect("test environment pattern is valid"));

/// The two roots an application runs from.
///
/// `app_root` is the site instance (configuration, site-specific vendored
/// extensions). `install_root` is where the CMS itself is installed. For a
/// checkout that is run in place both are the same directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub app_root: NormalizedPath,
    pub install_root: NormalizedPath,
}

impl Roots {
    pub fn new(app_root: impl Into<NormalizedPath>, install_root: impl Into<NormalizedPath>) -> Self {
        Self {
            app_root: app_root.into(),
            install_root: install_root.into(),
        }
    }

    /// Roots for an application run from the installation directory.
    pub fn single(root: impl Into<NormalizedPath>) -> Self {
        let root = root.into();
        Self {
            app_root: root.clone(),
            install_root: root,
        }
    }

    /// Whether the application root is the installation root.
    pub fn is_single(&self) -> bool {
        same_location(&self.app_root, &self.install_root)
    }
}

/// Whether `environment` counts as a test environment.
pub fn is_test_environment(environment: &str) -> bool {
    TEST_ENVIRONMENT.is_match(environment)
}

/// The search paths used when none are configured, in scan order:
///
/// 1. `<install_root>/test/fixtures/extensions`, in test environments only
/// 2. `<install_root>/vendor/extensions`, unless the roots coincide
/// 3. `<app_root>/vendor/extensions`
pub fn default_extension_paths(roots: &Roots, environment: &str) -> Vec<NormalizedPath> {
    let mut paths = Vec::with_capacity(3);
    if is_test_environment(environment) {
        paths.push(roots.install_root.join("test/fixtures/extensions"));
    }
    if !roots.is_single() {
        paths.push(roots.install_root.join("vendor/extensions"));
    }
    paths.push(roots.app_root.join("vendor/extensions"));
    paths
}
