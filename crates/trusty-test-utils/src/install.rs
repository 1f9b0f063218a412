//! [`TestInstall`] builder for extension discovery scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary application with a separate installation root.
///
/// Layout:
///
/// ```text
/// <tmp>/site/                       app root
///   config/extensions.toml
///   vendor/extensions/<name>/
/// <tmp>/trusty/                     install root
///   vendor/extensions/<name>/
///   test/fixtures/extensions/<name>/
/// <tmp>/packages/<package>-<version>/
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use trusty_test_utils::install::TestInstall;
///
/// let install = TestInstall::new();
/// install.vendor_extension("blog");
/// install.install_package("trusty-comments-extension", "1.0.0");
/// install.write_settings(r#"load = ["blog", "all"]"#);
/// ```
pub struct TestInstall {
    temp_dir: TempDir,
}

impl Default for TestInstall {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInstall {
    /// Create the app and install roots, both empty.
    pub fn new() -> Self {
        let install = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(install.app_root()).unwrap();
        fs::create_dir_all(install.install_root()).unwrap();
        install
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn app_root(&self) -> PathBuf {
        self.root().join("site")
    }

    pub fn install_root(&self) -> PathBuf {
        self.root().join("trusty")
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.root().join("packages")
    }

    /// Create `<app_root>/vendor/extensions/<dir_name>` and return it.
    pub fn vendor_extension(&self, dir_name: &str) -> PathBuf {
        make_extension_dir(&self.app_root().join("vendor/extensions").join(dir_name))
    }

    /// Create `<install_root>/vendor/extensions/<dir_name>` and return it.
    pub fn core_extension(&self, dir_name: &str) -> PathBuf {
        make_extension_dir(&self.install_root().join("vendor/extensions").join(dir_name))
    }

    /// Create `<install_root>/test/fixtures/extensions/<dir_name>` and return it.
    pub fn fixture_extension(&self, dir_name: &str) -> PathBuf {
        make_extension_dir(
            &self
                .install_root()
                .join("test/fixtures/extensions")
                .join(dir_name),
        )
    }

    /// Create `<packages>/<package>-<version>` and return it.
    pub fn install_package(&self, package: &str, version: &str) -> PathBuf {
        make_extension_dir(&self.packages_dir().join(format!("{package}-{version}")))
    }

    /// Write `config/extensions.toml` under the app root.
    pub fn write_settings(&self, content: &str) {
        self.write_app_file("config/extensions.toml", content);
    }

    /// Write `config/extensions.local.toml` under the app root.
    pub fn write_local_settings(&self, content: &str) {
        self.write_app_file("config/extensions.local.toml", content);
    }

    /// Write a file relative to the app root, creating parent directories.
    pub fn write_app_file(&self, relative: &str, content: &str) {
        let path = self.app_root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// `packages_dir = "<absolute path>"` for inclusion in settings, with
    /// forward slashes so it is valid TOML on every platform.
    pub fn packages_dir_setting(&self) -> String {
        format!(
            "packages_dir = \"{}\"\n",
            self.packages_dir().display().to_string().replace('\\', "/")
        )
    }
}

/// Create `dir` with a marker file an extension would contain.
fn make_extension_dir(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir.join("lib")).unwrap();
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::write(dir.join("README.md"), format!("# {name}\n")).unwrap();
    dir.to_path_buf()
}
