//! End-to-end test of a site boot: settings files on disk, vendored and
//! packaged extensions, resolution, then looking up each enabled
//! extension's root the way an activation step would.

use pretty_assertions::assert_eq;
use std::io;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use trusty_extensions::{Configuration, ExtensionName, Roots, SettingsLoader, SourceKind};
use trusty_test_utils::install::TestInstall;

/// A site with core, vendored and packaged extensions.
fn setup_site() -> TestInstall {
    let install = TestInstall::new();
    install.core_extension("archive");
    install.vendor_extension("Dashboard");
    install.vendor_extension("layouts");
    install.vendor_extension("comments");
    install.install_package("trusty-blog-extension", "1.0.0");
    install.install_package("trusty-blog-extension", "1.2.0");
    install.install_package("trusty-comments-extension", "0.9.1");
    install.install_package("rack", "3.0.8");

    install.write_settings(&format!(
        r#"{}
environment = "production"
load = ["dashboard", "all", "archive"]
ignore = ["layouts"]
"#,
        install.packages_dir_setting()
    ));
    install
}

fn names(list: &[ExtensionName]) -> Vec<&str> {
    list.iter().map(ExtensionName::as_str).collect()
}

#[test]
fn test_site_boot() {
    let install = setup_site();
    let roots = Roots::new(install.app_root(), install.install_root());
    let settings = SettingsLoader::with_environment(roots, "production")
        .load()
        .unwrap();
    let config = Configuration::new(settings);

    assert_eq!(
        names(config.available_extensions().unwrap()),
        vec!["archive", "blog", "comments", "dashboard", "layouts"]
    );
    assert_eq!(
        names(config.expanded_extension_list().unwrap()),
        vec!["dashboard", "blog", "comments", "layouts", "archive"]
    );
    assert_eq!(
        names(config.enabled_extensions().unwrap()),
        vec!["dashboard", "blog", "comments", "archive"]
    );

    let resolved = config.into_resolved().unwrap();
    let activation: Vec<(String, SourceKind, String)> = resolved
        .enabled_locations()
        .map(|location| {
            (
                location.name.to_string(),
                location.kind,
                location.root.file_name().unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        activation,
        vec![
            ("dashboard".to_string(), SourceKind::Vendored, "Dashboard".to_string()),
            (
                "blog".to_string(),
                SourceKind::Packaged,
                "trusty-blog-extension-1.2.0".to_string()
            ),
            (
                "comments".to_string(),
                SourceKind::Packaged,
                "trusty-comments-extension-0.9.1".to_string()
            ),
            ("archive".to_string(), SourceKind::Vendored, "archive".to_string()),
        ]
    );
    assert_eq!(resolved.locations().all("comments").len(), 2);
    assert!(!resolved.is_enabled("layouts"));
}

/// Collects formatted log output so tests can count events.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn count(&self, message: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).matches(message).count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_shared_configuration_resolves_once() {
    const THREADS: usize = 8;

    let install = setup_site();
    for i in 0..500 {
        install.vendor_extension(&format!("bulk_{i:03}"));
    }
    let roots = Roots::new(install.app_root(), install.install_root());
    let config = Configuration::new(
        SettingsLoader::with_environment(roots, "production")
            .load()
            .unwrap(),
    );

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let dispatch = tracing::Dispatch::new(
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish(),
    );
    let barrier = Barrier::new(THREADS);

    let results: Vec<Vec<String>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    tracing::dispatcher::with_default(&dispatch, || {
                        barrier.wait();
                        config
                            .enabled_extensions()
                            .unwrap()
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                    })
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in &results {
        assert_eq!(result, &results[0]);
    }
    assert_eq!(logs.count("Discovered available extensions"), 1);
    assert_eq!(logs.count("Resolved enabled extensions"), 1);

    // A later scan would see the new directory; the cached answer does not.
    install.vendor_extension("late");
    let enabled = config.enabled_extensions().unwrap();
    assert!(enabled.iter().all(|name| name.as_str() != "late"));
    assert_eq!(enabled.len(), results[0].len());
}
