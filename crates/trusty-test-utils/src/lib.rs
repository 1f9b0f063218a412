//! Shared test fixtures for the trusty-extensions workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! - [`install`]: [`TestInstall`](install::TestInstall), a temporary site
//!   and installation root with vendored extensions, installed packages and
//!   settings files.

pub mod install;
