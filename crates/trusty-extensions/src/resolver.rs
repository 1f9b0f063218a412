//! Expansion of the requested load order into the enabled list.
//!
//! ```
//! use trusty_extensions::resolver::{apply_ignores, expand};
//! use trusty_extensions::{ExtensionName, requested};
//!
//! let available: Vec<ExtensionName> =
//!     ["blog", "comments", "dashboard", "layouts"].into_iter().map(Into::into).collect();
//!
//! let expanded = expand(&requested(["dashboard", "all"]), &available).unwrap();
//! let enabled = apply_ignores(&expanded, &[ExtensionName::from("layouts")]);
//!
//! let names: Vec<&str> = enabled.iter().map(|n| n.as_str()).collect();
//! assert_eq!(names, ["dashboard", "blog", "comments"]);
//! ```

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::name::ExtensionName;
use crate::request::RequestedExtension;

/// Expand `requested` against the `available` set.
///
/// The first wildcard is replaced, in place, by every available extension
/// not named anywhere in `requested`, in the order of `available` (which is
/// sorted). Named entries keep their positions; a name listed twice stays
/// listed twice. Further wildcards are dropped with a warning.
///
/// # Errors
///
/// Returns [`Error::MissingExtensions`] listing every named entry that is
/// not available, each once, in request order.
pub fn expand(
    requested: &[RequestedExtension],
    available: &[ExtensionName],
) -> Result<Vec<ExtensionName>> {
    let available_set: HashSet<&ExtensionName> = available.iter().collect();

    let mut missing: Vec<ExtensionName> = Vec::new();
    for name in requested.iter().filter_map(RequestedExtension::name) {
        if !available_set.contains(&name) && !missing.contains(name) {
            missing.push(name.clone());
        }
    }
    if !missing.is_empty() {
        return Err(Error::MissingExtensions { names: missing });
    }

    let explicit: HashSet<&ExtensionName> = requested
        .iter()
        .filter_map(RequestedExtension::name)
        .collect();

    let mut expanded = Vec::with_capacity(requested.len().max(available.len()));
    let mut wildcard_seen = false;
    for (position, entry) in requested.iter().enumerate() {
        match entry {
            RequestedExtension::Named(name) => expanded.push(name.clone()),
            RequestedExtension::All if wildcard_seen => {
                tracing::warn!(position, "Ignoring repeated wildcard in extension load order");
            }
            RequestedExtension::All => {
                wildcard_seen = true;
                expanded.extend(
                    available
                        .iter()
                        .filter(|name| !explicit.contains(name))
                        .cloned(),
                );
            }
        }
    }
    Ok(expanded)
}

/// Remove every ignored name from `expanded`, keeping the order of the rest.
///
/// Ignoring a name that is not in the list has no effect.
pub fn apply_ignores(expanded: &[ExtensionName], ignored: &[ExtensionName]) -> Vec<ExtensionName> {
    let ignored: HashSet<&ExtensionName> = ignored.iter().collect();
    expanded
        .iter()
        .filter(|name| !ignored.contains(name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::requested;
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<ExtensionName> {
        list.iter().map(|&n| ExtensionName::new(n)).collect()
    }

    #[test]
    fn test_explicit_list_unchanged() {
        let available = names(&["a", "b", "c"]);
        let expanded = expand(&requested(["c", "a"]), &available).unwrap();
        assert_eq!(expanded, names(&["c", "a"]));
    }

    #[test]
    fn test_empty_request_is_empty() {
        let available = names(&["a", "b"]);
        assert!(expand(&[], &available).unwrap().is_empty());
    }

    #[test]
    fn test_wildcard_alone_is_everything() {
        let available = names(&["a", "b", "c"]);
        assert_eq!(expand(&requested(["all"]), &available).unwrap(), available);
    }

    #[test]
    fn test_wildcard_in_the_middle() {
        let available = names(&["blog", "comments", "dashboard", "layouts"]);
        let expanded = expand(&requested(["dashboard", "all", "blog"]), &available).unwrap();
        assert_eq!(expanded, names(&["dashboard", "comments", "layouts", "blog"]));
    }

    #[test]
    fn test_duplicates_preserved() {
        let available = names(&["a", "b", "c"]);
        let expanded = expand(&requested(["a", "all", "a"]), &available).unwrap();
        assert_eq!(expanded, names(&["a", "b", "c", "a"]));
    }

    #[test]
    fn test_repeated_wildcard_expands_once() {
        let available = names(&["a", "b", "c"]);
        let expanded = expand(&requested(["all", "b", "all"]), &available).unwrap();
        assert_eq!(expanded, names(&["a", "c", "b"]));
    }

    #[test]
    fn test_missing_reports_every_name_once() {
        let available = names(&["a", "b", "c"]);
        let err = expand(&requested(["x", "a", "all", "y", "x"]), &available).unwrap_err();
        match err {
            Error::MissingExtensions { names: missing } => {
                assert_eq!(missing, names(&["x", "y"]));
            }
            other => panic!("expected MissingExtensions, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_ignores() {
        let expanded = names(&["dashboard", "blog", "comments", "layouts"]);
        let enabled = apply_ignores(&expanded, &names(&["layouts", "not-there"]));
        assert_eq!(enabled, names(&["dashboard", "blog", "comments"]));
    }
}
