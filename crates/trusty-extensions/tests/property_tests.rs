use std::collections::BTreeSet;

use proptest::prelude::*;
use trusty_extensions::resolver::{apply_ignores, expand};
use trusty_extensions::{Error, ExtensionName, RequestedExtension};

fn available_strategy(min: usize) -> impl Strategy<Value = Vec<ExtensionName>> {
    prop::collection::btree_set("[a-z]{1,6}", min..10)
        .prop_map(|set| set.into_iter().map(ExtensionName::new).collect())
}

fn named(names: &[ExtensionName]) -> Vec<RequestedExtension> {
    names.iter().cloned().map(RequestedExtension::Named).collect()
}

proptest! {
    #[test]
    fn test_explicit_request_is_unchanged(
        (available, picks, ignore_picks) in available_strategy(1).prop_flat_map(|available| {
            let len = available.len();
            (
                Just(available),
                prop::collection::vec(0..len, 0..12),
                prop::collection::vec(0..len, 0..4),
            )
        })
    ) {
        let request: Vec<ExtensionName> = picks.iter().map(|&i| available[i].clone()).collect();
        let ignored: Vec<ExtensionName> = ignore_picks.iter().map(|&i| available[i].clone()).collect();

        let expanded = expand(&named(&request), &available).unwrap();
        prop_assert_eq!(&expanded, &request);

        let enabled = apply_ignores(&expanded, &ignored);
        let expected: Vec<ExtensionName> = request
            .iter()
            .filter(|name| !ignored.contains(*name))
            .cloned()
            .collect();
        prop_assert_eq!(enabled, expected);
    }

    #[test]
    fn test_wildcard_alone_is_sorted_available(available in available_strategy(0)) {
        let first = expand(&[RequestedExtension::All], &available).unwrap();
        let second = expand(&[RequestedExtension::All], &available).unwrap();

        prop_assert_eq!(&first, &available);
        prop_assert_eq!(&first, &second);
        let unique: BTreeSet<_> = first.iter().collect();
        prop_assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn test_wildcard_between_explicit_entries(
        (available, i, j) in available_strategy(2).prop_flat_map(|available| {
            let len = available.len();
            (Just(available), 0..len, 0..len)
        })
    ) {
        prop_assume!(i != j);
        let e1 = available[i].clone();
        let e2 = available[j].clone();
        let request = vec![
            RequestedExtension::Named(e1.clone()),
            RequestedExtension::All,
            RequestedExtension::Named(e2.clone()),
        ];

        let mut expected = vec![e1.clone()];
        expected.extend(available.iter().filter(|n| **n != e1 && **n != e2).cloned());
        expected.push(e2);

        prop_assert_eq!(expand(&request, &available).unwrap(), expected);
    }

    #[test]
    fn test_every_missing_name_reported(
        available in available_strategy(0),
        missing in prop::collection::btree_set("[A-Z]{1,4}", 1..4),
    ) {
        let missing: Vec<ExtensionName> = missing.into_iter().map(ExtensionName::new).collect();
        let mut request = named(&available);
        request.push(RequestedExtension::All);
        request.extend(named(&missing));
        request.extend(named(&missing));

        match expand(&request, &available) {
            Err(Error::MissingExtensions { names }) => prop_assert_eq!(names, missing),
            other => prop_assert!(false, "expected MissingExtensions, got {:?}", other),
        }
    }

    #[test]
    fn test_ignoring_absent_names_is_a_no_op(
        available in available_strategy(0),
        absent in prop::collection::vec("[A-Z]{1,4}", 0..4),
    ) {
        let absent: Vec<ExtensionName> = absent.into_iter().map(ExtensionName::new).collect();
        let expanded = expand(&[RequestedExtension::All], &available).unwrap();
        prop_assert_eq!(apply_ignores(&expanded, &absent), expanded);
    }
}
