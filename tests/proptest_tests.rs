// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check the resolver's contract over arbitrary keys and values.

use counterparts::domain::paths::{normalize, relativize};
use counterparts::domain::{ConfigStore, SectionKind};
use counterparts::service::CounterpartMapping;
use proptest::prelude::*;
use std::path::Path;

const WORKING_DIR: &str = "/home/u/work";

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}(/[a-z0-9_]{1,8}){0,3}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./ -]{0,24}"
}

fn mapping(entries: &[(String, String)], prepend: Option<&str>) -> CounterpartMapping {
    let mut store = ConfigStore::with_home("/home/u");
    store.add_section(&SectionKind::Mapping);
    for (key, value) in entries {
        store.set(&SectionKind::Mapping, key, Some(value.clone()));
    }
    if let Some(prepend) = prepend {
        store.set(
            &SectionKind::Directory,
            "prepend_path",
            Some(prepend.to_string()),
        );
    }
    CounterpartMapping::new(store, WORKING_DIR)
}

// An explicit entry always wins, with or without a prepend path
proptest! {
    #[test]
    fn test_exact_match_wins(
        key in key_strategy(),
        value in value_strategy(),
        with_prepend in any::<bool>(),
    ) {
        let prepend = with_prepend.then_some("/srv/lib");
        let mapping = mapping(&[(key.clone(), value.clone())], prepend);
        prop_assert_eq!(mapping.lookup(&key).unwrap(), value);
    }
}

// Without an entry, the key is joined onto the prepend path
proptest! {
    #[test]
    fn test_prepend_is_normalized_join(
        key in key_strategy(),
        base in "/[a-z]{1,6}(/[a-z]{1,6}){0,2}",
    ) {
        let mapping = mapping(&[], Some(&base));
        let expected = normalize(&Path::new(&base).join(relativize(Path::new(&key), Path::new(WORKING_DIR))));
        prop_assert_eq!(mapping.lookup(&key).unwrap(), expected.to_string_lossy().into_owned());
        prop_assert_eq!(expected, Path::new(&base).join(&key));
    }
}

// Without an entry or a prepend path, every lookup is NotFound
proptest! {
    #[test]
    fn test_unmapped_without_prepend_is_not_found(key in key_strategy()) {
        let mapping = mapping(&[("other".to_string(), "x".to_string())], None);
        prop_assume!(key != "other");
        prop_assert!(mapping.lookup(&key).unwrap_err().is_not_found());
    }
}

// Merging files in sequence keeps the last value
proptest! {
    #[test]
    fn test_last_value_wins(
        key in key_strategy(),
        values in prop::collection::vec(value_strategy(), 1..5),
    ) {
        let mut store = ConfigStore::new();
        for value in &values {
            let mut section = counterparts::domain::ParsedSection::new("COUNTERPART_MAP");
            section.options.push((key.to_lowercase(), Some(value.clone())));
            store.merge(vec![section]);
        }
        let mapping = CounterpartMapping::new(store, WORKING_DIR);
        prop_assert_eq!(mapping.lookup(&key).unwrap(), values.last().unwrap().clone());
    }
}

// Normalizing is idempotent
proptest! {
    #[test]
    fn test_normalize_idempotent(path in "(/)?([a-z]{1,4}|\\.|\\.\\.)(/([a-z]{1,4}|\\.|\\.\\.)){0,5}") {
        let once = normalize(Path::new(&path));
        prop_assert_eq!(normalize(&once), once.clone());
    }
}
