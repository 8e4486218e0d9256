// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counterpart resolution.
//!
//! A [`CounterpartMapping`] answers lookups against a merged store: an explicit entry in
//! `COUNTERPART_MAP` wins outright, and otherwise `COUNTERPART_DIR.prepend_path`, when
//! configured, is joined with the key as a path. Unlike a map with a fixed set of keys,
//! the domain is open-ended once `prepend_path` is set.

use crate::domain::paths::{normalize, relativize};
use crate::domain::section::PREPEND_PATH_OPTION;
use crate::domain::{ConfigError, ConfigStore, Result, SectionKind};
use crate::ports::CounterpartLookup;
use crate::service::loader::{LayeredLoader, LoaderOptions};
use std::path::{Path, PathBuf};

/// A read-only view over a merged store that resolves counterparts.
///
/// # Examples
///
/// ```rust
/// use counterparts::domain::{ConfigStore, SectionKind};
/// use counterparts::service::CounterpartMapping;
///
/// let mut store = ConfigStore::with_home("/home/u");
/// store.set(&SectionKind::Mapping, "foo", Some("bar".to_string()));
/// store.set(&SectionKind::Directory, "prepend_path", Some("%(home)s/lib".to_string()));
///
/// let mapping = CounterpartMapping::new(store, "/home/u");
/// assert_eq!(mapping.lookup("foo").unwrap(), "bar");
/// assert_eq!(mapping.lookup("bashlib/lib").unwrap(), "/home/u/lib/bashlib/lib");
/// ```
#[derive(Clone, Debug)]
pub struct CounterpartMapping {
    store: ConfigStore,
    /// Directory that relative keys are interpreted against
    working_dir: PathBuf,
}

impl CounterpartMapping {
    /// Wraps a fully merged store.
    pub fn new(store: ConfigStore, working_dir: impl Into<PathBuf>) -> Self {
        let mapping = Self {
            store,
            working_dir: working_dir.into(),
        };
        tracing::debug!("New CounterpartMapping with sections {:?}", mapping.store.sections());
        mapping
    }

    /// Loads the session described by `options` and wraps the result.
    pub fn load(options: &LoaderOptions) -> Result<Self> {
        let store = LayeredLoader::new().load(options)?;
        Ok(Self::new(store, options.working_dir()))
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Returns the counterpart of `key`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::NotFound`] - no explicit entry and no `prepend_path`
    /// * an interpolation error - a matching value references a missing option
    pub fn lookup(&self, key: &str) -> Result<String> {
        if let Some(counterpart) = self.store.get_local(&SectionKind::Mapping, key)? {
            tracing::debug!("Result for {}: {}", key, counterpart);
            return Ok(counterpart);
        }

        let Some(prepend) = self
            .store
            .get(&SectionKind::Directory, PREPEND_PATH_OPTION)?
        else {
            tracing::debug!("Nothing for '{}' (and no prepend_path)", key);
            return Err(ConfigError::NotFound {
                key: key.to_string(),
            });
        };

        let relative = relativize(Path::new(key), &self.working_dir);
        let counterpart = normalize(&Path::new(&prepend).join(relative))
            .to_string_lossy()
            .into_owned();
        tracing::debug!(
            "Nothing for '{}'; result with prepend ({}): {}",
            key,
            prepend,
            counterpart
        );
        Ok(counterpart)
    }
}

impl CounterpartLookup for CounterpartMapping {
    fn lookup(&self, key: &str) -> Result<String> {
        CounterpartMapping::lookup(self, key)
    }
}

/// Loads a mapping once for repeated lookups.
///
/// Reads `~/.counterc` (unless `skip_home`), then `config_file` if given or
/// `./.counterc` otherwise. Prefer this over [`map_counterpart`] when resolving more
/// than one key: the files are read only once.
///
/// # Examples
///
/// ```rust,no_run
/// use counterparts::service::get_counterpart_mapping;
/// use std::path::Path;
///
/// # fn main() -> counterparts::domain::Result<()> {
/// let mapping = get_counterpart_mapping(Some(Path::new("map.ini")), true)?;
/// for key in ["a", "b"] {
///     println!("{}", mapping.lookup(key)?);
/// }
/// # Ok(())
/// # }
/// ```
pub fn get_counterpart_mapping(
    config_file: Option<&Path>,
    skip_home: bool,
) -> Result<CounterpartMapping> {
    let options = LoaderOptions::builder()
        .with_optional_config_file(config_file)
        .skip_home(skip_home)
        .build()?;
    CounterpartMapping::load(&options)
}

/// Resolves one key in one step.
///
/// The home file is skipped whenever an explicit `config_file` is given. Every call
/// reloads the configuration files.
pub fn map_counterpart(key: &str, config_file: Option<&Path>) -> Result<String> {
    let mapping = get_counterpart_mapping(config_file, config_file.is_some())?;
    mapping.lookup(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, &str)], prepend: Option<&str>) -> CounterpartMapping {
        let mut store = ConfigStore::with_home("/home/u");
        for (key, value) in entries {
            store.set(&SectionKind::Mapping, key, Some(value.to_string()));
        }
        if let Some(prepend) = prepend {
            store.set(
                &SectionKind::Directory,
                PREPEND_PATH_OPTION,
                Some(prepend.to_string()),
            );
        }
        CounterpartMapping::new(store, "/home/u/work")
    }

    #[test]
    fn test_exact_match() {
        let mapping = mapping(&[("foo", "bar")], None);
        assert_eq!(mapping.lookup("foo").unwrap(), "bar");
    }

    #[test]
    fn test_exact_match_wins_over_prepend() {
        let mapping = mapping(&[("foo", "bar")], Some("/lib"));
        assert_eq!(mapping.lookup("foo").unwrap(), "bar");
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let mapping = mapping(&[("foo", "bar")], None);
        assert_eq!(mapping.lookup("FOO").unwrap(), "bar");
    }

    #[test]
    fn test_no_section_is_not_found() {
        let mapping = mapping(&[], None);
        assert!(mapping.lookup("bashlib").unwrap_err().is_not_found());
    }

    #[test]
    fn test_prepend_path() {
        let mapping = mapping(&[], Some("/home/u/lib"));
        assert_eq!(
            mapping.lookup("bashlib/lib").unwrap(),
            "/home/u/lib/bashlib/lib"
        );
    }

    #[test]
    fn test_prepend_strips_current_dir_and_collapses_parents() {
        let mapping = mapping(&[], Some("/lib"));
        assert_eq!(mapping.lookup("./a/../b").unwrap(), "/lib/b");
        assert_eq!(mapping.lookup("../x").unwrap(), "/x");
    }

    #[test]
    fn test_prepend_relativizes_absolute_keys() {
        let mapping = mapping(&[], Some("/lib"));
        assert_eq!(mapping.lookup("/home/u/work/src/a").unwrap(), "/lib/src/a");
    }

    #[test]
    fn test_prepend_interpolates_home() {
        let mapping = mapping(&[], Some("%(home)s/lib"));
        assert_eq!(mapping.lookup("bash").unwrap(), "/home/u/lib/bash");
    }

    #[test]
    fn test_directory_section_without_prepend_is_not_found() {
        let mut store = ConfigStore::new();
        store.set(&SectionKind::Directory, "other", Some("x".to_string()));
        let mapping = CounterpartMapping::new(store, "/");
        assert!(mapping.lookup("a").unwrap_err().is_not_found());
    }

    #[test]
    fn test_default_only_key_is_not_found() {
        let mut store = ConfigStore::with_home("/home/u");
        store.set(&SectionKind::Default, "counterpart", Some("x.py".to_string()));
        store.add_section(&SectionKind::Mapping);
        let mapping = CounterpartMapping::new(store, "/");
        assert!(mapping.lookup("counterpart").unwrap_err().is_not_found());
        assert!(mapping.lookup("home").unwrap_err().is_not_found());
    }

    #[test]
    fn test_valueless_entry_is_empty() {
        let mut store = ConfigStore::new();
        store.set(&SectionKind::Mapping, "bare", None);
        let mapping = CounterpartMapping::new(store, "/");
        assert_eq!(mapping.lookup("bare").unwrap(), "");
    }

    #[test]
    fn test_lookup_via_trait_object() {
        let mapping = mapping(&[("k", "v")], None);
        let lookup: &dyn CounterpartLookup = &mapping;
        assert_eq!(lookup.lookup("k").unwrap(), "v");
    }
}
