// SPDX-License-Identifier: MIT OR Apache-2.0

//! The merged configuration store.
//!
//! A `ConfigStore` holds every section read during one session. Option names are
//! case-insensitive and values are optional (a bare `key` line has no value). The
//! `DEFAULT` pseudo-section is kept apart from the others: it is inherited by every
//! section when reading values, but never listed as a section itself.

use crate::domain::errors::Result;
use crate::domain::interpolation::interpolate;
use crate::domain::section::SectionKind;
use std::collections::HashMap;

/// Raw option values keyed by lowercased option name.
type Options = HashMap<String, Option<String>>;

/// One section of a parsed file, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedSection {
    /// The section name exactly as written in the header
    pub name: String,
    /// Options in file order, names already lowercased
    pub options: Vec<(String, Option<String>)>,
}

impl ParsedSection {
    /// Creates an empty parsed section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }
}

/// The merged key/value data of every file loaded in a session.
///
/// # Examples
///
/// ```
/// use counterparts::domain::{ConfigStore, SectionKind};
///
/// let mut store = ConfigStore::with_home("/home/u");
/// store.set(&SectionKind::Directory, "prepend_path", Some("%(home)s/lib".to_string()));
///
/// let value = store.get(&SectionKind::Directory, "prepend_path").unwrap();
/// assert_eq!(value.as_deref(), Some("/home/u/lib"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    defaults: Options,
    /// Sections in first-seen order
    sections: Vec<(String, Options)>,
}

impl ConfigStore {
    /// Creates an empty store with no defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose defaults hold `home`, available to every section as
    /// `%(home)s`.
    pub fn with_home(home: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.set_default("home", Some(home.into()));
        store
    }

    /// Sets a default value inherited by every section.
    pub fn set_default(&mut self, option: &str, value: Option<String>) {
        self.defaults.insert(option.to_lowercase(), value);
    }

    /// Adds an empty section if it does not exist yet.
    pub fn add_section(&mut self, section: &SectionKind) {
        if *section != SectionKind::Default && !self.has_section(section) {
            self.sections
                .push((section.as_str().to_string(), Options::new()));
        }
    }

    /// Returns `true` if the section has been seen. `DEFAULT` is never a section.
    pub fn has_section(&self, section: &SectionKind) -> bool {
        self.section(section).is_some()
    }

    /// Returns the names of all sections in first-seen order.
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the option names set directly in a section, sorted.
    pub fn options(&self, section: &SectionKind) -> Vec<&str> {
        let mut names: Vec<&str> = match section {
            SectionKind::Default => self.defaults.keys().map(String::as_str).collect(),
            _ => self
                .section(section)
                .map(|options| options.keys().map(String::as_str).collect())
                .unwrap_or_default(),
        };
        names.sort_unstable();
        names
    }

    /// Sets an option, creating the section if needed. Later calls win.
    pub fn set(&mut self, section: &SectionKind, option: &str, value: Option<String>) {
        if *section == SectionKind::Default {
            self.set_default(option, value);
            return;
        }
        self.add_section(section);
        if let Some(options) = self.section_mut(section) {
            options.insert(option.to_lowercase(), value);
        }
    }

    /// Removes an option from a section, returning `true` if it was present.
    pub fn remove_option(&mut self, section: &SectionKind, option: &str) -> bool {
        let key = option.to_lowercase();
        match section {
            SectionKind::Default => self.defaults.remove(&key).is_some(),
            _ => self
                .section_mut(section)
                .map(|options| options.remove(&key).is_some())
                .unwrap_or(false),
        }
    }

    /// Merges one parsed file into the store, overriding existing values.
    pub fn merge(&mut self, parsed: Vec<ParsedSection>) {
        for parsed_section in parsed {
            let kind = SectionKind::from(parsed_section.name);
            self.add_section(&kind);
            for (option, value) in parsed_section.options {
                self.set(&kind, &option, value);
            }
        }
    }

    /// Returns the raw value of an option set directly in the section.
    ///
    /// The outer `Option` is `None` when the section or option is missing; the inner
    /// one is `None` for a valueless option.
    pub fn raw_local(&self, section: &SectionKind, option: &str) -> Option<Option<&str>> {
        let options = match section {
            SectionKind::Default => &self.defaults,
            _ => self.section(section)?,
        };
        options
            .get(&option.to_lowercase())
            .map(|value| value.as_deref())
    }

    /// Returns the raw value of an option as seen from the section, falling back to the
    /// defaults. Missing sections see nothing, not even the defaults.
    pub fn raw(&self, section: &SectionKind, option: &str) -> Option<Option<&str>> {
        if *section != SectionKind::Default && !self.has_section(section) {
            return None;
        }
        self.raw_local(section, option)
            .or_else(|| self.raw_local(&SectionKind::Default, option))
    }

    /// Returns the interpolated value of an option as seen from the section.
    ///
    /// `Ok(None)` means the section or option does not exist. A valueless option reads
    /// as the empty string.
    pub fn get(&self, section: &SectionKind, option: &str) -> Result<Option<String>> {
        match self.raw(section, option) {
            Some(value) => self.expand(section, option, value).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`ConfigStore::get`], but only options set directly in the section count.
    /// Defaults still feed `%(name)s` references.
    pub fn get_local(&self, section: &SectionKind, option: &str) -> Result<Option<String>> {
        match self.raw_local(section, option) {
            Some(value) => self.expand(section, option, value).map(Some),
            None => Ok(None),
        }
    }

    fn expand(&self, section: &SectionKind, option: &str, value: Option<&str>) -> Result<String> {
        let Some(value) = value else {
            return Ok(String::new());
        };
        let lookup = |name: &str| {
            self.raw(section, name)
                .map(|value| value.map(str::to_string))
        };
        interpolate(section.as_str(), option, value, &lookup)
    }

    fn section(&self, section: &SectionKind) -> Option<&Options> {
        self.sections
            .iter()
            .find(|(name, _)| name == section.as_str())
            .map(|(_, options)| options)
    }

    fn section_mut(&mut self, section: &SectionKind) -> Option<&mut Options> {
        self.sections
            .iter_mut()
            .find(|(name, _)| name == section.as_str())
            .map(|(_, options)| options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ConfigError;

    fn parsed(name: &str, options: &[(&str, Option<&str>)]) -> ParsedSection {
        ParsedSection {
            name: name.to_string(),
            options: options
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        }
    }

    #[test]
    fn test_store_new_is_empty() {
        let store = ConfigStore::new();
        assert!(store.sections().is_empty());
        assert!(store.options(&SectionKind::Default).is_empty());
    }

    #[test]
    fn test_later_merge_wins() {
        let mut store = ConfigStore::new();
        store.merge(vec![parsed("COUNTERPART_MAP", &[("foo", Some("first"))])]);
        store.merge(vec![parsed("COUNTERPART_MAP", &[("foo", Some("second"))])]);

        let value = store.get(&SectionKind::Mapping, "foo").unwrap();
        assert_eq!(value.as_deref(), Some("second"));
    }

    #[test]
    fn test_option_names_case_insensitive() {
        let mut store = ConfigStore::new();
        store.set(&SectionKind::Mapping, "Foo", Some("bar".to_string()));
        assert_eq!(
            store.get(&SectionKind::Mapping, "FOO").unwrap().as_deref(),
            Some("bar")
        );
        assert_eq!(store.options(&SectionKind::Mapping), vec!["foo"]);
    }

    #[test]
    fn test_defaults_inherited_but_not_local() {
        let mut store = ConfigStore::with_home("/home/u");
        store.add_section(&SectionKind::Mapping);

        assert_eq!(
            store.get(&SectionKind::Mapping, "home").unwrap().as_deref(),
            Some("/home/u")
        );
        assert_eq!(store.get_local(&SectionKind::Mapping, "home").unwrap(), None);
    }

    #[test]
    fn test_section_value_shadows_default() {
        let mut store = ConfigStore::with_home("/home/u");
        store.set(&SectionKind::Mapping, "home", Some("playground".to_string()));
        assert_eq!(
            store.get(&SectionKind::Mapping, "home").unwrap().as_deref(),
            Some("playground")
        );
    }

    #[test]
    fn test_missing_section_sees_no_defaults() {
        let store = ConfigStore::with_home("/home/u");
        assert_eq!(store.get(&SectionKind::Directory, "home").unwrap(), None);
        assert!(!store.has_section(&SectionKind::Directory));
    }

    #[test]
    fn test_default_section_merge_sets_defaults() {
        let mut store = ConfigStore::new();
        store.merge(vec![
            parsed("DEFAULT", &[("src", Some("/src"))]),
            parsed("COUNTERPART_MAP", &[("lib", Some("%(src)s/lib"))]),
        ]);
        assert_eq!(store.sections(), vec!["COUNTERPART_MAP"]);
        assert_eq!(
            store.get(&SectionKind::Mapping, "lib").unwrap().as_deref(),
            Some("/src/lib")
        );
    }

    #[test]
    fn test_valueless_option_reads_empty() {
        let mut store = ConfigStore::new();
        store.set(&SectionKind::Mapping, "bare", None);
        assert_eq!(store.raw(&SectionKind::Mapping, "bare"), Some(None));
        assert_eq!(
            store.get(&SectionKind::Mapping, "bare").unwrap().as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_remove_option() {
        let mut store = ConfigStore::new();
        store.set(&SectionKind::Include, "paths", Some("a\nb".to_string()));
        assert!(store.remove_option(&SectionKind::Include, "PATHS"));
        assert!(!store.remove_option(&SectionKind::Include, "paths"));
        assert!(store.has_section(&SectionKind::Include));
        assert!(!store.remove_option(&SectionKind::Directory, "paths"));
    }

    #[test]
    fn test_sections_keep_first_seen_order() {
        let mut store = ConfigStore::new();
        store.add_section(&SectionKind::Include);
        store.add_section(&SectionKind::Mapping);
        store.add_section(&SectionKind::Include);
        assert_eq!(store.sections(), vec!["INCLUDE", "COUNTERPART_MAP"]);
    }

    #[test]
    fn test_interpolation_error_propagates() {
        let mut store = ConfigStore::new();
        store.set(&SectionKind::Mapping, "bad", Some("%(missing)s".to_string()));
        assert!(matches!(
            store.get(&SectionKind::Mapping, "bad"),
            Err(ConfigError::InterpolationMissingOption { .. })
        ));
    }
}
