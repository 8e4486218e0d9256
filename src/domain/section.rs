// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reserved section names.
//!
//! This module provides the `SectionKind` type, which tags a section name with the role
//! it plays so that the loader and resolver never compare raw strings.

use std::fmt;

/// Name of the defaults pseudo-section.
pub const DEFAULT_SECTION: &str = "DEFAULT";
/// Name of the section holding explicit key to counterpart entries.
pub const MAPPING_SECTION: &str = "COUNTERPART_MAP";
/// Name of the section holding the directory fallback.
pub const DIRECTORY_SECTION: &str = "COUNTERPART_DIR";
/// Name of the section holding include directives.
pub const INCLUDE_SECTION: &str = "INCLUDE";

/// Option in [`DIRECTORY_SECTION`] naming the base directory for unmatched keys.
pub const PREPEND_PATH_OPTION: &str = "prepend_path";
/// Option in [`INCLUDE_SECTION`] listing files to include, one per line.
pub const INCLUDE_PATHS_OPTION: &str = "paths";

/// The role of a configuration section.
///
/// Section names are case-sensitive: `counterpart_map` is an ordinary section.
///
/// # Examples
///
/// ```
/// use counterparts::domain::SectionKind;
///
/// assert_eq!(SectionKind::from("COUNTERPART_MAP"), SectionKind::Mapping);
/// assert_eq!(SectionKind::from("counterpart_map"), SectionKind::Other("counterpart_map".to_string()));
/// assert_eq!(SectionKind::Include.as_str(), "INCLUDE");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// The `DEFAULT` pseudo-section, inherited by every other section.
    Default,
    /// `COUNTERPART_MAP`
    Mapping,
    /// `COUNTERPART_DIR`
    Directory,
    /// `INCLUDE`
    Include,
    /// Any other section name.
    Other(String),
}

impl SectionKind {
    /// Returns the section name as written in a config file.
    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Default => DEFAULT_SECTION,
            SectionKind::Mapping => MAPPING_SECTION,
            SectionKind::Directory => DIRECTORY_SECTION,
            SectionKind::Include => INCLUDE_SECTION,
            SectionKind::Other(name) => name,
        }
    }
}

impl From<&str> for SectionKind {
    fn from(name: &str) -> Self {
        match name {
            DEFAULT_SECTION => SectionKind::Default,
            MAPPING_SECTION => SectionKind::Mapping,
            DIRECTORY_SECTION => SectionKind::Directory,
            INCLUDE_SECTION => SectionKind::Include,
            other => SectionKind::Other(other.to_string()),
        }
    }
}

impl From<String> for SectionKind {
    fn from(name: String) -> Self {
        match SectionKind::from(name.as_str()) {
            SectionKind::Other(_) => SectionKind::Other(name),
            reserved => reserved,
        }
    }
}

impl AsRef<str> for SectionKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
