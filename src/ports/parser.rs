// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! turning the text of one configuration file into its sections.

use crate::domain::{ParsedSection, Result};
use std::path::Path;

/// A trait for parsing configuration files.
///
/// A parser turns the content of a single file into a list of sections in file order.
/// It does not merge, interpolate or follow includes: the loader does that once the
/// sections are in hand. Option names must already be lowercased.
///
/// # Examples
///
/// ```rust
/// use counterparts::ports::ConfigParser;
/// use counterparts::domain::{ParsedSection, Result};
/// use std::path::Path;
///
/// struct OneSectionParser;
///
/// impl ConfigParser for OneSectionParser {
///     fn parse(&self, content: &str, _origin: &Path) -> Result<Vec<ParsedSection>> {
///         let mut section = ParsedSection::new("COUNTERPART_MAP");
///         for line in content.lines() {
///             if let Some((key, value)) = line.split_once('=') {
///                 section.options.push((key.trim().to_lowercase(), Some(value.trim().to_string())));
///             }
///         }
///         Ok(vec![section])
///     }
/// }
///
/// let sections = OneSectionParser.parse("foo = bar", Path::new("inline")).unwrap();
/// assert_eq!(sections[0].options[0].1.as_deref(), Some("bar"));
/// ```
pub trait ConfigParser {
    /// Parses the content of one configuration file.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw content of the configuration file
    /// * `origin` - The path the content was read from, used in error messages
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ParsedSection>)` - The sections in file order
    /// * `Err(ConfigError)` - The content is malformed
    fn parse(&self, content: &str, origin: &Path) -> Result<Vec<ParsedSection>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test implementation of ConfigParser for testing purposes
    struct FixedParser;

    impl ConfigParser for FixedParser {
        fn parse(&self, _content: &str, _origin: &Path) -> Result<Vec<ParsedSection>> {
            let mut section = ParsedSection::new("COUNTERPART_DIR");
            section
                .options
                .push(("prepend_path".to_string(), Some("/lib".to_string())));
            Ok(vec![section])
        }
    }

    #[test]
    fn test_parser_parse() {
        let sections = FixedParser.parse("ignored", Path::new("x")).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "COUNTERPART_DIR");
    }

    #[test]
    fn test_parser_as_trait_object() {
        let parser: Box<dyn ConfigParser> = Box::new(FixedParser);
        let sections = parser.parse("", Path::new("x")).unwrap();
        assert_eq!(sections[0].options.len(), 1);
    }
}
