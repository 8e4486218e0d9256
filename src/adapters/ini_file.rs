// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI file configuration adapter.
//!
//! This module provides the parser for the section/option file format and an adapter
//! that reads one such file from disk.

use crate::domain::{ConfigError, ParsedSection, Result, SectionKind};
use crate::ports::ConfigParser;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for configuration files (10MB)
const MAX_INI_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Parser for the line-oriented `[section]` / `key = value` format.
///
/// - `#` and `;` start a comment only at the beginning of a line.
/// - `=` and `:` both delimit an option from its value; the first one wins.
/// - A line with no delimiter declares an option without a value.
/// - A line indented deeper than its option continues that option's value on a new
///   line. Blank lines inside a value are kept; trailing ones are dropped.
/// - Within one file a section may be declared once and an option once per section.
///
/// # Examples
///
/// ```rust
/// use counterparts::adapters::IniParser;
/// use counterparts::ports::ConfigParser;
/// use std::path::Path;
///
/// let content = "[INCLUDE]\npaths =\n    a.conf\n    b.conf\n";
/// let sections = IniParser::new().parse(content, Path::new("inline")).unwrap();
/// assert_eq!(sections[0].options[0].1.as_deref(), Some("\na.conf\nb.conf"));
/// ```
#[derive(Debug, Clone)]
pub struct IniParser;

/// An option while its continuation lines are still being collected.
struct PendingOption {
    name: String,
    lines: Option<Vec<String>>,
}

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }

    fn finish(options: Vec<PendingOption>) -> Vec<(String, Option<String>)> {
        options
            .into_iter()
            .map(|option| {
                let value = option
                    .lines
                    .map(|lines| lines.join("\n").trim_end().to_string());
                (option.name, value)
            })
            .collect()
    }

    fn parse_header(line: &str) -> Option<&str> {
        let inner = line.strip_prefix('[')?;
        let close = inner.rfind(']')?;
        let name = &inner[..close];
        (!name.is_empty()).then_some(name)
    }
}

impl Default for IniParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for IniParser {
    fn parse(&self, content: &str, origin: &Path) -> Result<Vec<ParsedSection>> {
        let mut sections: Vec<(String, Vec<PendingOption>)> = Vec::new();
        let mut seen_sections: HashSet<String> = HashSet::new();
        let mut seen_options: HashSet<(String, String)> = HashSet::new();
        let mut indent_level = 0usize;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();
            let indent = raw.len() - raw.trim_start().len();

            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let current = sections.last_mut().and_then(|(_, options)| options.last_mut());

            if trimmed.is_empty() {
                if let Some(PendingOption {
                    lines: Some(lines), ..
                }) = current
                {
                    lines.push(String::new());
                }
                continue;
            }

            if let Some(PendingOption {
                lines: Some(lines), ..
            }) = current
            {
                if indent > indent_level {
                    lines.push(trimmed.to_string());
                    continue;
                }
            }

            indent_level = indent;

            if let Some(name) = Self::parse_header(trimmed) {
                tracing::trace!("{}:{}: section [{}]", origin.display(), line_no, name);
                if SectionKind::from(name) != SectionKind::Default
                    && !seen_sections.insert(name.to_string())
                {
                    return Err(ConfigError::DuplicateSection {
                        path: origin.to_path_buf(),
                        line: line_no,
                        section: name.to_string(),
                    });
                }
                sections.push((name.to_string(), Vec::new()));
                continue;
            }

            let Some((section_name, options)) = sections.last_mut() else {
                return Err(ConfigError::MissingSectionHeader {
                    path: origin.to_path_buf(),
                    line: line_no,
                    content: raw.to_string(),
                });
            };

            let (name, value) = match trimmed.find(['=', ':']) {
                Some(pos) => (&trimmed[..pos], Some(trimmed[pos + 1..].trim())),
                None => (trimmed, None),
            };
            let name = name.trim_end().to_lowercase();
            if name.is_empty() {
                return Err(ConfigError::ParseError {
                    message: format!(
                        "{} [line {}]: option has no name: {:?}",
                        origin.display(),
                        line_no,
                        raw
                    ),
                    source: None,
                });
            }
            if !seen_options.insert((section_name.clone(), name.clone())) {
                return Err(ConfigError::DuplicateOption {
                    path: origin.to_path_buf(),
                    line: line_no,
                    section: section_name.clone(),
                    option: name,
                });
            }

            options.push(PendingOption {
                name,
                lines: value.map(|v| vec![v.to_string()]),
            });
        }

        Ok(sections
            .into_iter()
            .map(|(name, options)| ParsedSection {
                name,
                options: Self::finish(options),
            })
            .collect())
    }
}

/// One configuration file read from disk.
///
/// # Examples
///
/// ```rust,no_run
/// use counterparts::adapters::IniFileAdapter;
///
/// let file = IniFileAdapter::from_file("/home/u/.counterc").unwrap();
/// for section in file.sections() {
///     println!("[{}]", section.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IniFileAdapter {
    /// Path the file was read from
    file_path: PathBuf,
    /// Parsed sections in file order
    sections: Vec<ParsedSection>,
}

impl IniFileAdapter {
    /// Reads and parses a required file.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::FileNotFound`] - the path does not exist
    /// * [`ConfigError::IoError`] - the path exists but cannot be read
    /// * a parse error - the content is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::read_with(&IniParser::new(), path)
    }

    /// Reads and parses a required file with the given parser.
    pub fn read_with<P: AsRef<Path>>(parser: &dyn ConfigParser, path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        let metadata = fs::metadata(&file_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound {
                path: file_path.clone(),
            },
            _ => ConfigError::IoError(e),
        })?;

        // Check file size before reading
        if metadata.len() > MAX_INI_FILE_SIZE {
            return Err(ConfigError::ParseError {
                message: format!(
                    "Configuration file too large: {} ({} bytes, max {} bytes)",
                    file_path.display(),
                    metadata.len(),
                    MAX_INI_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&file_path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => ConfigError::ParseError {
                message: format!("{} is not valid UTF-8", file_path.display()),
                source: Some(Box::new(e)),
            },
            _ => ConfigError::IoError(e),
        })?;
        let sections = parser.parse(&content, &file_path)?;

        Ok(Self {
            file_path,
            sections,
        })
    }

    /// Reads an optional file with the given parser.
    ///
    /// Returns `Ok(None)` when the file is missing or cannot be opened. A file that can
    /// be opened but is not UTF-8 or does not parse is still an error.
    pub fn read_optional_with<P: AsRef<Path>>(
        parser: &dyn ConfigParser,
        path: P,
    ) -> Result<Option<Self>> {
        match Self::read_with(parser, path.as_ref()) {
            Ok(adapter) => Ok(Some(adapter)),
            Err(ConfigError::FileNotFound { .. }) => Ok(None),
            Err(ConfigError::IoError(e)) => {
                tracing::debug!("Skipping unreadable {}: {}", path.as_ref().display(), e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the path the file was read from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the parsed sections in file order.
    pub fn sections(&self) -> &[ParsedSection] {
        &self.sections
    }

    /// Consumes the adapter, returning its sections.
    pub fn into_sections(self) -> Vec<ParsedSection> {
        self.sections
    }
}
