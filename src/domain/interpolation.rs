// SPDX-License-Identifier: MIT OR Apache-2.0

//! `%(name)s` value substitution.
//!
//! A value may reference any option visible from its own section (including the
//! defaults) as `%(name)s`. Names are case-insensitive. `%%` produces a literal `%`.
//! Substituted values are themselves expanded, up to [`MAX_INTERPOLATION_DEPTH`] levels.

use crate::domain::errors::{ConfigError, Result};

/// Maximum nesting of references before expansion fails.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Expands every reference in `value`.
///
/// `lookup` resolves a (lowercased) option name to its raw value, returning `None` when
/// the option does not exist. A valueless option expands to the empty string.
///
/// # Examples
///
/// ```
/// use counterparts::domain::interpolation::interpolate;
///
/// let lookup = |name: &str| match name {
///     "home" => Some(Some("/home/u".to_string())),
///     _ => None,
/// };
/// let value = interpolate("COUNTERPART_DIR", "prepend_path", "%(HOME)s/lib", &lookup).unwrap();
/// assert_eq!(value, "/home/u/lib");
/// ```
pub fn interpolate<F>(section: &str, option: &str, value: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<Option<String>>,
{
    let mut out = String::with_capacity(value.len());
    expand(section, option, value, lookup, &mut out, 1)?;
    Ok(out)
}

fn expand<F>(
    section: &str,
    option: &str,
    mut rest: &str,
    lookup: &F,
    out: &mut String,
    depth: usize,
) -> Result<()>
where
    F: Fn(&str) -> Option<Option<String>>,
{
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(ConfigError::InterpolationDepth {
            section: section.to_string(),
            option: option.to_string(),
        });
    }

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("%%") {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("%(") {
            let close = after.find(")s").ok_or_else(|| ConfigError::InterpolationSyntax {
                section: section.to_string(),
                option: option.to_string(),
                message: format!("bad interpolation variable reference {:?}", tail),
            })?;
            let reference = after[..close].to_lowercase();
            let replacement = lookup(&reference)
                .ok_or_else(|| ConfigError::InterpolationMissingOption {
                    section: section.to_string(),
                    option: option.to_string(),
                    reference: reference.clone(),
                })?
                .unwrap_or_default();

            if replacement.contains('%') {
                expand(section, option, &replacement, lookup, out, depth + 1)?;
            } else {
                out.push_str(&replacement);
            }
            rest = &after[close + 2..];
        } else {
            return Err(ConfigError::InterpolationSyntax {
                section: section.to_string(),
                option: option.to_string(),
                message: format!("'%' must be followed by '%' or '(', found: {:?}", tail),
            });
        }
    }

    out.push_str(rest);
    Ok(())
}
