//! Lenient dotted version numbers
//!
//! Fix versions in the tracker are free-form strings ("2.7.1", "3.0.0-alpha1",
//! "2.8"). Only the leading run of dot-separated integers matters for
//! ordering; the original text is kept for display.
//!
//! A component too large for `i64` saturates at `i64::MAX`, so it still sorts
//! above every smaller component instead of truncating the version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{Result, VersionError};

/// Leading run of dot-separated integers
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)").expect("Invalid regex"));

/// Number of numeric parts every version is back-filled to
const MIN_PARTS: usize = 3;

/// A version string with comparable numeric parts
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    parts: Vec<i64>,
    modified: bool,
}

impl Version {
    /// Parse a version string. Never fails: text without a leading number
    /// compares as `0.0.0`.
    pub fn parse(text: &str) -> Self {
        let mut parts: Vec<i64> = VERSION_REGEX
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| {
                m.as_str()
                    .split('.')
                    .map(|p| p.parse::<i64>().unwrap_or(i64::MAX))
                    .collect()
            })
            .unwrap_or_default();

        if parts.len() < MIN_PARTS {
            parts.resize(MIN_PARTS, 0);
        }

        Self {
            text: text.to_string(),
            parts,
            modified: false,
        }
    }

    /// All numeric parts (at least three)
    pub fn parts(&self) -> &[i64] {
        &self.parts
    }

    /// Whether the parts were changed after parsing
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Decrement the patch component, used to guess the previous release.
    ///
    /// A patch of 0 becomes -1; there is no borrow from the minor component.
    pub fn decrement_patch(&mut self) -> &mut Self {
        if self.parts[2] == 0 {
            warn!(version = %self.text, "decrementing a zero patch component yields a negative patch");
        }
        self.parts[2] -= 1;
        self.modified = true;
        self
    }

    /// Return a copy with the patch component decremented
    pub fn previous_patch(&self) -> Self {
        let mut prev = self.clone();
        prev.decrement_patch();
        prev
    }
}

impl FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modified {
            let joined: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
            write!(f, "{}", joined.join("."))
        } else {
            write!(f, "{}", self.text)
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

/// Highest of the given versions
pub fn max_version(versions: &[Version]) -> Result<&Version> {
    versions
        .iter()
        .max()
        .ok_or_else(|| VersionError::NoVersions.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backfill_missing_parts() {
        assert_eq!(Version::parse("2.7").parts(), &[2, 7, 0]);
        assert_eq!(Version::parse("3").parts(), &[3, 0, 0]);
        assert_eq!(Version::parse("2.7.1").parts(), &[2, 7, 1]);
    }

    #[test]
    fn test_non_numeric_suffix_ignored() {
        let v = Version::parse("3.0.0-alpha1");
        assert_eq!(v.parts(), &[3, 0, 0]);
        assert_eq!(v.to_string(), "3.0.0-alpha1");
    }

    #[test]
    fn test_no_numeric_parts() {
        let v = Version::parse("trunk");
        assert_eq!(v.parts(), &[0, 0, 0]);
        assert_eq!(v.to_string(), "trunk");
    }

    #[test]
    fn test_oversized_component_saturates() {
        let huge = Version::parse("99999999999999999999.1");
        assert_eq!(huge.parts(), &[i64::MAX, 1, 0]);
        assert_eq!(huge.to_string(), "99999999999999999999.1");
        assert!(huge > Version::parse("3.0.0"));
    }

    #[test]
    fn test_decrement_patch() {
        let mut v = Version::parse("2.7.1");
        v.decrement_patch();
        assert!(v.is_modified());
        assert_eq!(v.to_string(), "2.7.0");
    }

    #[test]
    fn test_decrement_patch_at_zero_goes_negative() {
        let mut v = Version::parse("2.7.0");
        v.decrement_patch();
        assert_eq!(v.parts(), &[2, 7, -1]);
        assert_eq!(v.to_string(), "2.7.-1");
    }

    #[test]
    fn test_decrement_rewrites_display_text() {
        let v = Version::parse("2.8.2-beta").previous_patch();
        assert_eq!(v.to_string(), "2.8.1");
    }

    #[test]
    fn test_ordering() {
        let a = Version::parse("2.7.0");
        let b = Version::parse("2.8.0");
        let c = Version::parse("3.0.0");
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        assert_eq!(Version::parse("2.7"), Version::parse("2.7.0"));
    }

    #[test]
    fn test_max_version() {
        let versions: Vec<Version> = ["2.7.1", "2.10.0", "2.8.0"]
            .iter()
            .map(|v| Version::parse(v))
            .collect();
        assert_eq!(max_version(&versions).unwrap().to_string(), "2.10.0");
        assert!(max_version(&[]).is_err());
    }
}
