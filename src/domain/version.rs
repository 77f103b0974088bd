use crate::domain::prerelease::PreRelease;
use crate::error::{DocVersionsError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)(?:\.([0-9]+))?((?:a|b|rc)[0-9]+)?$")
            .expect("version regex is valid")
    })
}

/// Documentation version, `MAJOR.MINOR[.PATCH][{a|b|rc}N]`
///
/// Equality and ordering follow release precedence: a missing patch counts as
/// zero, a final release sorts above its pre-releases. The spelling the
/// version was parsed from is kept so it maps back to its folder name.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: Option<u64>,
    pub pre: Option<PreRelease>,
    text: String,
}

impl Version {
    /// Create a final release version `major.minor.patch`
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch: Some(patch),
            pre: None,
            text: format!("{}.{}.{}", major, minor, patch),
        }
    }

    /// Parse a version string such as `0.4`, `0.4.1` or `0.4.0rc2`
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// The `(major, minor, patch)` release line, missing patch as zero
    pub fn release(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch.unwrap_or(0))
    }

    /// Whether both versions belong to the same release line
    pub fn same_line(&self, other: &Version) -> bool {
        self.release() == other.release()
    }

    /// `MAJOR.MINOR` form used when patch releases share one folder
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Version {
    type Err = DocVersionsError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = version_regex().captures(s).ok_or_else(|| {
            DocVersionsError::version(format!(
                "Invalid version format: '{}' - expected MAJOR.MINOR[.PATCH][{{a|b|rc}}N]",
                s
            ))
        })?;

        let number = |idx: usize| -> Result<Option<u64>> {
            caps.get(idx)
                .map(|m| {
                    m.as_str().parse::<u64>().map_err(|_| {
                        DocVersionsError::version(format!(
                            "Version component out of range: {}",
                            m.as_str()
                        ))
                    })
                })
                .transpose()
        };

        let major = number(1)?.unwrap_or_default();
        let minor = number(2)?.unwrap_or_default();
        let patch = number(3)?;
        let pre: Option<PreRelease> = caps.get(4).map(|m| m.as_str().parse()).transpose()?;

        Ok(Version {
            major,
            minor,
            patch,
            pre,
            text: s.to_string(),
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release()
            .cmp(&other.release())
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
