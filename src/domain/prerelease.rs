//! Pre-release markers for documentation versions
//!
//! Only the three PEP 440 phases are supported, written without separators
//! (`a0`, `b2`, `rc1`). Phases order as alpha < beta < release candidate and
//! the counter breaks ties within a phase.

use crate::error::{DocVersionsError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreReleaseType {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreReleaseType {
    /// Short marker as it appears in a version string
    pub fn marker(&self) -> &'static str {
        match self {
            PreReleaseType::Alpha => "a",
            PreReleaseType::Beta => "b",
            PreReleaseType::ReleaseCandidate => "rc",
        }
    }
}

impl FromStr for PreReleaseType {
    type Err = DocVersionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a" => Ok(PreReleaseType::Alpha),
            "b" => Ok(PreReleaseType::Beta),
            "rc" => Ok(PreReleaseType::ReleaseCandidate),
            other => Err(DocVersionsError::version(format!(
                "Invalid pre-release marker: '{}' (expected a, b or rc)",
                other
            ))),
        }
    }
}

impl fmt::Display for PreReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Pre-release marker with its counter, e.g. `rc2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    pub phase: PreReleaseType,
    pub number: u64,
}

impl PreRelease {
    pub fn new(phase: PreReleaseType, number: u64) -> Self {
        PreRelease { phase, number }
    }

    /// Parse a marker such as `a0`, `b12` or `rc3`
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for PreRelease {
    type Err = DocVersionsError;

    fn from_str(s: &str) -> Result<Self> {
        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(|| {
            DocVersionsError::version(format!("Pre-release '{}' has no counter", s))
        })?;
        let (phase, number) = s.split_at(split);
        let phase = phase.parse()?;
        let number = number.parse::<u64>().map_err(|_| {
            DocVersionsError::version(format!("Invalid pre-release counter: '{}'", number))
        })?;
        Ok(PreRelease { phase, number })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.phase, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerelease_type_parse() {
        assert_eq!("a".parse::<PreReleaseType>().unwrap(), PreReleaseType::Alpha);
        assert_eq!("b".parse::<PreReleaseType>().unwrap(), PreReleaseType::Beta);
        assert_eq!(
            "rc".parse::<PreReleaseType>().unwrap(),
            PreReleaseType::ReleaseCandidate
        );
    }

    #[test]
    fn test_prerelease_type_rejects_long_names() {
        assert!("alpha".parse::<PreReleaseType>().is_err());
        assert!("dev".parse::<PreReleaseType>().is_err());
        assert!("RC".parse::<PreReleaseType>().is_err());
    }

    #[test]
    fn test_prerelease_parse_with_counter() {
        let pr = PreRelease::parse("rc12").unwrap();
        assert_eq!(pr.phase, PreReleaseType::ReleaseCandidate);
        assert_eq!(pr.number, 12);
    }

    #[test]
    fn test_prerelease_parse_requires_counter() {
        assert!(PreRelease::parse("b").is_err());
        assert!(PreRelease::parse("").is_err());
        assert!(PreRelease::parse("b1x").is_err());
    }

    #[test]
    fn test_prerelease_phase_ordering() {
        let alpha = PreRelease::parse("a9").unwrap();
        let beta = PreRelease::parse("b0").unwrap();
        let rc = PreRelease::parse("rc0").unwrap();
        assert!(alpha < beta);
        assert!(beta < rc);
    }

    #[test]
    fn test_prerelease_counter_breaks_ties() {
        assert!(PreRelease::parse("b2").unwrap() > PreRelease::parse("b1").unwrap());
        assert!(PreRelease::parse("rc10").unwrap() > PreRelease::parse("rc9").unwrap());
    }

    #[test]
    fn test_prerelease_display() {
        assert_eq!(PreRelease::new(PreReleaseType::Beta, 3).to_string(), "b3");
        assert_eq!(
            PreRelease::new(PreReleaseType::ReleaseCandidate, 0).to_string(),
            "rc0"
        );
    }
}
