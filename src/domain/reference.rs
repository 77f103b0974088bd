use crate::domain::version::Version;
use crate::error::{DocVersionsError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const TAG_PREFIX: &str = "v";
const BRANCH_PREFIX: &str = "release/";

/// Kind of git reference that triggered the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Tag,
    Branch,
}

impl RefKind {
    /// Human readable description of the accepted names
    pub fn expected_pattern(&self) -> &'static str {
        match self {
            RefKind::Tag => {
                "'vN.N.N' where only patch pre-releases (vN.N.N[{a|b|rc}N]) are supported"
            }
            RefKind::Branch => {
                "'release/N.N' or 'release/N.N.N' where only patch pre-releases \
                 (release/N.N.N[{a|b|rc}N]) are supported"
            }
        }
    }

    fn grammar(&self) -> &'static Regex {
        static TAG: OnceLock<Regex> = OnceLock::new();
        static BRANCH: OnceLock<Regex> = OnceLock::new();
        match self {
            RefKind::Tag => TAG.get_or_init(|| {
                Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+(?:(?:a|b|rc)[0-9]+)?$")
                    .expect("tag grammar is valid")
            }),
            RefKind::Branch => BRANCH.get_or_init(|| {
                Regex::new(r"^[0-9]+\.[0-9]+(?:\.[0-9]+(?:(?:a|b|rc)[0-9]+)?)?$")
                    .expect("branch grammar is valid")
            }),
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            RefKind::Tag => TAG_PREFIX,
            RefKind::Branch => BRANCH_PREFIX,
        }
    }
}

impl FromStr for RefKind {
    type Err = DocVersionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tag" => Ok(RefKind::Tag),
            "branch" => Ok(RefKind::Branch),
            other => Err(DocVersionsError::config(format!(
                "Unsupported reference type '{}' (expected 'tag' or 'branch')",
                other
            ))),
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Tag => f.write_str("tag"),
            RefKind::Branch => f.write_str("branch"),
        }
    }
}

/// The git reference a documentation build was triggered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: RefKind,
    pub name: String,
}

/// Target version extracted from a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: Version,
    pub is_pre_release: bool,
}

impl Reference {
    pub fn new(kind: RefKind, name: impl Into<String>) -> Self {
        Reference {
            kind,
            name: name.into(),
        }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(RefKind::Tag, name)
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Self::new(RefKind::Branch, name)
    }

    /// Version part of the name, with the kind's prefix removed
    pub fn version_part(&self) -> Result<&str> {
        self.name
            .strip_prefix(self.kind.prefix())
            .ok_or_else(|| DocVersionsError::format(self.kind, &self.name))
    }

    /// Validate the name against its kind's grammar and extract the target version
    pub fn resolve(&self) -> Result<ResolvedVersion> {
        let raw = self.version_part()?;
        if !self.kind.grammar().is_match(raw) {
            return Err(DocVersionsError::format(self.kind, &self.name));
        }
        let version = Version::parse(raw)?;
        let is_pre_release = version.is_prerelease();
        Ok(ResolvedVersion {
            version,
            is_pre_release,
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

/// Resolve a reference to its version string and pre-release flag
pub fn resolve_target_version(reference: &Reference) -> Result<(String, bool)> {
    let resolved = reference.resolve()?;
    Ok((resolved.version.to_string(), resolved.is_pre_release))
}
