//! Publish workflow for a release reference
//!
//! Decides the version a documentation build is published under and which
//! pre-release folders of the same release line it supersedes.

use tracing::info;

use crate::domain::{Reference, Version};
use crate::error::{DocVersionsError, Result};
use crate::store::VersionDirectory;

/// Maximum number of pre-releases kept per release line, the new one included
pub const MAX_PRERELEASES: usize = 3;

/// Policy knobs for a publish run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishPolicy {
    /// Publish final releases under `MAJOR.MINOR.PATCH` instead of `MAJOR.MINOR`
    pub independent_patch_release: bool,
    pub max_prereleases: usize,
}

impl Default for PublishPolicy {
    fn default() -> Self {
        PublishPolicy {
            independent_patch_release: false,
            max_prereleases: MAX_PRERELEASES,
        }
    }
}

/// What a publish run will do, computed without touching the filesystem
#[derive(Debug, Clone, PartialEq)]
pub struct PublishPlan {
    pub target: Version,
    /// Version string the documentation is published under
    pub version: String,
    pub is_pre_release: bool,
    /// Superseded pre-releases, newest first
    pub to_remove: Vec<Version>,
}

/// Result of a completed publish run
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    pub version: String,
    pub is_pre_release: bool,
    pub removed: Vec<Version>,
}

/// Work out the published version and the folders it supersedes.
///
/// A pre-release must be strictly newer than every pre-release of its line
/// still on disk; the newest `max_prereleases - 1` of those are kept. A final
/// release supersedes all pre-releases of its line.
pub fn plan(
    dir: &VersionDirectory,
    reference: &Reference,
    policy: &PublishPolicy,
) -> Result<PublishPlan> {
    let resolved = reference.resolve()?;
    let target = resolved.version;

    let mut same_line: Vec<Version> = dir
        .list_published_versions(false)?
        .into_iter()
        .filter(|v| v.is_prerelease() && v.same_line(&target))
        .collect();
    same_line.sort_by(|a, b| b.cmp(a));

    if resolved.is_pre_release {
        if same_line.iter().any(|existing| *existing >= target) {
            return Err(DocVersionsError::OrderingViolation {
                target: target.to_string(),
                existing: same_line.iter().map(|v| v.to_string()).collect(),
            });
        }

        let keep = policy.max_prereleases.saturating_sub(1);
        let to_remove = same_line.into_iter().skip(keep).collect();
        Ok(PublishPlan {
            version: target.to_string(),
            is_pre_release: true,
            to_remove,
            target,
        })
    } else {
        let version = if policy.independent_patch_release {
            target.to_string()
        } else {
            target.major_minor()
        };
        Ok(PublishPlan {
            version,
            is_pre_release: false,
            to_remove: same_line,
            target,
        })
    }
}

/// Resolve `reference`, remove superseded pre-release folders and report the
/// version to publish. The first failed removal aborts the run.
pub fn publish(
    dir: &VersionDirectory,
    reference: &Reference,
    policy: &PublishPolicy,
) -> Result<PublishOutcome> {
    let plan = plan(dir, reference, policy)?;

    for version in &plan.to_remove {
        dir.remove(version)?;
        info!(version = %version, "removed superseded pre-release");
    }

    Ok(PublishOutcome {
        version: plan.version,
        is_pre_release: plan.is_pre_release,
        removed: plan.to_remove,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(folders: &[&str]) -> (TempDir, VersionDirectory) {
        let tmp = TempDir::new().unwrap();
        for folder in folders {
            fs::create_dir(tmp.path().join(folder)).unwrap();
        }
        let dir = VersionDirectory::new(tmp.path());
        (tmp, dir)
    }

    fn names(versions: &[Version]) -> Vec<String> {
        versions.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_plan_first_prerelease_removes_nothing() {
        let (_tmp, dir) = setup(&["0.1", "0.2", "0.3"]);
        let plan = plan(&dir, &Reference::tag("v0.4.0a0"), &PublishPolicy::default()).unwrap();
        assert_eq!(plan.version, "0.4.0a0");
        assert!(plan.is_pre_release);
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn test_plan_prerelease_keeps_newest_two() {
        let (_tmp, dir) = setup(&["0.3", "0.4.0a0", "0.4.0b0", "0.4.0b1", "0.4.0a1"]);
        let plan = plan(&dir, &Reference::tag("v0.4.0rc0"), &PublishPolicy::default()).unwrap();
        assert_eq!(names(&plan.to_remove), vec!["0.4.0a1", "0.4.0a0"]);
    }

    #[test]
    fn test_plan_prerelease_ignores_other_lines() {
        let (_tmp, dir) = setup(&["0.3.0rc0", "0.3.0rc1", "0.3.0rc2", "0.5.0a0"]);
        let plan = plan(&dir, &Reference::tag("v0.4.0a0"), &PublishPolicy::default()).unwrap();
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn test_plan_rejects_equal_prerelease() {
        let (_tmp, dir) = setup(&["0.4.0b1"]);
        let err = plan(&dir, &Reference::tag("v0.4.0b1"), &PublishPolicy::default()).unwrap_err();
        assert!(matches!(err, DocVersionsError::OrderingViolation { .. }));
    }

    #[test]
    fn test_plan_final_release_truncates_patch() {
        let (_tmp, dir) = setup(&["0.3"]);
        let plan = plan(&dir, &Reference::tag("v0.4.2"), &PublishPolicy::default()).unwrap();
        assert_eq!(plan.version, "0.4");
        assert!(!plan.is_pre_release);
    }

    #[test]
    fn test_plan_final_release_independent_patch() {
        let (_tmp, dir) = setup(&["0.3"]);
        let policy = PublishPolicy {
            independent_patch_release: true,
            ..PublishPolicy::default()
        };
        let plan = plan(&dir, &Reference::tag("v0.4.2"), &policy).unwrap();
        assert_eq!(plan.version, "0.4.2");
    }

    #[test]
    fn test_plan_branch_major_minor_supersedes_zero_patch_line() {
        let (_tmp, dir) = setup(&["0.4.0rc0", "0.4.1rc0"]);
        let plan = plan(&dir, &Reference::branch("release/0.4"), &PublishPolicy::default()).unwrap();
        assert_eq!(plan.version, "0.4");
        assert_eq!(names(&plan.to_remove), vec!["0.4.0rc0"]);
    }

    #[test]
    fn test_plan_custom_retention() {
        let (_tmp, dir) = setup(&["1.0.0a0", "1.0.0a1", "1.0.0a2"]);
        let policy = PublishPolicy {
            max_prereleases: 1,
            ..PublishPolicy::default()
        };
        let plan = plan(&dir, &Reference::tag("v1.0.0b0"), &policy).unwrap();
        assert_eq!(plan.to_remove.len(), 3);
    }

    #[test]
    fn test_plan_does_not_touch_disk() {
        let (tmp, dir) = setup(&["0.4.0a0", "0.4.0a1", "0.4.0a2"]);
        plan(&dir, &Reference::tag("v0.4.0"), &PublishPolicy::default()).unwrap();
        assert!(tmp.path().join("0.4.0a0").exists());
    }

    #[test]
    fn test_publish_removes_planned_folders() {
        let (tmp, dir) = setup(&["0.4.0a0", "0.4.0a1", "0.4.0a2"]);
        let outcome = publish(&dir, &Reference::tag("v0.4.0a3"), &PublishPolicy::default()).unwrap();
        assert_eq!(names(&outcome.removed), vec!["0.4.0a0"]);
        assert!(!tmp.path().join("0.4.0a0").exists());
        assert!(tmp.path().join("0.4.0a1").exists());
        assert!(tmp.path().join("0.4.0a2").exists());
    }

    #[test]
    fn test_publish_invalid_reference_fails_before_scanning() {
        let tmp = TempDir::new().unwrap();
        let dir = VersionDirectory::new(tmp.path().join("missing"));
        let err = publish(&dir, &Reference::tag("0.4.0"), &PublishPolicy::default()).unwrap_err();
        assert!(matches!(err, DocVersionsError::Format { .. }));
    }
}
