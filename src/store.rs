//! Version directory access
//!
//! The version directory holds one folder per published documentation
//! version, named after the version itself, next to the `dev` and `stable`
//! pseudo-entries. Folders are created by the deployment step; this module
//! only reads them and removes superseded ones.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::error::{DocVersionsError, Result};

/// Folder names that never represent a published version
pub const EXCLUDED_FOLDERS: [&str; 2] = ["dev", "stable"];

/// Result of reading the version directory
#[derive(Debug, Clone, Default)]
pub struct Scan {
    /// Published versions, sorted ascending
    pub versions: Vec<Version>,
    pub warnings: Vec<BoundaryWarning>,
}

impl Scan {
    /// Highest scanned version that is not a pre-release
    pub fn latest_stable(&self) -> Option<&Version> {
        self.versions.iter().filter(|v| !v.is_prerelease()).max()
    }
}

/// A directory of published documentation versions
#[derive(Debug, Clone)]
pub struct VersionDirectory {
    root: PathBuf,
}

impl VersionDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        VersionDirectory { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the documentation of `version`
    pub fn folder(&self, version: &Version) -> PathBuf {
        self.root.join(version.as_str())
    }

    /// Read every version folder, collecting folders that are not versions as warnings.
    /// Symlinks to directories count as version folders.
    pub fn scan(&self) -> Result<Scan> {
        if !self.root.is_dir() {
            return Err(DocVersionsError::DirectoryNotFound(self.root.clone()));
        }

        let mut scan = Scan::default();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if EXCLUDED_FOLDERS.contains(&name.as_str()) {
                continue;
            }
            match Version::parse(&name) {
                Ok(version) => scan.versions.push(version),
                Err(e) => scan.warnings.push(BoundaryWarning::UnparsableFolder {
                    name,
                    reason: e.to_string(),
                }),
            }
        }
        scan.versions.sort();
        debug!(
            root = %self.root.display(),
            count = scan.versions.len(),
            "scanned version directory"
        );
        Ok(scan)
    }

    /// Published versions sorted ascending, optionally without pre-releases
    pub fn list_published_versions(&self, exclude_prereleases: bool) -> Result<Vec<Version>> {
        let scan = self.scan()?;
        for warning in &scan.warnings {
            warn!("{}", warning);
        }
        Ok(scan
            .versions
            .into_iter()
            .filter(|v| !(exclude_prereleases && v.is_prerelease()))
            .collect())
    }

    /// Highest published version that is not a pre-release
    pub fn find_latest_stable(&self) -> Result<Version> {
        let scan = self.scan()?;
        for warning in &scan.warnings {
            warn!("{}", warning);
        }
        self.latest_stable_in(&scan)
    }

    /// Latest stable version of a scan of this directory
    pub fn latest_stable_in(&self, scan: &Scan) -> Result<Version> {
        scan.latest_stable()
            .cloned()
            .ok_or_else(|| DocVersionsError::NoStableVersion(self.root.clone()))
    }

    /// Recursively delete the folder of `version`
    pub fn remove(&self, version: &Version) -> Result<()> {
        let path = self.folder(version);
        debug!(path = %path.display(), "removing version folder");
        fs::remove_dir_all(&path)?;
        Ok(())
    }
}
