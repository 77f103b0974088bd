//! Version switcher index (`versions.json`)

use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::error::{DocVersionsError, Result};
use crate::store::VersionDirectory;

pub const OLDER_VERSIONS_NAME: &str = "Older versions";

/// One entry of the version switcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub version: String,
    pub url: String,
}

impl IndexEntry {
    fn new(name: impl Into<String>, version: impl Into<String>, url: impl Into<String>) -> Self {
        IndexEntry {
            name: name.into(),
            version: version.into(),
            url: url.into(),
        }
    }
}

/// Outcome of an index rebuild
#[derive(Debug, Clone)]
pub struct IndexReport {
    pub stable: Version,
    pub entries: Vec<IndexEntry>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Base URL of the documentation site, `https://` added when missing
pub fn base_url(cname: &str) -> String {
    let host = cname.trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Build the switcher entries for `versions` (any order) with `stable` marked.
pub fn build_entries(
    versions: &[Version],
    stable: &Version,
    cname: &str,
    render_last: usize,
) -> Vec<IndexEntry> {
    let base = base_url(cname);
    let mut sorted: Vec<&Version> = versions.iter().collect();
    sorted.sort_by(|a, b| b.cmp(a));

    let mut entries = vec![IndexEntry::new(
        "dev",
        "dev",
        format!("{}/version/dev/", base),
    )];

    for version in sorted.iter().take(render_last) {
        let entry = if *version == stable {
            IndexEntry::new(
                format!("{} (stable)", version),
                version.to_string(),
                format!("{}/version/stable/", base),
            )
        } else {
            IndexEntry::new(
                version.to_string(),
                version.to_string(),
                format!("{}/version/{}/", base, version),
            )
        };
        entries.push(entry);
    }

    if sorted.len() > render_last {
        entries.push(IndexEntry::new(
            OLDER_VERSIONS_NAME,
            "N/A",
            format!("{}/version/", base),
        ));
    }

    entries
}

/// Mode of a file written for the first time: readable by the web server
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Replace `path` with `contents` through a sibling temp file and a rename.
/// The replaced file keeps its permissions.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(),
        Err(e) => return Err(e.into()),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| DocVersionsError::Io(e.error))?;
    Ok(())
}

/// Rebuild the version switcher index from the version directory.
pub fn rebuild_index(
    dir: &VersionDirectory,
    index_file: &Path,
    cname: &str,
    render_last: usize,
) -> Result<IndexReport> {
    let scan = dir.scan()?;
    let stable = dir.latest_stable_in(&scan)?;
    let mut warnings = scan.warnings;

    let entries = build_entries(&scan.versions, &stable, cname, render_last);
    if !entries.iter().any(|e| e.name.ends_with(" (stable)")) {
        warnings.push(BoundaryWarning::StableOutsideWindow {
            stable: stable.to_string(),
            render_last,
        });
    }

    let mut json = serde_json::to_string_pretty(&entries)?;
    json.push('\n');
    write_atomic(index_file, json.as_bytes())?;
    debug!(path = %index_file.display(), entries = entries.len(), "wrote version index");

    Ok(IndexReport {
        stable,
        entries,
        warnings,
    })
}

/// Read a previously written index
pub fn read_index(index_file: &Path) -> Result<Vec<IndexEntry>> {
    let content = std::fs::read_to_string(index_file)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(list: &[&str]) -> Vec<Version> {
        list.iter().map(|s| Version::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_base_url() {
        assert_eq!(base_url("docs.example.com"), "https://docs.example.com");
        assert_eq!(base_url("https://docs.example.com/"), "https://docs.example.com");
    }

    #[test]
    fn test_build_entries_with_window() {
        let all = versions(&["0.1", "0.2", "0.3", "0.4", "0.5"]);
        let stable = Version::parse("0.5").unwrap();
        let entries = build_entries(&all, &stable, "docs.example.com", 3);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["dev", "0.5 (stable)", "0.4", "0.3", "Older versions"]
        );
        assert_eq!(entries[0].url, "https://docs.example.com/version/dev/");
        assert_eq!(entries[1].version, "0.5");
        assert_eq!(entries[1].url, "https://docs.example.com/version/stable/");
        assert_eq!(entries[2].url, "https://docs.example.com/version/0.4/");
        assert_eq!(entries[4].version, "N/A");
        assert_eq!(entries[4].url, "https://docs.example.com/version/");
    }

    #[test]
    fn test_build_entries_without_sentinel() {
        let all = versions(&["0.1", "0.2"]);
        let stable = Version::parse("0.2").unwrap();
        let entries = build_entries(&all, &stable, "docs.example.com", 3);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.last().unwrap().name, "0.1");
    }

    #[test]
    fn test_build_entries_prerelease_above_stable() {
        let all = versions(&["0.3", "0.4.0rc0", "0.2"]);
        let stable = Version::parse("0.3").unwrap();
        let entries = build_entries(&all, &stable, "docs.example.com", 3);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["dev", "0.4.0rc0", "0.3 (stable)", "0.2"]);
        assert_eq!(entries[1].url, "https://docs.example.com/version/0.4.0rc0/");
    }

    #[test]
    fn test_entry_serialization_field_order() {
        let entry = IndexEntry::new("dev", "dev", "https://x/version/dev/");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"name":"dev","version":"dev","url":"https://x/version/dev/"}"#
        );
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("versions.json");
        std::fs::write(&path, "old content that is longer").unwrap();
        write_atomic(&path, b"[]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("versions.json");

        for existing in [0o644, 0o640, 0o664] {
            std::fs::write(&path, "[]").unwrap();
            std::fs::set_permissions(&path, Permissions::from_mode(existing)).unwrap();
            write_atomic(&path, b"[{}]").unwrap();
            assert_eq!(mode(&path), existing);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_new_file_is_world_readable() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("versions.json");
        write_atomic(&path, b"[]").unwrap();
        assert_eq!(mode(&path), 0o644);
    }
}
