//! Outdated-version banners and the root redirect page
//!
//! Every published version other than the stable one carries an
//! `announcement.html` banner in each of its directories, which the docs theme
//! renders at the top of the page. Directories whose path has a component
//! starting with `_` (Sphinx's `_static`, `_sources`, ...) are skipped.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::domain::Version;
use crate::error::{DocVersionsError, Result};
use crate::index::{base_url, write_atomic};
use crate::store::VersionDirectory;

pub const ANNOUNCEMENT_FILE: &str = "announcement.html";

/// Placeholder replaced with the stable URL in the redirect page
pub const REDIRECT_PLACEHOLDER: &str = "var-url";

/// URL of the stable documentation
pub fn stable_url(cname: &str) -> String {
    format!("{}/version/stable/", base_url(cname))
}

/// Banner pointing readers of an outdated version to the stable one
pub fn announcement(cname: &str, stable: &Version) -> String {
    format!(
        "<p>You are not viewing the most recent version of this documentation. \
         The latest stable release is <a href='{}'>{}</a>.</p>",
        stable_url(cname),
        stable
    )
}

fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// Write the outdated-version banner into every non-stable version folder.
/// Returns the number of banners written.
pub fn announce(dir: &VersionDirectory, cname: &str, stable: &Version) -> Result<usize> {
    let content = announcement(cname, stable);
    let mut written = 0;

    for version in dir.list_published_versions(false)? {
        if version == *stable {
            continue;
        }
        let walker = WalkDir::new(dir.folder(&version))
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_private(&e.file_name().to_string_lossy()));
        for entry in walker {
            let entry = entry.map_err(|e| DocVersionsError::Io(e.into()))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            fs::write(entry.path().join(ANNOUNCEMENT_FILE), &content)?;
            written += 1;
        }
        debug!(version = %version, "announced stable release");
    }

    Ok(written)
}

/// Point the root redirect page at `target_url`.
/// Returns `false` when the page has no placeholder left to replace.
pub fn update_redirect(index_html: &Path, target_url: &str) -> Result<bool> {
    let content = fs::read_to_string(index_html)?;
    if !content.contains(REDIRECT_PLACEHOLDER) {
        return Ok(false);
    }
    let updated = content.replace(REDIRECT_PLACEHOLDER, target_url);
    write_atomic(index_html, updated.as_bytes())?;
    Ok(true)
}
