use std::fmt;

/// Non-fatal conditions met while reading or rewriting the published docs.
/// These are reported to the operator but never abort a run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A folder in the version directory is not a version
    UnparsableFolder { name: String, reason: String },
    /// The latest stable version is older than every rendered version
    StableOutsideWindow { stable: String, render_last: usize },
    /// The redirect page has no placeholder to substitute
    MissingRedirectPlaceholder { path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableFolder { name, reason } => {
                write!(f, "Skipping folder '{}': {}", name, reason)
            }
            BoundaryWarning::StableOutsideWindow {
                stable,
                render_last,
            } => {
                write!(
                    f,
                    "Stable version '{}' is not among the last {} rendered versions",
                    stable, render_last
                )
            }
            BoundaryWarning::MissingRedirectPlaceholder { path } => {
                write!(f, "No 'var-url' placeholder found in '{}'", path)
            }
        }
    }
}
