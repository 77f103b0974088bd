//! Domain logic - version values and reference parsing, independent of the filesystem

pub mod prerelease;
pub mod reference;
pub mod version;

pub use prerelease::{PreRelease, PreReleaseType};
pub use reference::{resolve_target_version, RefKind, Reference, ResolvedVersion};
pub use version::Version;
