//! Operator-facing console output.
//!
//! Messages land in the CI job log, so everything is a single line with a
//! coloured marker. Errors and warnings go to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::index::IndexEntry;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

pub fn display_boundary_warnings(warnings: &[BoundaryWarning]) {
    for warning in warnings {
        display_boundary_warning(warning);
    }
}

/// Display the pre-release folders removed (or to be removed) by a publish run.
pub fn display_removed(removed: &[Version], dry_run: bool) {
    if removed.is_empty() {
        display_status("No superseded pre-releases to remove");
        return;
    }
    let verb = if dry_run { "Would remove" } else { "Removed" };
    for version in removed {
        println!("  {} {}", style(verb).red(), version);
    }
}

/// Display the version a build is published under.
pub fn display_publish_result(version: &str, is_pre_release: bool) {
    let kind = if is_pre_release {
        "pre-release"
    } else {
        "release"
    };
    display_success(&format!(
        "Publishing documentation as {} {}",
        kind,
        style(version).bold()
    ));
}

/// Display the entries of a freshly written version switcher.
pub fn display_index(entries: &[IndexEntry]) {
    println!("\n{}", style("Version switcher:").bold());
    for entry in entries {
        println!("  {:<20} {}", entry.name, style(&entry.url).dim());
    }
}
