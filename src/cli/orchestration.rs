//! Main workflow orchestration logic
//!
//! Each subcommand of the binary maps to one function here. They take an
//! already-built [Config] and an [OutputChannel], so the workflows can be
//! driven programmatically without depending on clap.

use tracing::info;

use crate::announce;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::Reference;
use crate::error::Result;
use crate::index::{self, IndexReport};
use crate::lifecycle::{self, PublishOutcome};
use crate::output::OutputChannel;
use crate::store::VersionDirectory;
use crate::ui;

/// Arguments for the publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Tag or branch the documentation was built from
    pub reference: Reference,

    /// Report what would be removed without deleting or exporting anything
    pub dry_run: bool,
}

/// Decide the published version for a reference and retire superseded
/// pre-releases, exporting `VERSION` and `PRE_RELEASE`.
pub fn run_publish<O: OutputChannel + ?Sized>(
    args: &PublishWorkflowArgs,
    config: &Config,
    output: &mut O,
) -> Result<PublishOutcome> {
    let dir = VersionDirectory::new(&config.paths.version_dir);
    let policy = config.policy();
    ui::display_status(&format!("Resolving version for {}", args.reference));

    if args.dry_run {
        let plan = lifecycle::plan(&dir, &args.reference, &policy)?;
        ui::display_removed(&plan.to_remove, true);
        ui::display_publish_result(&plan.version, plan.is_pre_release);
        return Ok(PublishOutcome {
            version: plan.version,
            is_pre_release: plan.is_pre_release,
            removed: Vec::new(),
        });
    }

    let outcome = lifecycle::publish(&dir, &args.reference, &policy)?;
    ui::display_removed(&outcome.removed, false);

    output.export("VERSION", &outcome.version)?;
    output.export("PRE_RELEASE", if outcome.is_pre_release { "true" } else { "false" })?;
    ui::display_publish_result(&outcome.version, outcome.is_pre_release);
    info!(
        version = %outcome.version,
        pre_release = outcome.is_pre_release,
        removed = outcome.removed.len(),
        "publish complete"
    );

    Ok(outcome)
}

/// Rewrite the version switcher index and export `LATEST_STABLE_VERSION`.
pub fn run_index<O: OutputChannel + ?Sized>(config: &Config, output: &mut O) -> Result<IndexReport> {
    let cname = config.cname()?;
    let dir = VersionDirectory::new(&config.paths.version_dir);

    let report = index::rebuild_index(
        &dir,
        &config.paths.index_file,
        cname,
        config.index.render_last,
    )?;
    ui::display_boundary_warnings(&report.warnings);
    ui::display_index(&report.entries);
    ui::display_success(&format!(
        "Wrote {} ({} entries)",
        config.paths.index_file.display(),
        report.entries.len()
    ));

    output.export("LATEST_STABLE_VERSION", report.stable.as_str())?;
    Ok(report)
}

/// Banner every outdated version and point the redirect page at stable.
/// Returns the number of banners written.
pub fn run_announce(config: &Config) -> Result<usize> {
    let cname = config.cname()?;
    let dir = VersionDirectory::new(&config.paths.version_dir);
    let stable = dir.find_latest_stable()?;

    let written = announce::announce(&dir, cname, &stable)?;
    ui::display_success(&format!(
        "Wrote {} outdated-version banners pointing at {}",
        written, stable
    ));

    let index_html = &config.paths.index_html;
    if index_html.exists() {
        if announce::update_redirect(index_html, &announce::stable_url(cname))? {
            ui::display_success(&format!("Updated redirect in {}", index_html.display()));
        } else {
            ui::display_boundary_warning(&BoundaryWarning::MissingRedirectPlaceholder {
                path: index_html.display().to_string(),
            });
        }
    }

    Ok(written)
}
