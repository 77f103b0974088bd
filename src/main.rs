use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use doc_versions::cli::{self, PublishWorkflowArgs};
use doc_versions::config::{self, Overrides};
use doc_versions::domain::{RefKind, Reference};
use doc_versions::output::{FileOutput, OutputChannel, StdoutOutput};
use doc_versions::ui;

#[derive(clap::Parser)]
#[command(
    name = "doc-versions",
    version,
    about = "Manage published documentation versions and the version switcher"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding one folder per published version")]
    version_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "GITHUB_OUTPUT",
        help = "File receiving KEY=value outputs (stdout when unset)"
    )]
    github_output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide the published version and remove superseded pre-releases
    Publish {
        #[arg(long, env = "REF_TYPE", help = "Reference kind: tag or branch")]
        ref_type: RefKind,

        #[arg(long, env = "REF_NAME", help = "Tag (vX.Y.Z) or branch (release/X.Y) name")]
        ref_name: String,

        #[arg(
            long,
            env = "INDEPENDENT_PATCH_RELEASE_DOCS",
            num_args = 0..=1,
            default_missing_value = "true",
            value_parser = BoolishValueParser::new(),
            help = "Publish final releases under MAJOR.MINOR.PATCH"
        )]
        independent_patch_release: Option<bool>,

        #[arg(long, help = "Preview removals without changing anything")]
        dry_run: bool,
    },

    /// Rewrite the version switcher index
    Index {
        #[arg(long, env = "CNAME", help = "Documentation host")]
        cname: Option<String>,

        #[arg(long, env = "RENDER_LAST", help = "Number of versions shown in the switcher")]
        render_last: Option<usize>,

        #[arg(short, long, help = "Index file to write")]
        output: Option<PathBuf>,
    },

    /// Banner outdated versions and point the redirect page at stable
    Announce {
        #[arg(long, env = "CNAME", help = "Documentation host")]
        cname: Option<String>,

        #[arg(long, help = "Redirect page containing the 'var-url' placeholder")]
        index_html: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("DOC_VERSIONS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut overrides = Overrides {
        version_dir: args.version_dir,
        ..Overrides::default()
    };
    match &args.command {
        Command::Publish {
            independent_patch_release,
            ..
        } => {
            overrides.independent_patch_release = *independent_patch_release;
        }
        Command::Index {
            cname,
            render_last,
            output,
        } => {
            overrides.cname = cname.clone();
            overrides.render_last = *render_last;
            overrides.index_file = output.clone();
        }
        Command::Announce { cname, index_html } => {
            overrides.cname = cname.clone();
            overrides.index_html = index_html.clone();
        }
    }

    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?
        .with_overrides(&overrides);
    config.validate()?;

    let mut output: Box<dyn OutputChannel> = match args.github_output {
        Some(path) => Box::new(FileOutput::new(path)),
        None => Box::new(StdoutOutput),
    };

    match args.command {
        Command::Publish {
            ref_type,
            ref_name,
            dry_run,
            ..
        } => {
            let workflow = PublishWorkflowArgs {
                reference: Reference::new(ref_type, ref_name),
                dry_run,
            };
            cli::run_publish(&workflow, &config, output.as_mut())?;
        }
        Command::Index { .. } => {
            cli::run_index(&config, output.as_mut())?;
        }
        Command::Announce { .. } => {
            cli::run_announce(&config)?;
        }
    }

    Ok(())
}
