use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wga_policy::{Platform, PolicyRegistry};

mod commands;

use commands::Session;

#[derive(Parser)]
#[command(name = "wga")]
#[command(about = "WG access-code comparator", long_about = None)]
struct Cli {
    /// Options file (JSON or YAML). Defaults apply when omitted.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Append one hash-chained audit event per run to this JSONL file.
    #[arg(long, global = true)]
    audit_trail: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a comparison
    Compare {
        #[command(subcommand)]
        cmd: CompareCmd,
    },

    /// Check codes against a known branch code list
    BranchCheck {
        /// File of known branch bundle codes
        #[arg(long)]
        branch_codes: PathBuf,

        /// File of codes to check
        #[arg(long)]
        check: PathBuf,
    },

    /// Role matrix utilities
    Policy {
        #[command(subcommand)]
        cmd: PolicyCmd,
    },
}

#[derive(Subcommand)]
enum CompareCmd {
    /// Requested codes vs codes actually added
    Add {
        /// Target platform (ISM | BPS | CROESUS | SIS)
        #[arg(long)]
        platform: Platform,

        /// Role name, required on role-matrix platforms
        #[arg(long)]
        role: Option<String>,

        /// File of requested codes
        #[arg(long)]
        requested: PathBuf,

        /// File of added codes
        #[arg(long)]
        added: PathBuf,

        /// Write CSV rows here as well
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Deleted vs re-added vs requested codes
    Modify {
        #[arg(long)]
        platform: Platform,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        requested: PathBuf,

        #[arg(long)]
        deleted: PathBuf,

        #[arg(long)]
        readded: PathBuf,

        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Monthly Excel export vs tracker
    Monthly {
        /// Excel export file (RRRR= prefixes are stripped)
        #[arg(long)]
        excel: PathBuf,

        /// Tracker file
        #[arg(long)]
        tracker: PathBuf,

        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PolicyCmd {
    /// List role names
    List,

    /// Print one role's policy as JSON
    Show {
        #[arg(long)]
        role: String,
    },

    /// Print the SHA-256 of the canonical role matrix snapshot
    Hash,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = wga_config::load_options(cli.options.as_deref())?;
    let registry = PolicyRegistry::builtin().context("load role matrix")?;
    let mut session = Session::new(options, cli.audit_trail.as_deref())?;

    match cli.cmd {
        Commands::Compare { cmd } => match cmd {
            CompareCmd::Add {
                platform,
                role,
                requested,
                added,
                csv,
            } => commands::compare::run_add(
                &mut session,
                &registry,
                platform,
                role.as_deref(),
                &requested,
                &added,
                csv.as_deref(),
            ),
            CompareCmd::Modify {
                platform,
                role,
                requested,
                deleted,
                readded,
                csv,
            } => commands::compare::run_modify(
                &mut session,
                &registry,
                platform,
                role.as_deref(),
                &requested,
                &deleted,
                &readded,
                csv.as_deref(),
            ),
            CompareCmd::Monthly {
                excel,
                tracker,
                csv,
            } => commands::compare::run_monthly(&mut session, &excel, &tracker, csv.as_deref()),
        },
        Commands::BranchCheck {
            branch_codes,
            check,
        } => commands::compare::run_branch_check(&mut session, &branch_codes, &check),
        Commands::Policy { cmd } => match cmd {
            PolicyCmd::List => commands::policy::run_list(&registry),
            PolicyCmd::Show { role } => commands::policy::run_show(&registry, &role),
            PolicyCmd::Hash => commands::policy::run_hash(&registry),
        },
    }
}
