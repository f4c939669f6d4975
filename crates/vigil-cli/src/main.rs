#![forbid(unsafe_code)]

mod cmd;
mod output;
mod roster;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "vigil: community activity tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Initialize a vigil project",
        long_about = "Initialize a vigil project in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize in the current directory\n    vg init\n\n    # Emit machine-readable output\n    vg init --json"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        about = "Record an activity event for a user",
        long_about = "Insert or overwrite the last-activity instant for a user. Duplicate and out-of-order events are accepted; the last recorded one wins.",
        after_help = "EXAMPLES:\n    # Record activity now\n    vg record u-100\n\n    # Record a specific instant\n    vg record u-100 --at 2024-01-01T12:00:00Z"
    )]
    Record(cmd::record::RecordArgs),

    #[command(
        about = "Report every tracked user",
        long_about = "Paginate the full activity ledger into bounded report pages.",
        after_help = "EXAMPLES:\n    # Human-readable report\n    vg users\n\n    # One JSON object per batch\n    vg users --json"
    )]
    Users(cmd::users::UsersArgs),

    #[command(
        about = "Report inactive tagged members",
        long_about = "Evaluate which tagged roster members have been silent past the threshold and paginate the result.",
        after_help = "EXAMPLES:\n    # Who has gone quiet?\n    vg inactive\n\n    # Emit machine-readable output\n    vg inactive --json"
    )]
    Inactive(cmd::inactive::InactiveArgs),

    #[command(
        about = "Run the periodic inactivity check",
        long_about = "Run the inactivity check on a fixed interval in the foreground, delivering each report as it is produced.",
        after_help = "EXAMPLES:\n    # Check every 24h (config default)\n    vg watch\n\n    # Check every 10 minutes\n    vg watch --interval-secs 600"
    )]
    Watch(cmd::watch::WatchArgs),
}

fn init_tracing(quiet: bool) {
    let filter = EnvFilter::try_from_env("VIGIL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if env::var("DEBUG").is_ok() {
            "vigil=debug,info"
        } else {
            "vigil=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
        Commands::Record(ref args) => cmd::record::run_record(args, output, &project_root),
        Commands::Users(ref args) => cmd::users::run_users(args, output, &project_root),
        Commands::Inactive(ref args) => cmd::inactive::run_inactive(args, output, &project_root),
        Commands::Watch(ref args) => cmd::watch::run_watch(args, output, &project_root),
    }
}
