mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, content::ContentSubcommand, log::LogSubcommand,
    proposal::ProposalSubcommand, task::TaskSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mc",
    about = "Mission Control: personal ops dashboard and caffeine cutoff calculator",
    version,
    propagate_version = true
)]
struct Cli {
    /// Dashboard root (default: auto-detect from .mission-control/)
    #[arg(long, global = true, env = "MC_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .mission-control/ in the current directory
    Init,

    /// Start the dashboard server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3141")]
        port: u16,
        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// Compute today's caffeine curve and last-call time
    Caffeine {
        /// Wake time, e.g. 7, 7:30, 7:30am, 19:05
        #[arg(long)]
        wake: Option<String>,
        /// Target sleep time
        #[arg(long)]
        sleep: Option<String>,
        /// Servings per day (clamped to 1..=8)
        #[arg(long)]
        coffees: Option<String>,
        /// coffee, espresso, latte, cold_brew, energy_drink, green_tea
        #[arg(long)]
        source: Option<String>,
        /// Save the report as the server's last-known-good cache
        #[arg(long)]
        write_cache: bool,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Manage the content pipeline
    Content {
        #[command(subcommand)]
        subcommand: ContentSubcommand,
    },

    /// Review agent proposals
    Proposal {
        #[command(subcommand)]
        subcommand: ProposalSubcommand,
    },

    /// Read and append to the action log
    Log {
        #[command(subcommand)]
        subcommand: LogSubcommand,
    },

    /// Inspect and validate config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Serve { port, no_open } => cmd::serve::run(&root, port, no_open),
        Commands::Caffeine {
            wake,
            sleep,
            coffees,
            source,
            write_cache,
        } => cmd::caffeine::run(
            &root,
            mc_core::caffeine::ScheduleParams {
                wake,
                sleep,
                coffees,
                source,
            },
            write_cache,
            cli.json,
        ),
        Commands::Task { subcommand } => cmd::task::run(&root, subcommand, cli.json),
        Commands::Content { subcommand } => cmd::content::run(&root, subcommand, cli.json),
        Commands::Proposal { subcommand } => cmd::proposal::run(&root, subcommand, cli.json),
        Commands::Log { subcommand } => cmd::log::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
