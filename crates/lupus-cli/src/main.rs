//! CLI frontend for the Lupus night engine.
//!
//! The game lives in a single JSON file that every command loads, advances,
//! and writes back, so a moderator can run a pass-the-device game one step
//! at a time.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "lupus",
    about = "Lupus: a werewolf night engine for pass-the-device games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Game file to read and write
    #[arg(short, long, global = true, default_value = "lupus.json")]
    game: PathBuf,

    /// Log engine decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every available role
    Roles,

    /// Deal roles and create a new game file
    New {
        /// Player names, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        players: Vec<String>,

        /// Role ids, comma separated, one per player
        #[arg(short, long, value_delimiter = ',', required = true)]
        roles: Vec<String>,

        /// RNG seed for the deal
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Deal roles in the order given instead of shuffling
        #[arg(long)]
        no_shuffle: bool,

        /// Overwrite an existing game file
        #[arg(short, long)]
        force: bool,
    },

    /// Start the next night and list who must act
    Night,

    /// Submit a role's night action
    Act {
        /// Role id acting
        role: String,

        /// Acting player (id or name)
        #[arg(short, long)]
        player: String,

        /// Target players (id or name), comma separated
        #[arg(short, long, value_delimiter = ',')]
        target: Vec<String>,

        /// Role named by a declaration
        #[arg(short, long)]
        declare: Option<String>,

        /// Potion choice for the witch (life or death)
        #[arg(long)]
        potion: Option<String>,

        /// Pass this turn without acting
        #[arg(long)]
        skip: bool,
    },

    /// Resolve the night and announce the dead
    Dawn,

    /// Eliminate a player by day vote
    Vote {
        /// Player to eliminate (id or name)
        player: String,
    },

    /// Show players, phase, and pending roles
    Status {
        /// Also print the full history
        #[arg(long)]
        history: bool,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "lupus=debug" } else { "lupus=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let game = cli.game.as_path();
    let result = match cli.command {
        Commands::Roles => commands::roles::run(),
        Commands::New {
            players,
            roles,
            seed,
            no_shuffle,
            force,
        } => commands::new::run(game, &players, &roles, seed, !no_shuffle, force),
        Commands::Night => commands::night::run(game),
        Commands::Act {
            role,
            player,
            target,
            declare,
            potion,
            skip,
        } => commands::act::run(
            game,
            &role,
            &commands::act::ActArgs {
                player,
                targets: target,
                declare,
                potion,
                skip,
            },
        ),
        Commands::Dawn => commands::dawn::run(game),
        Commands::Vote { player } => commands::vote::run(game, &player),
        Commands::Status { history } => commands::status::run(game, history),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
