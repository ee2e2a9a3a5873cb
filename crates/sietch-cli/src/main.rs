//! CLI frontend for the sietch dice engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use sietch_dice::SystemKind;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Session;

#[derive(Parser)]
#[command(
    name = "sietch",
    about = "sietch: dice notation and TTRPG roll resolution",
    version,
    propagate_version = true
)]
struct Cli {
    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// TOML file with dice limits and engine settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll dice notation such as 3d6+2
    Roll {
        /// Dice notation: [count]d<sides>[+|-modifier]
        notation: String,

        /// Resolution system: standard, exploding, wod
        #[arg(short, long, default_value = "standard")]
        system: SystemKind,

        /// World of Darkness difficulty (default from config, usually 6)
        #[arg(short, long)]
        difficulty: Option<u32>,

        /// World of Darkness specialty: tens count double
        #[arg(long)]
        specialty: bool,
    },

    /// Roll 2d20 against a target number
    Dune {
        /// Target number (1-20)
        target: u32,

        /// Extra d20s; only the lowest two count
        #[arg(short, long, default_value = "0")]
        bonus: u32,
    },

    /// Make a full Dune skill test
    Test {
        /// Attribute plus skill (1-20)
        target: u32,

        /// Successes needed (0-5)
        #[arg(short, long, default_value = "1")]
        difficulty: u32,

        /// Extra d20s added to the pool
        #[arg(short, long, default_value = "0")]
        bonus: u32,

        /// Lowest face that generates a complication
        #[arg(long, default_value = "20")]
        complication_range: u32,
    },

    /// Repeat Dune tests until a success target or the time limit is reached
    Extended {
        /// Attribute plus skill (1-20)
        target: u32,

        /// Total successes needed
        #[arg(short, long)]
        successes: u32,

        /// Successes needed on each test (0-5)
        #[arg(short, long, default_value = "1")]
        difficulty: u32,

        /// Extra d20s added to each test
        #[arg(short, long, default_value = "0")]
        bonus: u32,

        /// Most tests allowed
        #[arg(short, long, default_value = "10")]
        time_limit: u32,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SIETCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = Session::open(cli.config.as_deref(), cli.seed, cli.json).and_then(|mut session| {
        match cli.command {
            Commands::Roll {
                notation,
                system,
                difficulty,
                specialty,
            } => commands::roll::run(&mut session, &notation, system, difficulty, specialty),
            Commands::Dune { target, bonus } => commands::dune::run(&mut session, target, bonus),
            Commands::Test {
                target,
                difficulty,
                bonus,
                complication_range,
            } => commands::test::run(
                &mut session,
                target,
                difficulty,
                bonus,
                complication_range,
            ),
            Commands::Extended {
                target,
                successes,
                difficulty,
                bonus,
                time_limit,
            } => commands::extended::run(
                &mut session,
                target,
                successes,
                difficulty,
                bonus,
                time_limit,
            ),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
