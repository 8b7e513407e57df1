//! Command-line interface.
//!
//! Argument definitions live here; each command's handler lives in its own
//! module and prints through [`output`].

pub mod captain;
pub mod check;
pub mod chips;
pub mod compare;
pub mod lineup;
pub mod output;
mod rows;
pub mod squad;
pub mod team;
pub mod transfers;
pub mod values;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::adapter;
use crate::app::{Advisor, Config};
use crate::domain::{Money, Position};
use crate::error::{ConfigError, Result};
use output::OutputConfig;

/// Fantasy football squad, lineup, transfer and chip advice
#[derive(Parser, Debug)]
#[command(name = "gaffer")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file [default: gaffer.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read data from a JSON snapshot instead of the live API
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    fn enabled(&self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick the best squad from scratch under a budget
    Squad(SquadArgs),

    /// Pick the starting eleven for a manager's squad
    Lineup(TeamArgs),

    /// Suggest transfers for a manager's squad
    Transfers(TransfersArgs),

    /// Suggest a captain and vice-captain
    Captain(TeamArgs),

    /// Evaluate chips not yet played
    Chips(TeamArgs),

    /// Lineup, one transfer, captain and chips in a single report
    Team(TeamArgs),

    /// Rank players by projected points per cost
    Values(ValuesArgs),

    /// Compare two players head to head
    Compare(CompareArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `gaffer check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and show effective settings
    Config,
}

#[derive(Parser, Debug)]
pub struct SquadArgs {
    /// Budget in currency units, e.g. 100.0
    #[arg(long)]
    pub budget: Option<Money>,

    /// Periods to project over
    #[arg(long)]
    pub horizon: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct TeamArgs {
    /// Manager's team id
    #[arg(short, long)]
    pub team: u32,
}

#[derive(Parser, Debug)]
pub struct TransfersArgs {
    /// Manager's team id
    #[arg(short, long)]
    pub team: u32,

    /// Number of transfers to search for
    #[arg(short = 'n', long = "transfers", default_value_t = 1)]
    pub transfers: u32,

    /// Free transfers available [default: from config]
    #[arg(long)]
    pub free: Option<u32>,

    /// Money in the bank in currency units, e.g. 1.5
    #[arg(long, default_value = "0")]
    pub bank: Money,

    /// Periods to project over
    #[arg(long)]
    pub horizon: Option<u32>,
}

/// Position filter for rankings.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PositionArg {
    Gk,
    Def,
    Mid,
    Fwd,
}

impl From<PositionArg> for Position {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Gk => Position::Keeper,
            PositionArg::Def => Position::Defender,
            PositionArg::Mid => Position::Midfielder,
            PositionArg::Fwd => Position::Forward,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ValuesArgs {
    /// Only rank this position
    #[arg(short, long)]
    pub position: Option<PositionArg>,

    /// How many players to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// First player id
    pub first: u32,

    /// Second player id
    pub second: u32,

    /// Periods to project over
    #[arg(long, default_value_t = 5)]
    pub horizon: u32,
}

/// Convert a currency amount from the command line to tenths.
pub(crate) fn tenths(field: &'static str, money: Money) -> Result<i64> {
    money.to_tenths().ok_or_else(|| {
        ConfigError::InvalidValue {
            field,
            reason: format!("{} has more than one decimal place", money.amount()),
        }
        .into()
    })
}

/// Parse arguments already collected into `cli` and run the command.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.color.enabled()));

    if let Commands::Check(CheckCommand::Config) = &cli.command {
        return check::execute_config(cli.config.as_deref());
    }

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(path) = &cli.snapshot {
        config.source.snapshot_path = Some(path.clone());
    }
    config.init_logging();
    debug!(command = ?cli.command, "Starting");

    let source = adapter::open_source(&config.source).await?;
    let advisor = Advisor::new(&config, source);

    match &cli.command {
        Commands::Squad(args) => squad::execute(&advisor, args).await,
        Commands::Lineup(args) => lineup::execute(&advisor, args.team).await,
        Commands::Transfers(args) => transfers::execute(&advisor, args).await,
        Commands::Captain(args) => captain::execute(&advisor, args.team).await,
        Commands::Chips(args) => chips::execute(&advisor, args.team).await,
        Commands::Team(args) => team::execute(&advisor, args.team).await,
        Commands::Values(args) => values::execute(&advisor, args).await,
        Commands::Compare(args) => compare::execute(&advisor, args).await,
        Commands::Check(CheckCommand::Config) => check::execute_config(cli.config.as_deref()),
    }
}
