use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rowdiff_engine::MoveStrategy;

#[derive(Parser)]
#[command(
    name = "rowdiff",
    about = "rowdiff: compute list-view batch updates between two JSON snapshots",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with diff settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Strategy {
    LongestIncreasing,
    RankShift,
}

impl From<Strategy> for MoveStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::LongestIncreasing => MoveStrategy::LongestIncreasing,
            Strategy::RankShift => MoveStrategy::RankShift,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two JSON arrays of items
    Items(DiffArgs),
    /// Diff two JSON arrays of sections, each with an `items` array
    Sections(DiffArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// The "before" snapshot
    pub old: PathBuf,
    /// The "after" snapshot
    pub new: PathBuf,
    /// Report moves as a delete plus an insert
    #[arg(long)]
    pub no_moves: bool,
    /// Never report content updates
    #[arg(long)]
    pub no_updates: bool,
    /// How moved items are chosen
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,
}
