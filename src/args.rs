use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(
    display_name = "match-stats",
    long_about = "Aggregates career stats and all-time records from a match archive snapshot"
)]
pub struct Args {
    /// JSON snapshot with `matches`, `players` and `champions` arrays
    #[arg(short, long, env = "STATS_ARCHIVE", help = "Path to the archive snapshot")]
    pub archive: PathBuf,

    /// Season to aggregate; 0 combines every season
    #[arg(short, long, default_value_t = 0)]
    pub season: u32,

    /// Overrides STATS_WORKERS
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub report: Report,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Report {
    /// Career totals and averages per player
    Players,
    /// All-time record holders per metric
    Records,
    /// Writes a champion's PNG artwork to a file
    ChampionImage {
        #[arg(long)]
        id: i32,
        #[arg(short, long)]
        output: PathBuf,
    },
}
