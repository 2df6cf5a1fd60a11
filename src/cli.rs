use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "persona",
    version,
    about = "Personality assessment scoring and team analysis CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding persona.toml; data paths resolve against it
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a core or discovery submission into a full profile
    Score(ScoreCommand),
    /// Score the attachment and love-language items of a submission
    Relationship(RelationshipCommand),
    /// Score the career-interest items against a stored profile
    Career(CareerCommand),
    /// Compare stored profiles as a team
    Team(TeamCommand),
    /// List the question catalog
    Questions(QuestionsCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    Core,
    Discovery,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TierFilter {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub submission: PathBuf,
    #[arg(long, value_enum, default_value = "core")]
    pub mode: Mode,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// Confidence level for trait intervals; overrides persona.toml
    #[arg(long)]
    pub confidence: Option<f64>,
    /// Score even when fewer responses than the configured minimum were given
    #[arg(long)]
    pub skip_minimum: bool,
}

#[derive(Args)]
pub struct RelationshipCommand {
    pub submission: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct CareerCommand {
    pub submission: PathBuf,
    /// Profile JSON produced by `persona score`
    #[arg(long)]
    pub profile: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct TeamCommand {
    /// Profile JSON files, or directories searched for them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct QuestionsCommand {
    #[arg(long, value_enum)]
    pub tier: Option<TierFilter>,
    /// List the shortened discovery bank instead of the full catalog
    #[arg(long)]
    pub discovery: bool,
}
