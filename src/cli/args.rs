//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    build::BuildCommands,
    check::CheckArgs,
    completions::CompletionsArgs,
    engine::EngineCommands,
    gear::GearArgs,
    import::ImportCommands,
    init::InitArgs,
    motor::MotorCommands,
    part::PartCommands,
    perf::PerfArgs,
    report::ReportArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "kbt")]
#[command(author, version, about = "Kart Build Toolkit")]
#[command(
    long_about = "A Unix-style toolkit for assembling go-kart builds from a plain-text YAML catalog, with compatibility checking and performance estimation."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .kbt/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new KBT catalog project
    Init(InitArgs),

    /// Gas engine catalog
    #[command(subcommand)]
    Engine(EngineCommands),

    /// Electric motor catalog
    #[command(subcommand)]
    Motor(MotorCommands),

    /// Part catalog
    #[command(subcommand)]
    Part(PartCommands),

    /// Saved build management
    #[command(subcommand)]
    Build(BuildCommands),

    /// Check a build for compatibility problems
    Check(CheckArgs),

    /// Estimate a build's performance
    Perf(PerfArgs),

    /// Gear ratio and wheel speed calculator
    Gear(GearArgs),

    /// Generate a Markdown build report
    Report(ReportArgs),

    /// Validate catalog and build files against schemas
    Validate(ValidateArgs),

    /// Import catalog records from CSV
    #[command(subcommand)]
    Import(ImportCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output formats for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Choose based on context (TSV for terminals)
    Auto,
    /// Aligned tab-separated columns
    Tsv,
    /// RFC 4180 CSV
    Csv,
    /// Markdown table
    Md,
    /// JSON
    Json,
    /// IDs only, one per line
    Id,
}

impl OutputFormat {
    /// Resolve Auto to a concrete format
    pub fn resolve(self) -> OutputFormat {
        match self {
            OutputFormat::Auto => OutputFormat::Tsv,
            other => other,
        }
    }
}
