use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ecg2af", version, about = "ECG to atrial fibrillation risk decoding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract a recording, replay model outputs and decode predictions.
    Run(RunArgs),
    /// Validate a recording and print tensor statistics.
    Extract(ExtractArgs),
    Heads(HeadsArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "ECG recording (.h5/.hd5)")]
    pub input: PathBuf,

    #[arg(long, help = "Raw model outputs as JSON ({\"outputs\": [{\"name\", \"values\"}]})")]
    pub predictions: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Optional head TSV to overlay on built-in heads")]
    pub heads: Option<PathBuf>,

    #[arg(long, help = "Optional lead layout TSV replacing the 12-lead default")]
    pub leads: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[arg(long, help = "ECG recording (.h5/.hd5)")]
    pub input: PathBuf,

    #[arg(long, help = "Optional lead layout TSV replacing the 12-lead default")]
    pub leads: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct HeadsArgs {
    #[command(subcommand)]
    pub command: HeadsCommand,
}

#[derive(Debug, Subcommand)]
pub enum HeadsCommand {
    Show(HeadsShowArgs),
}

#[derive(Debug, Args)]
pub struct HeadsShowArgs {
    #[arg(long, help = "Optional head TSV to overlay on built-in heads")]
    pub heads: Option<PathBuf>,
}
