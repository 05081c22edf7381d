use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use intake_render::RenderMode;

#[derive(Debug, Parser)]
#[command(
    name = "intake",
    version,
    about = "Check, preview and edit form and quiz definitions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Engine config file (JSON). Defaults apply when absent.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a definition and report every reason it cannot be saved.
    Check(CheckArgs),

    /// Print the control descriptors a definition renders to.
    Preview(PreviewArgs),

    /// Apply a JSON list of mutations and save the result.
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_enum)]
    pub kind: KindArg,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_enum)]
    pub kind: KindArg,

    #[arg(long, value_enum, default_value = "preview")]
    pub mode: ModeArg,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// JSON array of mutations, applied in order.
    #[arg(long, value_name = "FILE")]
    pub mutations: PathBuf,

    /// Where to save the result (default: overwrite FILE).
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Name recorded as the actor in audit events.
    #[arg(long, default_value = "cli")]
    pub actor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Form,
    Quiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Authoring,
    Preview,
    Readonly,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Authoring => RenderMode::AuthoringDisabled,
            ModeArg::Preview => RenderMode::PreviewEnabled,
            ModeArg::Readonly => RenderMode::ReadOnly,
        }
    }
}
