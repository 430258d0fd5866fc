//! CLI definition and command handling

pub mod commands;

use clap::{Parser, Subcommand};

use commands::UploadApkCommand;

/// acpublisher - publish Android builds to App Center
#[derive(Debug, Parser)]
#[command(name = "acpublisher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (includes full wire traces)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload an APK to App Center
    #[command(name = "uploadApk")]
    UploadApk(UploadApkCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::UploadApk(ref cmd) => cmd.execute(&self),
        }
    }
}
