pub mod config_cmd;
pub mod fmt;
pub mod parse;

use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "modelfile",
    version,
    about = "Inspect and canonicalize Modelfiles"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Args, Clone)]
pub struct GlobalArgs {
    /// Configuration file (default: <config dir>/modelfile/config.json).
    #[arg(long, global = true, env = "MODELFILE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Largest single line or quoted block to accept, in bytes.
    #[arg(long, global = true, env = "MODELFILE_MAX_TOKEN_SIZE")]
    pub max_token_size: Option<NonZeroUsize>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a Modelfile and print its directives as JSON.
    Parse(ParseArgs),

    /// Print a Modelfile in canonical form.
    Fmt(FmtArgs),

    /// View / edit configuration.
    Config(ConfigArgs),
}

//  Subcommand argument structs

#[derive(Debug, clap::Args, Clone)]
pub struct ParseArgs {
    /// Modelfile to read (`-` for stdin).
    #[arg(default_value = "Modelfile")]
    pub path: PathBuf,

    /// Fail if any unknown commands are found.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct FmtArgs {
    /// Modelfile to read (`-` for stdin).
    #[arg(default_value = "Modelfile")]
    pub path: PathBuf,

    /// Exit with an error if the file is not already canonical.
    #[arg(long, conflicts_with = "write")]
    pub check: bool,

    /// Rewrite the file in place.
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Display the current configuration.
    Show,
    /// Set a configuration value.
    Set { key: String, value: String },
}

//  Input helpers

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a whole Modelfile from `path`, or stdin for `-`.
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if is_stdin(path) {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        return Ok(data);
    }
    std::fs::read(path).map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))
}
