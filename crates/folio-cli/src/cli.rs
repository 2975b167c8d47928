use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Folio: versioned per-owner file namespaces",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (TOML); missing file means defaults
    #[arg(long, global = true, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the owner from the config file
    #[arg(long, global = true)]
    pub owner: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a folder
    Mkdir(MkdirArgs),
    /// Add a file referencing an uploaded blob
    Put(PutArgs),
    /// List a folder's children
    Ls(LsArgs),
    /// Remove a file or folder subtree
    Rm(RmArgs),
    /// Find nodes by name prefix
    Find(FindArgs),
    /// Show committed/uncommitted status
    Status(StatusArgs),
    /// Show paths added and removed since the last commit
    Diff,
    /// Save the working tree as a new version
    Commit(CommitArgs),
    /// Show version history
    Log(LogArgs),
    /// Restore a previous version
    Restore(RestoreArgs),
    /// Print the download URL of a file
    Url(UrlArgs),
    /// Print the whole working tree
    Tree,
}

#[derive(Args)]
pub struct MkdirArgs {
    /// Parent folder path
    pub parent: String,
    /// Folder name
    pub name: String,
}

#[derive(Args)]
pub struct PutArgs {
    /// Parent folder path
    pub parent: String,
    /// File name
    pub name: String,
    /// Blob reference returned by the blob service
    pub blob: String,
}

#[derive(Args)]
pub struct LsArgs {
    #[arg(default_value = "root")]
    pub path: String,
}

#[derive(Args)]
pub struct RmArgs {
    pub path: String,
}

#[derive(Args)]
pub struct FindArgs {
    pub prefix: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Single path to check; omit for the whole tree
    pub path: Option<String>,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: Option<String>,
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(long)]
    pub oneline: bool,
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct RestoreArgs {
    /// Version id as printed by `folio log`
    pub version: String,
}

#[derive(Args)]
pub struct UrlArgs {
    pub path: String,
}
