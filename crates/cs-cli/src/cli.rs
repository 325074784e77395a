use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cs_server::StoreBackend;

#[derive(Parser)]
#[command(
    name = "codespace",
    about = "Codespace registry: mint ids, store code and wasm, resolve details",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Record table; defaults to $CODESPACEDB_TABLE_NAME
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Root directory of the file record store [default: codespace-data]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Mint a new codespace record
    Create,
    /// Show the details of a codespace
    Details(DetailsArgs),
    /// Write code and/or wasm for a codespace
    Put(PutArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML server config; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub backend: Option<Backend>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Backend {
    Memory,
    File,
}

impl From<Backend> for StoreBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Memory => StoreBackend::Memory,
            Backend::File => StoreBackend::File,
        }
    }
}

#[derive(Args)]
pub struct DetailsArgs {
    pub id: String,
}

#[derive(Args)]
pub struct PutArgs {
    pub id: String,
    #[arg(long, conflicts_with = "code_file")]
    pub code: Option<String>,
    #[arg(long)]
    pub code_file: Option<PathBuf>,
    #[arg(long, conflicts_with = "wasm_file")]
    pub wasm: Option<String>,
    #[arg(long)]
    pub wasm_file: Option<PathBuf>,
}
