use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _};
use colored::Colorize;
use cs_registry::{Registry, RegistryConfig, RegistryError};
use cs_server::{CodespaceServer, ServerConfig};
use cs_store::{FileRecordStore, RecordStore};
use cs_types::{DetailsView, RecordPatch};

use crate::cli::*;

/// Global options shared by every subcommand.
struct Context {
    table: Option<String>,
    data_dir: Option<PathBuf>,
    format: OutputFormat,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context {
        table: cli.table,
        data_dir: cli.data_dir,
        format: cli.format,
    };
    match cli.command {
        Command::Serve(args) => cmd_serve(&ctx, args),
        Command::Create => cmd_create(&ctx),
        Command::Details(args) => cmd_details(&ctx, args),
        Command::Put(args) => cmd_put(&ctx, args),
    }
}

fn registry_config(ctx: &Context) -> anyhow::Result<RegistryConfig> {
    let config = match &ctx.table {
        Some(table) => RegistryConfig::new(table.as_str())?,
        None => RegistryConfig::from_env()?,
    };
    Ok(config)
}

fn data_dir(ctx: &Context) -> PathBuf {
    ctx.data_dir
        .clone()
        .unwrap_or_else(|| ServerConfig::default().data_dir)
}

fn open_registry(ctx: &Context) -> anyhow::Result<(Arc<FileRecordStore>, Registry)> {
    let config = registry_config(ctx)?;
    let dir = data_dir(ctx);
    let store = Arc::new(
        FileRecordStore::open(&dir)
            .with_context(|| format!("opening record store at {}", dir.display()))?,
    );
    let registry = Registry::new(store.clone(), config);
    Ok((store, registry))
}

fn server_config(ctx: &Context, args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(backend) = args.backend {
        config.backend = backend.into();
    }
    if let Some(dir) = &ctx.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn build_patch(args: &PutArgs) -> anyhow::Result<RecordPatch> {
    let mut patch = RecordPatch::empty();
    if let Some(code) = &args.code {
        patch = patch.with_code(code.as_str());
    } else if let Some(path) = &args.code_file {
        let code = std::fs::read_to_string(path)
            .with_context(|| format!("reading code from {}", path.display()))?;
        patch = patch.with_code(code);
    }
    if let Some(wasm) = &args.wasm {
        patch = patch.with_wasm(wasm.as_str());
    } else if let Some(path) = &args.wasm_file {
        let wasm = std::fs::read_to_string(path)
            .with_context(|| format!("reading wasm from {} (must be UTF-8 text)", path.display()))?;
        patch = patch.with_wasm(wasm);
    }
    if patch.is_empty() {
        bail!("nothing to write: pass --code/--code-file and/or --wasm/--wasm-file");
    }
    Ok(patch)
}

fn cmd_serve(ctx: &Context, args: ServeArgs) -> anyhow::Result<()> {
    let registry_config = registry_config(ctx)?;
    let config = server_config(ctx, &args)?;
    let server = CodespaceServer::open(config, registry_config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_create(ctx: &Context) -> anyhow::Result<()> {
    let (_store, registry) = open_registry(ctx)?;
    let id = registry.create()?;
    match ctx.format {
        OutputFormat::Text => println!("{} Created codespace {}", "✓".green().bold(), id.to_string().yellow()),
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": id })),
    }
    Ok(())
}

fn cmd_details(ctx: &Context, args: DetailsArgs) -> anyhow::Result<()> {
    let (_store, registry) = open_registry(ctx)?;
    let view = match registry.details(&args.id) {
        Ok(view) => view,
        Err(RegistryError::NotFound(id)) => bail!("codespace {id:?} not found"),
        Err(e) => return Err(e.into()),
    };
    match ctx.format {
        OutputFormat::Text => print_details(&view),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn print_details(view: &DetailsView) {
    println!("Codespace {}", view.id.yellow().bold());
    for (name, value) in [("code", &view.code), ("wasm", &view.wasm)] {
        if value.is_empty() {
            println!("  {name}: {}", "(empty)".dimmed());
        } else {
            println!("  {name}: {} bytes", value.len().to_string().bold());
        }
    }
}

fn cmd_put(ctx: &Context, args: PutArgs) -> anyhow::Result<()> {
    let patch = build_patch(&args)?;
    let (store, registry) = open_registry(ctx)?;
    let table = registry.config().table_name();

    // Ids come from `create`; refuse to invent one here.
    if !store.exists(table, &args.id)? {
        bail!("codespace {:?} does not exist; mint one with `codespace create`", args.id);
    }
    let record = store.put(table, &args.id, &patch)?;
    tracing::info!(table, id = %record.id, complete = record.is_complete(), "updated codespace");
    match ctx.format {
        OutputFormat::Text => println!("{} Updated codespace {}", "✓".green().bold(), record.id.yellow()),
        OutputFormat::Json => println!("{}", serde_json::to_string(&record)?),
    }
    Ok(())
}
