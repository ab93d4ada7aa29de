mod cli;

use burrow::config::Config;
use burrow::engine;
use burrow::observability;
use burrow::scan::Manifest;
use clap::Parser;
use cli::{Cli, Commands, ManifestArgs};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    observability::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Manifest(args) => print_manifest(args).await?,
    }

    Ok(())
}

async fn print_manifest(args: ManifestArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = match args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(root) = args.root {
        config.app.root = root;
    }
    if let Some(cwd) = args.cwd {
        config.app.cwd = Some(cwd);
    }

    let root = engine::resolve_root(&config.app.root, config.app.cwd.as_deref())?;
    let manifest = Manifest::build(&root).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(manifest.records())?);
        return Ok(());
    }

    println!("{:<6} {:<11} {:<30} FILE", "DEPTH", "TYPE", "PATH");
    for record in &manifest {
        println!(
            "{:<6} {:<11} {:<30} {}",
            record.depth(),
            record.file_type(),
            record.http_path(),
            record.relative_path()
        );
    }
    Ok(())
}
