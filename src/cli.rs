use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "Directory-convention web application loader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan an application root and print the manifest
    Manifest(ManifestArgs),
}

#[derive(clap::Args, Debug)]
pub struct ManifestArgs {
    /// Application root; overrides `app.root`
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory a relative root is resolved against; overrides `app.cwd`
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Configuration file to load instead of the default
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}
