//! gitmcp: Git, GitHub CLI and GitKraken CLI tools served over MCP stdio.
//!
//! ```bash
//! # Serve (default)
//! gitmcp
//!
//! # Show the resolved configuration with the token masked
//! gitmcp config --show --validate
//!
//! # Print the tools available on this machine
//! gitmcp tools
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;

use gitmcp_tools::{
    CommandRunner, Config, Detectors, Dispatcher, GitServer, ProcessRunner, ToolContext, catalogue,
};

#[derive(Parser)]
#[command(name = "gitmcp", version)]
#[command(about = "Git, GitHub and GitKraken operations as MCP tools")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file, replacing the default search locations
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory the tools run in
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve MCP over stdio
    Serve,
    /// Inspect the resolved configuration
    Config {
        /// Print the configuration as JSON
        #[arg(long)]
        show: bool,
        /// Exit with an error when the configuration is invalid
        #[arg(long)]
        validate: bool,
    },
    /// Probe installed CLIs and list the tools they enable
    Tools,
}

fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve the working directory")?,
    };
    let config = match &cli.config {
        Some(path) => Config::load_explicit(path),
        None => Config::load(&cwd),
    }
    .context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cwd, config).await,
        Command::Config { show, validate } => show_config(&config, show, validate),
        Command::Tools => list_tools(cwd, config).await,
    }
}

async fn dispatcher(cwd: PathBuf, config: Config) -> Result<Dispatcher> {
    config.validate()?;
    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner::new(config.max_concurrent_processes));
    let detectors = Detectors::new(runner.clone(), &config);
    let context = ToolContext::new(cwd, config, runner);
    Ok(Dispatcher::new(context, catalogue(&detectors)).await)
}

async fn serve(cwd: PathBuf, config: Config) -> Result<()> {
    log::info!("Starting gitmcp in {}", cwd.display());
    let server = GitServer::new(Arc::new(dispatcher(cwd, config).await?));

    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP service")?;
    service.waiting().await?;

    log::info!("Server shutdown complete");
    Ok(())
}

fn show_config(config: &Config, show: bool, validate: bool) -> Result<()> {
    if show || !validate {
        println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    }
    if validate {
        config.validate()?;
        eprintln!("Configuration is valid");
    }
    Ok(())
}

async fn list_tools(cwd: PathBuf, config: Config) -> Result<()> {
    let dispatcher = dispatcher(cwd, config).await?;
    for tool in dispatcher.list().await {
        println!("{}\t{}", tool.name(), tool.description());
    }
    Ok(())
}
