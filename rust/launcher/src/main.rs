//! YARN application launcher CLI
//!
//! Builds the `hadoop jar` submission command for the parameter-server
//! application and runs it, exiting with the client's exit code.

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use yarn_launch::{LaunchError, Launcher, LauncherConfig, SystemExecutor};
use yarn_launch_config::ContainerResources;

#[derive(Parser)]
#[command(name = "yarn-launch", about = "Submit the application to YARN")]
struct Cli {
    /// Path to a launcher.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the command without running it
    #[arg(long)]
    dry_run: bool,

    /// Resource manager client binary (default: hadoop)
    #[arg(long)]
    client_binary: Option<String>,

    /// Resolve paths from this file instead of the running executable
    #[arg(long)]
    launcher_path: Option<PathBuf>,

    /// Number of directory levels from the launcher to the application root
    #[arg(long)]
    app_root_depth: Option<usize>,

    #[command(flatten)]
    resources: ResourceOverrides,
}

/// Container resource overrides; unset flags keep the configured value.
#[derive(Args)]
struct ResourceOverrides {
    /// Per-container memory in MB
    #[arg(long)]
    container_memory: Option<u64>,
    /// Per-container virtual cores
    #[arg(long)]
    container_vcores: Option<u64>,
    /// Application master memory in MB
    #[arg(long)]
    master_memory: Option<u64>,
    /// Scheduling priority
    #[arg(long)]
    priority: Option<u64>,
    /// Number of worker nodes
    #[arg(long)]
    num_nodes: Option<u64>,
}

impl ResourceOverrides {
    fn apply(&self, res: &mut ContainerResources) {
        for (value, slot) in [
            (self.container_memory, &mut res.container_memory),
            (self.container_vcores, &mut res.container_vcores),
            (self.master_memory, &mut res.master_memory),
            (self.priority, &mut res.priority),
            (self.num_nodes, &mut res.num_nodes),
        ] {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

fn load_config(cli: &Cli) -> Result<LauncherConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => LauncherConfig::load(path)?,
        None => LauncherConfig::default(),
    };
    if let Some(ref binary) = cli.client_binary {
        config.client.binary.clone_from(binary);
    }
    if let Some(depth) = cli.app_root_depth {
        config.layout.app_root_depth = depth;
    }
    cli.resources.apply(&mut config.resources);
    Ok(config)
}

fn run(cli: &Cli, config: LauncherConfig) -> Result<u8, LaunchError> {
    let launcher = Launcher::new(config, SystemExecutor);

    let ctx = match &cli.launcher_path {
        Some(path) => launcher.resolve(path)?,
        None => yarn_launch::resolve_paths(launcher.config().layout.app_root_depth)?,
    };
    let command = launcher.command(&ctx)?;
    println!("{command}");

    if cli.dry_run {
        return Ok(0);
    }
    launcher.execute(&command)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
