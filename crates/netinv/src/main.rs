mod cli;
mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netinv_core::Inventory;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = registry_path(&cli.global);

    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "netinv", &mut std::io::stdout());
            Ok(())
        }

        Command::Init => {
            netinv_config::save_new_config(&path, &netinv_config::starter_config())?;
            output::print_note(
                &format!("Starter registry written to {}", path.display()),
                cli.global.quiet,
            );
            Ok(())
        }

        // Everything else reads the registry
        cmd => {
            let (registry, mut collector) = netinv_config::load_registry(&path);
            if let Some(secs) = cli.global.timeout {
                collector.timeout = Duration::from_secs(secs.max(1));
            }
            let inventory = Inventory::new(registry, collector);

            tracing::debug!(command = ?cmd, registry = %path.display(), "dispatching command");
            commands::dispatch(cmd, &inventory, &path, &cli.global).await
        }
    }
}

fn registry_path(global: &GlobalOpts) -> PathBuf {
    global
        .registry
        .clone()
        .unwrap_or_else(netinv_config::registry_path)
}
