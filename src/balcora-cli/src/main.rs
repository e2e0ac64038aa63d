mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

/// Log to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Emit {
            input,
            output,
            stem,
            stdout,
            backup,
            force,
        } => {
            let config = Config::load()?;
            let options = commands::emit::EmitOptions {
                output,
                stem,
                stdout,
                backup,
                force,
            };
            commands::emit::handle(&input, options, &config)?;
        }

        Commands::Check { input, quiet } => {
            commands::check::handle(&input, quiet)?;
        }

        Commands::Vocab { name } => {
            commands::vocab::handle(name.as_deref())?;
        }

        Commands::Configure {
            output_dir,
            stem,
            backup,
            show,
        } => {
            commands::configure::handle(output_dir, stem, backup, show)?;
        }
    }

    Ok(())
}
