use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use themeswitch_cli::cli::Cli;
use themeswitch_cli::{render, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "themeswitch={default_level},themeswitch_cli={default_level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let report = run(&cli)?;
    println!("{}", render(&report, cli.output)?);
    Ok(())
}
