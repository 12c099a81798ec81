mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "monobmp=debug,monobmp_core=debug".to_string()
        } else {
            "monobmp=info,monobmp_core=warn".to_string()
        }
    });

    // Log to stderr so stdout carries only the conversion report
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Batch {
            input_dir,
            output_dir,
            args,
        } => commands::batch(&config, input_dir, output_dir, &args),
        Commands::Convert {
            input,
            output,
            args,
        } => commands::convert(&config, &input, output, &args),
        Commands::ShowConfig { args } => commands::show_config(&config, &args),
    }
}
