use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use page::{PageConfig, DEFAULT_OUTPUT};
use shared::error::Locale;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Builds the MSLearn question page")]
struct Cli {
    /// Page language: ko or en.
    #[arg(long, default_value_t = Locale::Ko, global = true)]
    locale: Locale,
    /// Prefix for the API routes, e.g. /backend. Empty requests them root-relative.
    #[arg(long, default_value = "", global = true)]
    api_base: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the page to a file.
    Generate {
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
    },
    /// Write the page to stdout.
    Print,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();
    let config = PageConfig::new(cli.locale, cli.api_base);

    match cli.command {
        Command::Generate { out } => {
            let written = page::write_document(&config, &out)
                .with_context(|| format!("failed to generate {}", out.display()))?;
            info!(path = %written.display(), "question page generated");
            println!("wrote {}", written.display());
        }
        Command::Print => {
            let document = page::render_document(&config)?;
            io::stdout()
                .lock()
                .write_all(document.as_bytes())
                .context("failed to write page to stdout")?;
        }
    }

    Ok(())
}
