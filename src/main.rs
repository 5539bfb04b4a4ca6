use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    sitemap2md::logging::init().context("init logging")?;

    let cli = sitemap2md::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        sitemap2md::cli::Command::Crawl(args) => {
            sitemap2md::crawl::run(args).context("crawl")?;
        }
        sitemap2md::cli::Command::Inspect(args) => {
            sitemap2md::inspect::run(args).context("inspect")?;
        }
    }

    Ok(())
}
