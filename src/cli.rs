use clap::{Args, Parser, Subcommand};

use crate::archive::ARCHIVE_FILE_NAME;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Crawl(CrawlArgs),
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// URL of the XML sitemap listing the pages to crawl.
    #[arg(long)]
    pub sitemap_url: Option<String>,

    /// Output path for the Markdown archive.
    #[arg(long, default_value = ARCHIVE_FILE_NAME)]
    pub out: String,

    /// Overwrite the output archive if it exists.
    #[arg(long)]
    pub force: bool,

    /// Timeout for each page request.
    #[arg(long, default_value_t = 10)]
    pub page_timeout_secs: u64,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Archive produced by `crawl`.
    #[arg(long)]
    pub archive: String,
}
