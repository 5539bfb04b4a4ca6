use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::CrawlArgs;
use crate::pipeline::{CrawlOptions, CrawlOutcome};
use crate::status::TracingSink;

pub fn run(args: CrawlArgs) -> anyhow::Result<()> {
    let out_path = PathBuf::from(&args.out);
    if out_path.exists() && !args.force {
        anyhow::bail!("archive output already exists: {}", out_path.display());
    }

    let options = CrawlOptions::new(args.sitemap_url.unwrap_or_default())
        .with_page_timeout(Duration::from_secs(args.page_timeout_secs));

    let outcome = crate::pipeline::run(&options, &mut TracingSink).context("crawl sitemap")?;
    let report = match outcome {
        CrawlOutcome::Ready(report) => report,
        CrawlOutcome::Warned(warning) => anyhow::bail!("{warning}"),
    };

    report
        .archive
        .write_to(&out_path, args.force)
        .context("write archive")?;

    tracing::info!(
        out = %out_path.display(),
        entries = report.archive.entry_count(),
        pages = report.pages,
        failed = report.failed.len(),
        "wrote archive"
    );
    Ok(())
}
