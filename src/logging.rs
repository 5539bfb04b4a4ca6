use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

// html5ever reports parser error recovery at debug level on most real pages.
const QUIET_DEPENDENCIES: [&str; 1] = ["html5ever=warn"];

pub fn init() -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}

/// A user-supplied `RUST_LOG` is used as is; otherwise the default level
/// applies with noisy dependencies quieted.
fn build_filter(rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    if let Some(directives) = rust_log
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(DEFAULT_FILTER).context("build log filter")?;
    for directive in QUIET_DEPENDENCIES {
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("parse log directive: {directive}"))?,
        );
    }
    Ok(filter)
}
