use anyhow::Context as _;

use crate::cli::InspectArgs;

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(&args.archive).with_context(|| format!("read archive: {}", args.archive))?;
    let entries = crate::archive::read_entries(&bytes)
        .with_context(|| format!("open archive: {}", args.archive))?;

    tracing::debug!(archive = %args.archive, entries = entries.len(), "inspect archive");
    for entry in entries {
        println!("{}\t{}", entry.name, entry.content.len());
    }
    Ok(())
}
