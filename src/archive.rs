use std::fs::OpenOptions;
use std::io::{Cursor, Read as _, Write as _};
use std::path::Path;

use anyhow::Context as _;
use zip::write::SimpleFileOptions;

use crate::formats::ResultSet;

pub const ARCHIVE_FILE_NAME: &str = "crawled_markdown_files.zip";
pub const ARCHIVE_MIME_TYPE: &str = "application/zip";

/// A finished ZIP archive held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    bytes: Vec<u8>,
    entry_count: usize,
}

impl Archive {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn write_to(&self, out_path: &Path, force: bool) -> anyhow::Result<()> {
        if let Some(parent) = out_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create archive output dir: {}", parent.display()))?;
        }

        let mut options = OpenOptions::new();
        options.write(true);
        if force {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut file = options
            .open(out_path)
            .with_context(|| format!("open archive output: {}", out_path.display()))?;
        file.write_all(&self.bytes)
            .with_context(|| format!("write archive: {}", out_path.display()))?;
        file.flush()
            .with_context(|| format!("flush archive: {}", out_path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub content: String,
}

/// Package every result as a deflated entry, in crawl order.
pub fn build(results: &ResultSet) -> anyhow::Result<Archive> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (filename, markdown) in results.iter() {
        zip.start_file(filename, options)
            .with_context(|| format!("archive start_file: {filename}"))?;
        zip.write_all(markdown.as_bytes())
            .with_context(|| format!("archive write: {filename}"))?;
    }

    let cursor = zip.finish().context("archive finish zip")?;
    Ok(Archive {
        bytes: cursor.into_inner(),
        entry_count: results.len(),
    })
}

pub fn read_entries(bytes: &[u8]) -> anyhow::Result<Vec<ArchiveEntry>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("open zip archive")?;

    let mut entries = Vec::with_capacity(archive.len());
    for idx in 0..archive.len() {
        let mut file = archive
            .by_index(idx)
            .with_context(|| format!("open zip entry #{idx}"))?;
        let name = file.name().to_owned();
        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("read zip entry: {name}"))?;
        entries.push(ArchiveEntry { name, content });
    }

    Ok(entries)
}
