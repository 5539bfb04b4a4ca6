use std::collections::HashMap;

/// Outcome of converting a single page. Always carries Markdown; a failed
/// fetch carries an error document plus the error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPage {
    pub url: String,
    pub markdown: String,
    pub error: Option<String>,
}

impl ConvertedPage {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Filename → Markdown mapping kept in crawl order.
///
/// Re-inserting an existing filename replaces its content in place, so the
/// entry keeps the position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the replaced content when `filename` was already present.
    pub fn insert(&mut self, filename: String, markdown: String) -> Option<String> {
        if let Some(&idx) = self.positions.get(&filename) {
            return Some(std::mem::replace(&mut self.entries[idx].1, markdown));
        }

        self.positions.insert(filename.clone(), self.entries.len());
        self.entries.push((filename, markdown));
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(filename, markdown)| (filename.as_str(), markdown.as_str()))
    }
}
