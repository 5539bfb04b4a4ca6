const SCHEME_PREFIXES: [&str; 2] = ["https://", "http://"];
const SEPARATORS: [char; 4] = ['/', '?', '&', '='];

/// Derives the archive entry name for a page URL.
///
/// Case is preserved. Distinct URLs may map to the same name; callers store
/// the later page over the earlier one.
#[must_use]
pub fn safe_filename(url: &str) -> String {
    let without_scheme = SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(*prefix))
        .unwrap_or(url);

    let mut name = without_scheme.replace(SEPARATORS, "_");
    if !name.ends_with(".md") {
        name.push_str(".md");
    }
    name
}
