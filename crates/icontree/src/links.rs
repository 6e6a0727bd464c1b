//! Link alias table parsed from an icon set's `links.txt`.
//!
//! Icon sets ship many icons that are just another icon under a different
//! name. Rather than duplicating the image, the archive lists the alias in
//! `links.txt`:
//!
//! ```text
//! # alias                  canonical
//! cmd/lc_paste.png cmd/lc_pastespecial.png
//! ```
//!
//! Tokens are separated by a single space. Blank lines and lines starting
//! with `#` are ignored; lines missing a token are ignored with a warning.

use std::collections::HashMap;

/// Name of the manifest entry inside an icon set archive.
pub const LINKS_ENTRY: &str = "links.txt";

/// File name prefix of the large-icon family.
const LARGE_PREFIX: &str = "lc_";

/// Maps alias entry names to canonical entry names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    links: HashMap<String, String>,
}

impl LinkTable {
    /// Create an empty table. Every name resolves to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the contents of a `links.txt` manifest.
    ///
    /// Parsing never fails: malformed lines are logged and skipped.
    pub fn parse(content: &str) -> Self {
        let mut table = Self::new();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            if line.is_empty() {
                continue;
            }

            let mut tokens = line.split(' ');
            let alias = tokens.next().unwrap_or_default();
            let canonical = tokens.next().unwrap_or_default();

            if alias.starts_with('#') {
                continue;
            }
            if alias.is_empty() || canonical.is_empty() {
                tracing::warn!(
                    target: "icontree::links",
                    line = line_number,
                    "incomplete link in {LINKS_ENTRY}, skipping"
                );
                continue;
            }

            table.insert(alias, canonical);
        }

        tracing::debug!(target: "icontree::links", count = table.len(), "parsed icon links");
        table
    }

    /// Add a link. When both names belong to the large-icon family
    /// (`dir/lc_name`), the matching `dir/32/name` link is added as well.
    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        let alias = alias.into();
        let canonical = canonical.into();

        if let (Some(alias_32), Some(canonical_32)) =
            (large_to_32_path(&alias), large_to_32_path(&canonical))
        {
            self.links.insert(alias_32, canonical_32);
        }
        self.links.insert(alias, canonical);
    }

    /// Canonical name for `name`, or `name` itself when it is not an alias.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.links.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Number of links in the table.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the table has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// `cmd/lc_open.png` -> `cmd/32/open.png`. Names without a directory or
/// without the large prefix have no 32px form.
fn large_to_32_path(path: &str) -> Option<String> {
    let (dir, file) = path.rsplit_once('/')?;
    let stem = file.strip_prefix(LARGE_PREFIX)?;
    Some(format!("{dir}/32/{stem}"))
}
