//! Candidate entry names for one icon request.
//!
//! A request for `cmd/sc_bold.png` in locale `de-CH` tries, in order:
//!
//! ```text
//! cmd/de-CH/sc_bold.png  cmd/de-CH/sc_bold.svg
//! cmd/de/sc_bold.png     cmd/de/sc_bold.svg
//! cmd/sc_bold.png        cmd/sc_bold.svg
//! ```
//!
//! Each name is alias-resolved before its extension is replaced. Raster
//! entries are preferred over vector entries at every level. Nothing is
//! deduplicated; the archive decides what exists.

use crate::links::LinkTable;

/// Extensions tried for every candidate, in preference order.
pub const EXTENSIONS: [&str; 2] = ["png", "svg"];

/// Build the ordered list of entry names to look up.
///
/// `locale_fallbacks` is ordered most specific first. Localized variants are
/// only produced for names with a directory component.
pub fn candidate_paths(name: &str, locale_fallbacks: &[String], links: &LinkTable) -> Vec<String> {
    let mut paths = Vec::with_capacity((locale_fallbacks.len() + 1) * EXTENSIONS.len());

    if let Some(slash) = name.rfind('/') {
        for locale in locale_fallbacks {
            let localized = localized_path(name, slash, locale);
            push_with_extensions(&mut paths, links.resolve(&localized));
        }
    }

    push_with_extensions(&mut paths, links.resolve(name));
    paths
}

/// Insert `locale` as a path segment in front of the file name.
fn localized_path(name: &str, slash: usize, locale: &str) -> String {
    format!("{}{}{}", &name[..=slash], locale, &name[slash..])
}

/// Strip the text after the last `.`; names without a dot are kept whole.
pub fn strip_extension(name: &str) -> &str {
    name.rfind('.').map_or(name, |dot| &name[..dot])
}

fn push_with_extensions(paths: &mut Vec<String>, name: &str) {
    let stem = strip_extension(name);
    paths.extend(EXTENSIONS.iter().map(|ext| format!("{stem}.{ext}")));
}
