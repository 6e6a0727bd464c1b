//! Language tags and their fallback strings.
//!
//! Localized icons live in a per-locale subdirectory (`cmd/de/sc_bold.png`).
//! A request for `de-CH` tries `de-CH` first and then `de`.

/// Tag used when the system reports no usable locale.
pub const DEFAULT_LOCALE: &str = "en-US";

/// A parsed BCP 47 language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    /// The language code (e.g., "en", "sr").
    pub language: String,
    /// The script code (e.g., "Latn"), if present.
    pub script: Option<String>,
    /// The region code (e.g., "US", "419"), if present.
    pub region: Option<String>,
    /// Remaining subtags (variants), in order.
    pub variants: Vec<String>,
}

impl LanguageTag {
    /// Parse a locale identifier.
    ///
    /// Accepts BCP 47 (`sr-Latn-RS`) as well as POSIX forms (`de_DE.UTF-8`,
    /// `ca_ES@valencia`); the encoding and modifier suffixes are dropped.
    pub fn parse(identifier: &str) -> Self {
        let identifier = identifier
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        let identifier = if identifier.is_empty() || identifier == "C" || identifier == "POSIX" {
            DEFAULT_LOCALE
        } else {
            identifier
        };

        let mut parts = identifier.split(['-', '_']).filter(|p| !p.is_empty());
        let language = parts.next().unwrap_or("en").to_lowercase();

        let mut script = None;
        let mut region = None;
        let mut variants = Vec::new();

        for part in parts {
            // Scripts are 4 letters, title case (e.g., "Latn")
            if script.is_none()
                && region.is_none()
                && part.len() == 4
                && part.chars().all(|c| c.is_ascii_alphabetic())
            {
                let mut chars = part.chars();
                let first = chars.next().map(|c| c.to_ascii_uppercase());
                script = first.map(|f| f.to_string() + &chars.as_str().to_ascii_lowercase());
            }
            // Regions are 2 letters (e.g., "US") or 3 digits (e.g., "419")
            else if region.is_none()
                && ((part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
                    || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit())))
            {
                region = Some(part.to_ascii_uppercase());
            } else {
                variants.push(part.to_string());
            }
        }

        Self {
            language,
            script,
            region,
            variants,
        }
    }

    /// The normalized tag, e.g. `sr-Latn-RS`.
    pub fn to_bcp47(&self) -> String {
        let mut tag = self.language.clone();
        for part in self
            .script
            .iter()
            .chain(self.region.iter())
            .chain(self.variants.iter())
        {
            tag.push('-');
            tag.push_str(part);
        }
        tag
    }

    /// Fallback strings, most specific first, without duplicates.
    ///
    /// `sr-Latn-RS` yields `sr-Latn-RS`, `sr-Latn`, `sr-RS`, `sr`.
    pub fn fallback_strings(&self) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        let mut push = |s: String| {
            if !result.contains(&s) {
                result.push(s);
            }
        };

        push(self.to_bcp47());

        if !self.variants.is_empty() {
            let mut without_variants = self.clone();
            without_variants.variants.clear();
            push(without_variants.to_bcp47());
        }
        if let Some(script) = &self.script {
            push(format!("{}-{}", self.language, script));
        }
        if let Some(region) = &self.region {
            push(format!("{}-{}", self.language, region));
        }
        push(self.language.clone());

        result
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::parse(DEFAULT_LOCALE)
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_bcp47())
    }
}

/// Current system UI locale, as reported by the platform.
pub fn system_locale() -> LanguageTag {
    let identifier = sys_locale::get_locale().unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    LanguageTag::parse(&identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let tag = LanguageTag::parse("en-US");
        assert_eq!(tag.language, "en");
        assert_eq!(tag.region.as_deref(), Some("US"));
        assert_eq!(tag.script, None);
        assert_eq!(tag.to_bcp47(), "en-US");
    }

    #[test]
    fn test_parse_posix() {
        assert_eq!(LanguageTag::parse("de_DE.UTF-8").to_bcp47(), "de-DE");
        assert_eq!(LanguageTag::parse("C").to_bcp47(), "en-US");
        assert_eq!(LanguageTag::parse("").to_bcp47(), "en-US");
    }

    #[test]
    fn test_parse_script_and_region() {
        let tag = LanguageTag::parse("sr-latn-rs");
        assert_eq!(tag.script.as_deref(), Some("Latn"));
        assert_eq!(tag.region.as_deref(), Some("RS"));
    }

    #[test]
    fn test_fallback_strings() {
        assert_eq!(LanguageTag::parse("en-US").fallback_strings(), ["en-US", "en"]);
        assert_eq!(LanguageTag::parse("de").fallback_strings(), ["de"]);
        assert_eq!(
            LanguageTag::parse("sr-Latn-RS").fallback_strings(),
            ["sr-Latn-RS", "sr-Latn", "sr-RS", "sr"]
        );
        assert_eq!(
            LanguageTag::parse("ca-ES-valencia").fallback_strings(),
            ["ca-ES-valencia", "ca-ES", "ca"]
        );
        assert_eq!(LanguageTag::parse("es-419").fallback_strings(), ["es-419", "es"]);
    }
}
