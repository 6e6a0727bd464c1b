//! Process-wide display settings consumed by icon resolution.

use std::sync::OnceLock;

use crate::locale::{LanguageTag, system_locale};

/// Environment variable that turns on dark-theme icon conversion when set.
pub const DARK_THEME_ENV: &str = "ICONTREE_ICONS_FOR_DARK_THEME";

/// Environment variable overriding the UI scale percentage.
pub const SCALE_ENV: &str = "ICONTREE_SCALE_PERCENTAGE";

/// Scale percentage used when nothing else is configured.
pub const DEFAULT_SCALE_PERCENTAGE: u32 = 100;

/// UI locale, scale and dark-mode state.
///
/// The engine takes these as a value so tests can inject them; production
/// code uses [`DisplaySettings::from_environment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Locale used to look up localized icon variants.
    pub ui_locale: LanguageTag,
    /// Display scale in percent (100 = no scaling).
    pub ui_scale_percentage: u32,
    /// Whether icons are lightened for a dark UI.
    pub dark_theme_icons: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            ui_locale: LanguageTag::default(),
            ui_scale_percentage: DEFAULT_SCALE_PERCENTAGE,
            dark_theme_icons: false,
        }
    }
}

impl DisplaySettings {
    /// Settings of the running process.
    ///
    /// The environment is read on the first call only; later calls return a
    /// copy of the same values.
    pub fn from_environment() -> Self {
        static SETTINGS: OnceLock<DisplaySettings> = OnceLock::new();
        SETTINGS.get_or_init(Self::read_environment).clone()
    }

    fn read_environment() -> Self {
        let ui_scale_percentage = std::env::var(SCALE_ENV)
            .ok()
            .and_then(|value| parse_scale(&value))
            .unwrap_or(DEFAULT_SCALE_PERCENTAGE);

        let settings = Self {
            ui_locale: system_locale(),
            ui_scale_percentage,
            dark_theme_icons: std::env::var_os(DARK_THEME_ENV).is_some(),
        };
        tracing::debug!(
            target: "icontree::settings",
            locale = %settings.ui_locale,
            scale = settings.ui_scale_percentage,
            dark = settings.dark_theme_icons,
            "read display settings"
        );
        settings
    }

    /// Set the UI locale.
    #[must_use]
    pub fn with_locale(mut self, locale: LanguageTag) -> Self {
        self.ui_locale = locale;
        self
    }

    /// Set the UI scale percentage.
    #[must_use]
    pub fn with_scale_percentage(mut self, percentage: u32) -> Self {
        self.ui_scale_percentage = percentage;
        self
    }

    /// Enable or disable dark-theme icon conversion.
    #[must_use]
    pub fn with_dark_theme_icons(mut self, enabled: bool) -> Self {
        self.dark_theme_icons = enabled;
        self
    }
}

fn parse_scale(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|p| *p > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.ui_scale_percentage, 100);
        assert!(!settings.dark_theme_icons);
        assert_eq!(settings.ui_locale.to_bcp47(), "en-US");
    }

    #[test]
    fn test_builders() {
        let settings = DisplaySettings::default()
            .with_locale(LanguageTag::parse("de-DE"))
            .with_scale_percentage(200)
            .with_dark_theme_icons(true);
        assert_eq!(settings.ui_locale.language, "de");
        assert_eq!(settings.ui_scale_percentage, 200);
        assert!(settings.dark_theme_icons);
    }

    #[test]
    fn test_from_environment_is_stable() {
        assert_eq!(DisplaySettings::from_environment(), DisplaySettings::from_environment());
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("150"), Some(150));
        assert_eq!(parse_scale(" 200 "), Some(200));
        assert_eq!(parse_scale("0"), None);
        assert_eq!(parse_scale("big"), None);
    }
}
