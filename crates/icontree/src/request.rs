//! Icon requests and the parameters derived from them.

use crate::settings::DisplaySettings;

/// Per-request opt-outs from process-wide display settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ImageLoadFlags {
    /// Never lighten the icon, even when dark-theme icons are enabled.
    pub ignore_dark_theme: bool,
    /// Ignore the UI scale; use the request's override (or 100%) instead.
    pub ignore_scale: bool,
}

impl ImageLoadFlags {
    /// No opt-outs.
    pub const NONE: Self = Self {
        ignore_dark_theme: false,
        ignore_scale: false,
    };

    /// Set the ignore-dark-theme flag.
    #[must_use]
    pub fn ignore_dark_theme(mut self, ignore: bool) -> Self {
        self.ignore_dark_theme = ignore;
        self
    }

    /// Set the ignore-scale flag.
    #[must_use]
    pub fn ignore_scale(mut self, ignore: bool) -> Self {
        self.ignore_scale = ignore;
        self
    }
}

/// A request to load one icon.
///
/// # Example
///
/// ```
/// use icontree::{IconRequest, ImageLoadFlags};
///
/// let request = IconRequest::new("cmd/lc_open.png")
///     .with_style("breeze")
///     .with_flags(ImageLoadFlags::NONE.ignore_scale(true))
///     .with_scale_override(200);
/// assert_eq!(request.style, "breeze");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    /// Logical icon name, e.g. `cmd/lc_open.png`.
    pub name: String,
    /// Requested style. Empty means the engine's current style.
    pub style: String,
    /// Whether the caller wants a localized icon. Memory cache entries only
    /// serve requests with the same flag.
    pub localized: bool,
    /// Opt-outs from display settings.
    pub flags: ImageLoadFlags,
    /// Scale percentage used when [`ImageLoadFlags::ignore_scale`] is set.
    pub scale_override: Option<u32>,
}

impl IconRequest {
    /// Request `name` in the default style, not localized.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: String::new(),
            localized: false,
            flags: ImageLoadFlags::NONE,
            scale_override: None,
        }
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the localized flag.
    #[must_use]
    pub fn localized(mut self, localized: bool) -> Self {
        self.localized = localized;
        self
    }

    /// Set the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ImageLoadFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the explicit scale percentage.
    #[must_use]
    pub fn with_scale_override(mut self, percentage: u32) -> Self {
        self.scale_override = Some(percentage);
        self
    }

    /// Effective scale percentage.
    ///
    /// The UI scale applies unless the request ignores it; then a positive
    /// override is used, or 100.
    pub fn scale_percentage(&self, settings: &DisplaySettings) -> u32 {
        if !self.flags.ignore_scale {
            settings.ui_scale_percentage
        } else {
            self.scale_override.filter(|p| *p > 0).unwrap_or(100)
        }
    }

    /// Whether the icon is lightened for a dark UI.
    pub fn convert_to_dark_theme(&self, settings: &DisplaySettings) -> bool {
        !self.flags.ignore_dark_theme && settings.dark_theme_icons
    }

    /// The decode parameters this request resolves to.
    pub fn decode_params(&self, settings: &DisplaySettings) -> DecodeParams {
        DecodeParams {
            scale_percentage: self.scale_percentage(settings),
            dark_theme: self.convert_to_dark_theme(settings),
        }
    }
}

/// Effective transform parameters for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeParams {
    /// Scale in percent.
    pub scale_percentage: u32,
    /// Lighten for a dark UI.
    pub dark_theme: bool,
}

impl DecodeParams {
    /// Unscaled, no dark conversion.
    pub const IDENTITY: Self = Self {
        scale_percentage: 100,
        dark_theme: false,
    };

    /// Disk cache variant tag, e.g. `150` or `150-dark`.
    pub fn variant_tag(&self) -> String {
        if self.dark_theme {
            format!("{}-dark", self.scale_percentage)
        } else {
            self.scale_percentage.to_string()
        }
    }

    /// Scale as a factor (150% -> 1.5).
    pub fn scale_factor(&self) -> f64 {
        f64::from(self.scale_percentage) / 100.0
    }
}
