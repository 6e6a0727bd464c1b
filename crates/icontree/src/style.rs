//! Style fallback chain.
//!
//! Every style falls back to another one until the terminal (empty) style is
//! reached. Unknown styles fall back to [`DEFAULT_STYLE`], so every style
//! reaches a terminal style (`colibre` or `helpimg`) in at most three steps
//! and a chain yields at most four styles.

/// The style every unknown style falls back to.
pub const DEFAULT_STYLE: &str = "colibre";

/// Returns the next style to try after `style`, or `""` when the chain ends.
pub fn fallback_style(style: &str) -> &'static str {
    match style {
        "colibre" | "helpimg" => "",
        "sifr" | "breeze_dark" => "breeze",
        "sifr_dark" => "breeze_dark",
        _ => DEFAULT_STYLE,
    }
}

/// Iterator over a style and all of its fallbacks.
///
/// ```
/// use icontree::style::FallbackChain;
///
/// let chain: Vec<_> = FallbackChain::new("sifr_dark").collect();
/// assert_eq!(chain, ["sifr_dark", "breeze_dark", "breeze", "colibre"]);
/// ```
#[derive(Debug, Clone)]
pub struct FallbackChain {
    next: Option<String>,
}

impl FallbackChain {
    /// Start a chain at `style`. An empty style yields nothing.
    pub fn new(style: impl Into<String>) -> Self {
        let style = style.into();
        Self {
            next: (!style.is_empty()).then_some(style),
        }
    }
}

impl Iterator for FallbackChain {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let current = self.next.take()?;
        let fallback = fallback_style(&current);
        if !fallback.is_empty() {
            self.next = Some(fallback.to_string());
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_table() {
        assert_eq!(fallback_style("colibre"), "");
        assert_eq!(fallback_style("helpimg"), "");
        assert_eq!(fallback_style("sifr"), "breeze");
        assert_eq!(fallback_style("breeze_dark"), "breeze");
        assert_eq!(fallback_style("sifr_dark"), "breeze_dark");
        assert_eq!(fallback_style("breeze"), "colibre");
        assert_eq!(fallback_style("no_such_style"), "colibre");
    }

    #[test]
    fn test_every_style_reaches_terminal_within_three_steps() {
        for style in [
            "colibre", "helpimg", "sifr", "sifr_dark", "breeze", "breeze_dark", "elementary",
            "karasa_jaga",
        ] {
            let mut current = style;
            let mut steps = 0;
            while !fallback_style(current).is_empty() {
                current = fallback_style(current);
                steps += 1;
            }
            assert!(steps <= 3, "{style} took {steps} steps");
            assert!(matches!(current, "colibre" | "helpimg"), "{style} ended at {current}");
            assert!(FallbackChain::new(style).count() <= 4, "{style}");
            // Deterministic
            assert_eq!(fallback_style(style), fallback_style(style));
        }
        assert_eq!(FallbackChain::new("sifr_dark").count(), 4);
    }

    #[test]
    fn test_chain_iterator() {
        let chain: Vec<_> = FallbackChain::new("breeze_dark").collect();
        assert_eq!(chain, ["breeze_dark", "breeze", "colibre"]);

        let chain: Vec<_> = FallbackChain::new("helpimg").collect();
        assert_eq!(chain, ["helpimg"]);

        assert_eq!(FallbackChain::new("").count(), 0);
    }
}
