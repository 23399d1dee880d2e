//! Page effects: in-page anchor scrolling, reveal-on-scroll and the loading
//! placeholder.

/// Elements that fade in when they scroll into view.
pub const FADE_IN_SELECTOR: &str = ".card, .crop-badge";
pub const FADE_IN_CLASS: &str = "fade-in";

/// Links handled with smooth scrolling instead of a jump.
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Placeholder shown in a container while its content loads.
pub const LOADING_MARKUP: &str = "<div class=\"text-center\"><div class=\"spinner-border text-success\" role=\"status\"><span class=\"visually-hidden\">Loading...</span></div></div>";

/// When an element counts as visible for the fade-in.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

/// Selector for the element an in-page link points at. A bare `#` or any
/// other href has no target.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() && !id.contains(char::is_whitespace) => Some(href),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#history"), Some("#history"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("# top"), None);
        assert_eq!(anchor_target("/dashboard#history"), None);
    }

    #[test]
    fn loading_markup_is_an_accessible_spinner() {
        assert!(LOADING_MARKUP.contains("spinner-border text-success"));
        assert!(LOADING_MARKUP.contains("role=\"status\""));
        assert!(LOADING_MARKUP.contains("visually-hidden"));
    }

    #[test]
    fn reveal_defaults() {
        let options = RevealOptions::default();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }
}
