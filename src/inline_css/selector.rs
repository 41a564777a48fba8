//! Selector classification
//!
//! Decides whether the declarations of a selector can be copied onto
//! matching elements or have to stay in a `<head>` style block. Pseudo-classes
//! and pseudo-elements that depend on interaction or document position have no
//! meaning as an inline `style` attribute, so those selectors keep their rule
//! in the head.

/// Pseudo forms that can never be expressed through an inline `style` attribute.
///
/// Matched as plain substrings, case-sensitive as authored.
pub const HEAD_ONLY_PSEUDO_FORMS: [&str; 9] = [
    ":hover",
    ":before",
    ":after",
    "::before",
    "::after",
    ":active",
    ":focus",
    ":first-child",
    ":last-child",
];

/// Where the declarations of a selector end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorPlacement {
    /// Declarations are appended to the `style` attribute of every match
    Inlineable,
    /// The whole rule is kept in the head style block
    MustStayInHead,
}

impl SelectorPlacement {
    #[must_use]
    pub fn is_inlineable(self) -> bool {
        self == SelectorPlacement::Inlineable
    }
}

/// Classify a single selector string
#[must_use]
pub fn classify(selector: &str) -> SelectorPlacement {
    if HEAD_ONLY_PSEUDO_FORMS
        .iter()
        .any(|form| selector.contains(form))
    {
        SelectorPlacement::MustStayInHead
    } else {
        SelectorPlacement::Inlineable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_selectors_are_inlineable() {
        for selector in ["p", ".btn", "#header", "table td", "a[href]", "ul > li", "h1.title"] {
            assert_eq!(classify(selector), SelectorPlacement::Inlineable, "{selector}");
        }
    }

    #[test]
    fn test_pseudo_forms_stay_in_head() {
        for selector in [
            "a:hover",
            ".btn:focus",
            "button:active",
            "li:first-child",
            "li:last-child",
            "p:before",
            "p::before",
            "p:after",
            "p::after",
        ] {
            assert_eq!(classify(selector), SelectorPlacement::MustStayInHead, "{selector}");
        }
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        assert_eq!(classify("a:HOVER"), SelectorPlacement::Inlineable);
    }

    #[test]
    fn test_other_pseudo_classes_are_inlineable() {
        assert!(classify("li:nth-child(2)").is_inlineable());
        assert!(classify("a:visited").is_inlineable());
    }

    proptest! {
        #[test]
        fn prop_any_selector_with_hover_stays_in_head(prefix in "[a-z.#]{0,12}", suffix in "[a-z ]{0,12}") {
            let selector = format!("{prefix}:hover{suffix}");
            prop_assert_eq!(classify(&selector), SelectorPlacement::MustStayInHead);
        }

        #[test]
        fn prop_selectors_without_colon_are_inlineable(selector in "[a-z.#> \\[\\]=-]{1,24}") {
            prop_assert_eq!(classify(&selector), SelectorPlacement::Inlineable);
        }
    }
}
