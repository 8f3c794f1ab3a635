use notehide_dom::SelectorList;
use proptest::prelude::*;

proptest! {
    // Arbitrary input is either parsed or rejected, never a panic.
    #[test]
    fn parse_never_panics(input in "\\PC{0,40}") {
        let _ = SelectorList::parse(&input);
    }

    #[test]
    fn contains_selector_matches_values_containing_needle(
        prefix in "[a-z]{0,6}",
        needle in "[a-z]{1,6}",
        suffix in "[a-z]{0,6}",
    ) {
        let selector = format!("[data-testid*=\"{needle}\"]");
        let list = SelectorList::parse(&selector).unwrap();
        let value = format!("{prefix}{needle}{suffix}");
        let attrs = vec![("data-testid".to_string(), value)];
        prop_assert!(list.matches("div", &attrs));
    }

    #[test]
    fn case_flag_ignores_ascii_case(needle in "[a-zA-Z]{1,8}") {
        let selector = format!("[aria-label*=\"{}\" i]", needle.to_ascii_uppercase());
        let list = SelectorList::parse(&selector).unwrap();
        let attrs = vec![("aria-label".to_string(), needle.to_ascii_lowercase())];
        prop_assert!(list.matches("svg", &attrs));
    }
}
