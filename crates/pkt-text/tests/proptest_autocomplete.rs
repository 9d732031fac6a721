//! Property-based tests for autocomplete.
//!
//! 1. A completion extends what was typed, ignoring case.
//! 2. A completion is a prefix of every matching choice.
//! 3. No completion is offered when no choice matches.

use pkt_text::autocomplete;
use proptest::prelude::*;

fn matching<'a>(typed: &str, choices: &'a [String]) -> Vec<&'a str> {
    choices
        .iter()
        .map(String::as_str)
        .filter(|c| c.len() > typed.len() && c[..typed.len()].eq_ignore_ascii_case(typed))
        .collect()
}

proptest! {
    #[test]
    fn completion_extends_typed(typed in "[A-Ca-c]{0,3}", choices in prop::collection::vec("[A-Ca-c]{1,6}", 0..8)) {
        if let Some(done) = autocomplete(&typed, &choices) {
            prop_assert!(done.len() > typed.len());
            prop_assert!(done[..typed.len()].eq_ignore_ascii_case(&typed));
        }
    }

    #[test]
    fn completion_prefixes_every_match(typed in "[A-Ca-c]{0,3}", choices in prop::collection::vec("[A-Ca-c]{1,6}", 0..8)) {
        if let Some(done) = autocomplete(&typed, &choices) {
            for choice in matching(&typed, &choices) {
                prop_assert!(choice.starts_with(&done), "{} does not start with {}", choice, done);
            }
        }
    }

    #[test]
    fn no_match_no_completion(typed in "[x-z]{1,3}", choices in prop::collection::vec("[A-Ca-c]{1,6}", 0..8)) {
        prop_assert_eq!(autocomplete(&typed, &choices), None);
    }
}
