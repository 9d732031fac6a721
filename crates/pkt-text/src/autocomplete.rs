#![forbid(unsafe_code)]

//! Completion of a typed prefix against a field's choice list.

/// Length of the longest common prefix of `a` and `b` (case-sensitive).
#[must_use]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

/// Complete `typed` against `choices`.
///
/// Every choice longer than `typed` that starts with it (ignoring ASCII
/// case) is a match. The result is the longest common prefix of all
/// matches, so a single match completes fully and several matches complete
/// only as far as they agree. Returns `None` when nothing would be added.
///
/// ```
/// use pkt_text::autocomplete;
///
/// let choices = ["ALPHA", "ALPS", "BETA"];
/// assert_eq!(autocomplete("AL", &choices).as_deref(), Some("ALP"));
/// assert_eq!(autocomplete("b", &choices).as_deref(), Some("BETA"));
/// assert_eq!(autocomplete("C", &choices), None);
/// ```
#[must_use]
pub fn autocomplete<S: AsRef<str>>(typed: &str, choices: &[S]) -> Option<String> {
    let mut best: Option<&str> = None;
    for choice in choices.iter().map(AsRef::as_ref) {
        let matches = choice.len() > typed.len()
            && choice.is_char_boundary(typed.len())
            && choice[..typed.len()].eq_ignore_ascii_case(typed);
        if !matches {
            continue;
        }
        best = Some(match best {
            None => choice,
            Some(prev) => &choice[..common_prefix_len(choice, prev)],
        });
    }
    best.filter(|m| m.len() > typed.len()).map(str::to_owned)
}
