#![forbid(unsafe_code)]

//! Field descriptors.
//!
//! The editor never owns the data it edits. It asks a [`Field`] for its
//! label, current value and presentation hints, and hands the committed
//! value back through [`Field::apply`]. Message and form layers implement
//! the trait for their own field types; [`SimpleField`] is a ready-made
//! implementation holding everything in memory.

/// A value the editor can present and change.
pub trait Field {
    /// Label drawn to the left of the value.
    fn label(&self) -> &str;

    /// The value as it should be edited.
    fn value(&self) -> String;

    /// Store a committed value.
    fn apply(&mut self, value: &str);

    /// Expected width of the value, or 0 to use the rest of the row.
    fn width(&self) -> usize {
        0
    }

    /// Values that should be easy to pick.
    fn choices(&self) -> &[String] {
        &[]
    }

    /// Whether Enter inside the value inserts a newline.
    fn multiline(&self) -> bool {
        false
    }

    /// Text shown by F1.
    fn help(&self) -> &str {
        ""
    }

    /// Short guidance drawn beside an entry area that has room for it.
    fn hint(&self) -> &str {
        ""
    }

    /// Mask the value with `*` while editing and displaying.
    fn hide_value(&self) -> bool {
        false
    }

    /// A description of what is wrong with the current value, if anything.
    fn validate(&self) -> Option<String> {
        None
    }
}

/// Validity check for a [`SimpleField`].
pub type Validator = fn(&str) -> Option<String>;

/// In-memory [`Field`].
///
/// ```
/// use pkt_edit::{Field, SimpleField};
///
/// let mut field = SimpleField::new("Reply", "")
///     .with_choices(["Yes", "No"])
///     .with_help("Whether a reply is requested.");
/// field.apply("Yes");
/// assert_eq!(field.value(), "Yes");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleField {
    label: String,
    value: String,
    width: usize,
    choices: Vec<String>,
    multiline: bool,
    help: String,
    hint: String,
    hidden: bool,
    validator: Option<Validator>,
}

impl SimpleField {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The stored value.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.value
    }
}

impl Field for SimpleField {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn apply(&mut self, value: &str) {
        value.clone_into(&mut self.value);
    }

    fn width(&self) -> usize {
        self.width
    }

    fn choices(&self) -> &[String] {
        &self.choices
    }

    fn multiline(&self) -> bool {
        self.multiline
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn hint(&self) -> &str {
        &self.hint
    }

    fn hide_value(&self) -> bool {
        self.hidden
    }

    fn validate(&self) -> Option<String> {
        self.validator.and_then(|check| check(&self.value))
    }
}
