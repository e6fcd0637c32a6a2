//! Validation rules and the ordered rule set of the survey form

use crate::{EMAIL, FNAME, PHONENUM};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Exactly ten ASCII digits
pub const PHONE_PATTERN: &str = r"^[0-9]{10}$";

/// Word characters with optional `.`/`-` separators on both sides of the `@`,
/// followed by one or more `.` + 2-3 character labels.
/// Word characters are ASCII only (`[A-Za-z0-9_]`).
pub const EMAIL_PATTERN: &str = concat!(
    r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*",
    r"@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*",
    r"(\.[A-Za-z0-9_]{2,3})+$",
);

static PHONE: Lazy<Pattern> = Lazy::new(|| Pattern::new(PHONE_PATTERN).unwrap());
static EMAIL_ADDRESS: Lazy<Pattern> = Lazy::new(|| Pattern::new(EMAIL_PATTERN).unwrap());

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// A regular expression that must match the whole value
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` as a full-match pattern.
    ///
    /// Already anchored sources are accepted as-is; the extra anchors
    /// are redundant but harmless.
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The ten-digit phone number pattern
    pub fn phone() -> Self {
        PHONE.clone()
    }

    /// The survey's email address pattern
    pub fn email() -> Self {
        EMAIL_ADDRESS.clone()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

/// Whitespace as browsers trim form input: Unicode white space plus the
/// byte order mark, but not NEL (U+0085).
fn is_form_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// A single check applied to one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// Non-empty after trimming leading/trailing whitespace
    Required,
    /// Raw (untrimmed) value fully matches the pattern
    Pattern(Pattern),
}

impl ValidationRule {
    pub fn check(&self, value: &str) -> bool {
        match self {
            ValidationRule::Required => !value.trim_matches(is_form_whitespace).is_empty(),
            ValidationRule::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

/// The rules attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<ValidationRule>,
}

impl FieldRules {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.rules.push(ValidationRule::Required);
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.rules.push(ValidationRule::Pattern(pattern));
        self
    }

    /// True when every rule accepts `value`
    pub fn check(&self, value: &str) -> bool {
        self.rules.iter().all(|rule| rule.check(value))
    }
}

/// Ordered association of fields to rules.
///
/// Declaration order decides which failing field receives focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRuleSet {
    fields: Vec<FieldRules>,
}

impl FieldRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The survey form: `fname`, `phonenum`, `email` all required,
    /// phone and email also pattern-checked.
    pub fn survey() -> Self {
        Self::new()
            .with(FieldRules::new(FNAME).required())
            .with(FieldRules::new(PHONENUM).required().pattern(Pattern::phone()))
            .with(FieldRules::new(EMAIL).required().pattern(Pattern::email()))
    }

    pub fn with(mut self, rules: FieldRules) -> Self {
        self.push(rules);
        self
    }

    /// Append a field; rules for a field already present are merged into
    /// its existing entry so it keeps its original position.
    pub fn push(&mut self, rules: FieldRules) {
        match self.fields.iter_mut().find(|f| f.field == rules.field) {
            Some(existing) => existing.rules.extend(rules.rules),
            None => self.fields.push(rules),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.iter()
    }

    /// Field identifiers in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Field that receives focus after the form is reset
    pub fn first_field(&self) -> Option<&str> {
        self.fields.first().map(|f| f.field.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Quick ten-digit phone number check
pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Quick survey email check
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_ADDRESS.is_match(value)
}
