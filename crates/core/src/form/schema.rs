// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::descriptor::{FieldMap, FieldValue};
use regex::Regex;
use std::collections::BTreeMap;
use time::Date;
use time::macros::format_description;

/// Validation messages keyed by field path.
///
/// Sub-fields of repeatable groups use `group.<index>.sub` paths.
pub type FieldErrors = BTreeMap<String, String>;

/// A single validation rule.
///
/// Every rule except [`ValidationRule::Required`], [`ValidationRule::MinItems`]
/// and [`ValidationRule::MaxItems`] accepts an empty value.
#[derive(Debug, Clone)]
pub enum ValidationRule {
    /// A value must be entered.
    Required,
    /// Text must have at least this many characters.
    MinLength(usize),
    /// Text must have at most this many characters.
    MaxLength(usize),
    /// The number must be at least this value.
    Min(f64),
    /// The number must be at most this value.
    Max(f64),
    /// Text must look like an email address.
    Email,
    /// Text must match the pattern.
    Pattern {
        /// The compiled pattern.
        regex: Regex,
        /// Message shown on mismatch.
        message: String,
    },
    /// Text must be an ISO calendar date (`YYYY-MM-DD`).
    Date,
    /// A list or group must have at least this many entries.
    MinItems(usize),
    /// A list or group must have at most this many entries.
    MaxItems(usize),
}

impl ValidationRule {
    /// Compiles a pattern rule.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn pattern(pattern: &str, message: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern {
            regex: Regex::new(pattern)?,
            message: message.to_owned(),
        })
    }

    /// Checks `value`, returning the message of a violation.
    #[must_use]
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        match self {
            Self::Required => value
                .is_empty()
                .then(|| String::from("This field is required")),
            Self::MinItems(min) => (value.item_count() < *min).then(|| {
                if *min == 1 {
                    String::from("Add at least 1 item")
                } else {
                    format!("Add at least {min} items")
                }
            }),
            Self::MaxItems(max) => (value.item_count() > *max).then(|| {
                if *max == 1 {
                    String::from("Add at most 1 item")
                } else {
                    format!("Add at most {max} items")
                }
            }),
            _ if value.is_empty() => None,
            Self::MinLength(min) => (text_len(value) < *min)
                .then(|| format!("Must be at least {min} characters")),
            Self::MaxLength(max) => (text_len(value) > *max)
                .then(|| format!("Must be at most {max} characters")),
            Self::Min(min) => match value.as_number() {
                Some(n) if n < *min => Some(format!("Must be at least {min}")),
                Some(_) => None,
                None => Some(String::from("Must be a number")),
            },
            Self::Max(max) => match value.as_number() {
                Some(n) if n > *max => Some(format!("Must be at most {max}")),
                Some(_) => None,
                None => Some(String::from("Must be a number")),
            },
            Self::Email => (!value.as_text().is_some_and(is_email))
                .then(|| String::from("Enter a valid email address")),
            Self::Pattern { regex, message } => (!value
                .as_text()
                .is_some_and(|text| regex.is_match(text)))
            .then(|| message.clone()),
            Self::Date => (!value.as_text().is_some_and(is_iso_date))
                .then(|| String::from("Enter a date as YYYY-MM-DD")),
        }
    }
}

fn text_len(value: &FieldValue) -> usize {
    value.as_text().map_or(0, |text| text.trim().chars().count())
}

fn is_email(text: &str) -> bool {
    let text: &str = text.trim();
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

fn is_iso_date(text: &str) -> bool {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]")).is_ok()
}

/// Maps field paths to validation rules.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    rules: BTreeMap<String, Vec<ValidationRule>>,
}

impl ValidationSchema {
    /// Creates a schema with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rules for `path`.
    ///
    /// A path of the form `group.sub` applies to `sub` in every item of the
    /// repeatable group `group`.
    #[must_use]
    pub fn field(mut self, path: &str, rules: Vec<ValidationRule>) -> Self {
        self.rules.entry(path.to_owned()).or_default().extend(rules);
        self
    }

    /// Returns the rules for `path`.
    #[must_use]
    pub fn rules_for(&self, path: &str) -> &[ValidationRule] {
        self.rules.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// Validates `values`, reporting the first violated rule per path.
    #[must_use]
    pub fn validate(&self, values: &FieldMap) -> FieldErrors {
        let mut errors: FieldErrors = FieldErrors::new();
        for (path, rules) in &self.rules {
            if let Some((group, sub)) = path.split_once('.') {
                let items: &[FieldMap] = values
                    .get(group)
                    .and_then(FieldValue::as_group)
                    .unwrap_or_default();
                for (index, item) in items.iter().enumerate() {
                    let value: &FieldValue = item.get(sub).unwrap_or(&FieldValue::Empty);
                    if let Some(message) = first_violation(rules, value) {
                        errors.insert(format!("{group}.{index}.{sub}"), message);
                    }
                }
            } else {
                let value: &FieldValue = values.get(path).unwrap_or(&FieldValue::Empty);
                if let Some(message) = first_violation(rules, value) {
                    errors.insert(path.clone(), message);
                }
            }
        }
        errors
    }
}

fn first_violation(rules: &[ValidationRule], value: &FieldValue) -> Option<String> {
    rules.iter().find_map(|rule| rule.check(value))
}
