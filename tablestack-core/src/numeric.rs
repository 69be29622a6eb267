//! Numeric-token classification and parsing.
//!
//! Decides whether a cell's display text should sort as a number and produces
//! the comparable `f64`. Two classification policies exist:
//!
//! - [`NumericPolicy::Strict`]: strip currency symbols and thousands commas,
//!   then require the number to consume the whole remaining string. `"12abc"`
//!   is rejected.
//! - [`NumericPolicy::Pattern`]: accept anything starting with the shape
//!   "optional digit, then digits/commas/dots". Trailing content is ignored and
//!   only commas are stripped before parsing.
//!
//! A classifier applies exactly one policy. Strict is the default.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::CellValue;

/// Currency symbols stripped by default.
pub const DEFAULT_CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

static PATTERN_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]?[0-9,.]+").expect("pattern shape regex is valid"));

static DEFAULT_CLASSIFIER: Lazy<NumericClassifier> = Lazy::new(NumericClassifier::default);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// `to_number` was called on a token that does not classify as numeric.
    #[error("token {0:?} is not numeric")]
    NotNumeric(String),
}

/// Which validation rule decides that a token is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    #[default]
    Strict,
    Pattern,
}

impl NumericPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Pattern => "pattern",
        }
    }
}

impl std::str::FromStr for NumericPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "pattern" => Ok(Self::Pattern),
            other => Err(format!("unknown numeric policy: {other}")),
        }
    }
}

/// Classifies cell tokens and converts numeric ones to sort values.
///
/// Pure: the result depends only on the token and the classifier's
/// construction parameters. Tokens are trimmed of surrounding whitespace
/// before inspection, matching how table cells are read.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericClassifier {
    policy: NumericPolicy,
    currency_symbols: Vec<char>,
}

impl Default for NumericClassifier {
    fn default() -> Self {
        Self::new(NumericPolicy::Strict, DEFAULT_CURRENCY_SYMBOLS)
    }
}

impl NumericClassifier {
    pub fn new(policy: NumericPolicy, currency_symbols: impl IntoIterator<Item = char>) -> Self {
        let mut currency_symbols: Vec<char> = currency_symbols.into_iter().collect();
        currency_symbols.sort_unstable();
        currency_symbols.dedup();
        Self {
            policy,
            currency_symbols,
        }
    }

    pub fn strict() -> Self {
        Self::new(NumericPolicy::Strict, DEFAULT_CURRENCY_SYMBOLS)
    }

    pub fn pattern() -> Self {
        Self::new(NumericPolicy::Pattern, DEFAULT_CURRENCY_SYMBOLS)
    }

    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    pub fn currency_symbols(&self) -> &[char] {
        &self.currency_symbols
    }

    /// Removes the decorations this policy recognizes.
    ///
    /// Strict strips currency symbols and commas; pattern strips commas only.
    /// The token is trimmed once, before stripping, so whitespace between a
    /// symbol and the digits survives: `"$ 5"` strips to `" 5"`.
    pub fn strip<'a>(&self, token: &'a str) -> Cow<'a, str> {
        let token = token.trim();
        let is_decoration = |c: char| match self.policy {
            NumericPolicy::Strict => c == ',' || self.currency_symbols.contains(&c),
            NumericPolicy::Pattern => c == ',',
        };
        if token.chars().any(is_decoration) {
            Cow::Owned(token.chars().filter(|&c| !is_decoration(c)).collect())
        } else {
            Cow::Borrowed(token)
        }
    }

    /// True iff `token` should be ordered as a number.
    pub fn classify(&self, token: &str) -> bool {
        match self.policy {
            NumericPolicy::Strict => self.parse_strict(token).is_some(),
            NumericPolicy::Pattern => PATTERN_SHAPE.is_match(token.trim()),
        }
    }

    /// Converts a cell to its numeric sort value.
    ///
    /// `Parsed` values are returned unchanged. A `Raw` token must classify as
    /// numeric first; otherwise this returns [`NumericError::NotNumeric`]
    /// rather than guessing a value.
    pub fn to_number(&self, value: &CellValue) -> Result<f64, NumericError> {
        let token = match value {
            CellValue::Parsed(v) => return Ok(*v),
            CellValue::Raw(token) => token,
        };
        self.parse_token(token)
            .ok_or_else(|| NumericError::NotNumeric(token.clone()))
    }

    /// Classify and convert in one pass.
    pub fn parse_token(&self, token: &str) -> Option<f64> {
        match self.policy {
            NumericPolicy::Strict => self.parse_strict(token),
            NumericPolicy::Pattern => {
                if !PATTERN_SHAPE.is_match(token.trim()) {
                    return None;
                }
                let stripped = self.strip(token);
                leading_decimal(&stripped).map(|(value, _)| value)
            }
        }
    }

    fn parse_strict(&self, token: &str) -> Option<f64> {
        let stripped = self.strip(token);
        match leading_decimal(&stripped) {
            Some((value, consumed)) if consumed == stripped.len() => Some(value),
            _ => None,
        }
    }
}

/// [`NumericClassifier::classify`] with the default strict classifier.
pub fn classify(token: &str) -> bool {
    DEFAULT_CLASSIFIER.classify(token)
}

/// [`NumericClassifier::to_number`] with the default strict classifier.
pub fn to_number(value: &CellValue) -> Result<f64, NumericError> {
    DEFAULT_CLASSIFIER.to_number(value)
}

/// Parses the longest decimal prefix of `s`.
///
/// Accepts an optional sign, digits, and an optional fractional part; at least
/// one digit is required. Exponents are not part of the display format and
/// stop the scan. Returns the value and the number of bytes consumed.
fn leading_decimal(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    let value: f64 = s[..end].parse().ok()?;
    value.is_finite().then_some((value, end))
}
