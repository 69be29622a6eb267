//! Display formatters for cell values.
//!
//! These produce the decorated strings that end up in rendered tables
//! (`"$1,234.50"`, `"12.5%"`, `"Calif."`). Numeric ones are the reason the
//! classifier has to read currency symbols and grouping commas back.
//!
//! Formatters never fail on bad input: anything that cannot be read as a
//! number renders as `"N/A"` (or passes through, for the text formatters).

mod states;

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NOT_AVAILABLE: &str = "N/A";
const EMPTY_BUBBLE: &str = "&mdash;";

/// Largest `decimal_places` a numeric formatter will honor.
pub const MAX_DECIMAL_PLACES: usize = 20;
/// Largest count [`dollar_signs`] renders; bigger values are `"N/A"`.
pub const MAX_DOLLAR_SIGNS: i64 = 10;

static INTCOMMA_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d+)(\d{3})").expect("intcomma regex is valid"));
static TITLE_APOSTROPHE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]'[A-Z]").expect("apostrophe regex is valid"));
static TITLE_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[A-Z]").expect("digit regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown formatter: {0}")]
    UnknownFormatter(String),
}

/// Per-column arguments for a formatter. Unset fields use the formatter's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub decimal_places: Option<usize>,
    pub multiply: Option<bool>,
    pub url: Option<String>,
}

pub type FormatFn = fn(&str, &FormatOptions) -> String;

/// Named collection of formatting functions.
#[derive(Clone)]
pub struct Formatter {
    filters: BTreeMap<String, FormatFn>,
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.filters.keys()).finish()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    /// A formatter with every built-in registered.
    pub fn new() -> Self {
        let mut formatter = Self::empty();
        let defaults: [(&str, FormatFn); 12] = [
            ("ap_state", |v, _| ap_state(v)),
            ("bubble", |v, _| bubble(v)),
            ("checkbox", |v, _| checkbox(v)),
            ("dollar_signs", |v, _| dollar_signs(v)),
            ("dollars", |v, o| dollars(v, o.decimal_places.unwrap_or(2))),
            ("intcomma", |v, _| intcomma(v)),
            ("link", |v, o| link(v, o.url.as_deref().unwrap_or_default())),
            ("percentage", |v, o| {
                percentage(v, o.decimal_places.unwrap_or(1), o.multiply.unwrap_or(true))
            }),
            ("percent_change", |v, o| {
                percent_change(v, o.decimal_places.unwrap_or(1), o.multiply.unwrap_or(true))
            }),
            ("ratio", |v, o| ratio(v, o.decimal_places.unwrap_or(0))),
            ("title", |v, _| title(v)),
            ("tribubble", |v, _| tribubble(v)),
        ];
        for (name, func) in defaults {
            formatter.register(name, func);
        }
        formatter
    }

    pub fn empty() -> Self {
        Self {
            filters: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, func: FormatFn) {
        self.filters.insert(name.into(), func);
    }

    /// Removes a formatter; unknown names are ignored.
    pub fn unregister(&mut self, name: &str) {
        self.filters.remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn apply(&self, value: &str, name: &str, opts: &FormatOptions) -> Result<String, FormatError> {
        let func = self
            .filters
            .get(name)
            .ok_or_else(|| FormatError::UnknownFormatter(name.to_string()))?;
        Ok(func(value, opts))
    }
}

fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

fn round_to(value: f64, decimal_places: usize) -> String {
    let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);
    format!("{value:.decimal_places$}")
}

/// Inserts a comma every three integer digits: `45000` becomes `45,000`.
pub fn intcomma(value: &str) -> String {
    let mut current = value.to_string();
    loop {
        let next = INTCOMMA_GROUP
            .replace(&current, "${1},${2}")
            .into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Dollar figure with grouping commas. Blank input is treated as zero.
pub fn dollars(value: &str, decimal_places: usize) -> String {
    let value = if value.trim().is_empty() { "0" } else { value };
    match parse_float(value) {
        Some(f) => format!("${}", intcomma(&round_to(f, decimal_places))),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Fraction as a percentage; `multiply = false` treats the input as already scaled.
pub fn percentage(value: &str, decimal_places: usize, multiply: bool) -> String {
    match parse_float(value) {
        Some(f) => {
            let f = if multiply { f * 100.0 } else { f };
            format!("{}%", round_to(f, decimal_places))
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Like [`percentage`], with an explicit `+` on increases.
pub fn percent_change(value: &str, decimal_places: usize, multiply: bool) -> String {
    let Some(f) = parse_float(value) else {
        return NOT_AVAILABLE.to_string();
    };
    let f = if multiply { f * 100.0 } else { f };
    let rounded = round_to(f, decimal_places);
    if f > 0.0 {
        format!("+{rounded}%")
    } else {
        format!("{rounded}%")
    }
}

/// `X:1` ratio.
pub fn ratio(value: &str, decimal_places: usize) -> String {
    match parse_float(value) {
        Some(f) => format!("{}:1", round_to(f, decimal_places)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Price-range style: `3` becomes `$$$`.
pub fn dollar_signs(value: &str) -> String {
    match value.trim().parse::<i64>() {
        Ok(count) if count <= MAX_DOLLAR_SIGNS => "$".repeat(count.max(0) as usize),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// AP style abbreviation; values that are not a known state pass through.
pub fn ap_state(value: &str) -> String {
    states::lookup(value)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

/// Title case that leaves contractions and ordinals alone:
/// `"they're 1st"` becomes `"They're 1st"`.
pub fn title(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut prev_cased = false;
    for c in value.to_lowercase().chars() {
        if c.is_alphabetic() {
            if prev_cased {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            titled.push(c);
            prev_cased = false;
        }
    }

    let lower_match = |caps: &Captures| caps[0].to_lowercase();
    let titled = TITLE_APOSTROPHE.replace_all(&titled, lower_match);
    TITLE_DIGIT.replace_all(&titled, lower_match).into_owned()
}

/// `Y`/`N` checkbox icon; anything else renders empty.
pub fn checkbox(value: &str) -> String {
    match value.trim().to_lowercase().as_str() {
        "y" => r#"<img class="vote" src="/media/img/checkbox_yes.png">"#.to_string(),
        "n" => r#"<img class="vote" src="/media/img/checkbox_no.png">"#.to_string(),
        _ => String::new(),
    }
}

/// Filled or empty bubble for exactly `Y` or `N`.
pub fn bubble(value: &str) -> String {
    let (name, icon) = match value {
        "Y" => ("Yes", "/media/img/bubble_yes.png"),
        "N" => ("No", "/media/img/bubble_no.png"),
        _ => return EMPTY_BUBBLE.to_string(),
    };
    format!("<img alt='{name}' title='{name}' class='bubble' src='{icon}'>")
}

/// Three-state bubble for `Y`, `P` (partly) and `N`, case-insensitive.
pub fn tribubble(value: &str) -> String {
    let icon = match value.trim().to_lowercase().as_str() {
        "y" => "/media/img/tribubble_yes.png",
        "p" => "/media/img/tribubble_partly.png",
        "n" => "/media/img/tribubble_no.png",
        _ => return EMPTY_BUBBLE.to_string(),
    };
    format!("<img class='bubble' src='{icon}'>")
}

pub fn link(title: &str, url: &str) -> String {
    format!(r#"<a target="_blank" href="{url}" title="{title}">{title}</a>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::numeric;

    #[test]
    fn intcomma_groups() {
        assert_eq!(intcomma("3000"), "3,000");
        assert_eq!(intcomma("45000"), "45,000");
        assert_eq!(intcomma("1234567"), "1,234,567");
        assert_eq!(intcomma("-1234567.5"), "-1,234,567.5");
        assert_eq!(intcomma("999"), "999");
        assert_eq!(intcomma("abc"), "abc");
    }

    #[test]
    fn dollars_rounds_and_groups() {
        assert_eq!(dollars("1200", 2), "$1,200.00");
        assert_eq!(dollars("1234.567", 2), "$1,234.57");
        assert_eq!(dollars("1200", 0), "$1,200");
        assert_eq!(dollars("", 2), "$0.00");
        assert_eq!(dollars("lots", 2), "N/A");
    }

    #[test]
    fn dollars_output_reads_back_as_number() {
        let shown = dollars("1234567.5", 2);
        assert_eq!(shown, "$1,234,567.50");
        assert!(numeric::classify(&shown));
        assert_eq!(numeric::to_number(&CellValue::raw(shown)).unwrap(), 1_234_567.5);
    }

    #[test]
    fn percentages() {
        assert_eq!(percentage("0.125", 1, true), "12.5%");
        assert_eq!(percentage("12.5", 2, false), "12.50%");
        assert_eq!(percentage("x", 1, true), "N/A");
        assert_eq!(percent_change("0.05", 1, true), "+5.0%");
        assert_eq!(percent_change("-0.05", 1, true), "-5.0%");
        assert_eq!(percent_change("0", 1, true), "0.0%");
        assert_eq!(percent_change("n/a", 1, true), "N/A");
    }

    #[test]
    fn ratio_and_dollar_signs() {
        assert_eq!(ratio("2.6", 0), "3:1");
        assert_eq!(ratio("2.64", 1), "2.6:1");
        assert_eq!(ratio("?", 0), "N/A");
        assert_eq!(dollar_signs("3"), "$$$");
        assert_eq!(dollar_signs("0"), "");
        assert_eq!(dollar_signs("3.5"), "N/A");
    }

    #[test]
    fn dollar_signs_caps_large_counts() {
        assert_eq!(dollar_signs("10"), "$".repeat(10));
        assert_eq!(dollar_signs("11"), "N/A");
        assert_eq!(dollar_signs(&i64::MAX.to_string()), "N/A");
        assert_eq!(dollar_signs("-5"), "");
        let f = Formatter::new();
        assert_eq!(
            f.apply("9223372036854775807", "dollar_signs", &FormatOptions::default()).unwrap(),
            "N/A"
        );
    }

    #[test]
    fn decimal_places_are_clamped() {
        let shown = ratio("1", usize::MAX);
        assert_eq!(shown, format!("1.{}:1", "0".repeat(MAX_DECIMAL_PLACES)));
        assert_eq!(dollars("1", 4_000_000_000), format!("$1.{}", "0".repeat(MAX_DECIMAL_PLACES)));
    }

    #[test]
    fn title_case_fixes() {
        assert_eq!(title("the QUEUE"), "The Queue");
        assert_eq!(title("they're here"), "They're Here");
        assert_eq!(title("1st place"), "1st Place");
        assert_eq!(title("malone-muert"), "Malone-Muert");
    }

    #[test]
    fn ap_states() {
        assert_eq!(ap_state("California"), "Calif.");
        assert_eq!(ap_state("wyo"), "Wyo.");
        assert_eq!(ap_state("Narnia"), "Narnia");
    }

    #[test]
    fn icons() {
        assert!(checkbox("Y").contains("checkbox_yes"));
        assert!(checkbox("n").contains("checkbox_no"));
        assert_eq!(checkbox("maybe"), "");
        assert!(bubble("Y").contains("alt='Yes'"));
        assert_eq!(bubble("y"), "&mdash;");
        assert!(tribubble("p").contains("tribubble_partly"));
        assert_eq!(tribubble(""), "&mdash;");
    }

    #[test]
    fn link_markup() {
        assert_eq!(
            link("Docs", "https://example.com"),
            r#"<a target="_blank" href="https://example.com" title="Docs">Docs</a>"#
        );
    }

    #[test]
    fn registry_apply_and_unregister() {
        let mut f = Formatter::new();
        assert!(f.contains("dollars"));
        assert_eq!(f.apply("1200", "intcomma", &FormatOptions::default()).unwrap(), "1,200");
        assert_eq!(f.apply("1200", "dollars", &FormatOptions::default()).unwrap(), "$1,200.00");

        let opts = FormatOptions {
            decimal_places: Some(0),
            ..FormatOptions::default()
        };
        assert_eq!(f.apply("1200", "dollars", &opts).unwrap(), "$1,200");

        f.unregister("dollars");
        f.unregister("not-there");
        assert_eq!(
            f.apply("1", "dollars", &FormatOptions::default()),
            Err(FormatError::UnknownFormatter("dollars".into()))
        );
    }

    #[test]
    fn custom_formatter() {
        let mut f = Formatter::empty();
        f.register("shout", |v, _| v.to_uppercase());
        assert_eq!(f.names().collect::<Vec<_>>(), vec!["shout"]);
        assert_eq!(f.apply("hi", "shout", &FormatOptions::default()).unwrap(), "HI");
    }
}
