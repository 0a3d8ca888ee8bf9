//! Typed URL parameter bags.
//!
//! [`HttpParams`] is the crate's one container for query-string data: the
//! protocol client fills it with typed setters and serializes it into a
//! request URL or form body, or parses a server-supplied query string back
//! into typed values. Encoding is component-style percent escaping (space is
//! `%20`, never `+`), so values containing `=`, `&`, or non-ASCII text
//! round-trip through [`parse`](HttpParams::parse) /
//! [`close`](HttpParams::close).

use crate::base::error::HttpError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;
use std::fmt;

/// Component-style escape set: everything but unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Key-value bag for URL query strings and form bodies.
///
/// A value of `None` is a delete marker: the setter families always store
/// `Some`, [`unset`](Self::unset) stores `None`, and
/// [`close`](Self::close) drops marked keys from the serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpParams {
    values: HashMap<String, Option<String>>,
}

impl HttpParams {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, or the query component of a full URL.
    ///
    /// With `is_url` set, the query is the substring after `?` and before an
    /// optional `#` fragment; a URL without `?` yields an empty bag. Pairs
    /// are split on `&`; a candidate without `=` is silently skipped; the key
    /// ends at the first `=` and the value is everything after it. Keys and
    /// values are percent-decoded, and a repeated key keeps the last value.
    pub fn parse(source: &str, is_url: bool) -> Self {
        let mut params = Self::new();

        let query = if is_url {
            let Some((_, after)) = source.split_once('?') else {
                return params;
            };
            match after.split_once('#') {
                Some((query, _fragment)) => query,
                None => after,
            }
        } else {
            source
        };

        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            params.values.insert(decode(key), Some(decode(value)));
        }
        params
    }

    fn get(&self, name: &str) -> Result<&str, HttpError> {
        match self.values.get(name) {
            Some(Some(value)) => Ok(value),
            _ => Err(HttpError::no_match(name)),
        }
    }

    /// Get a boolean: case-insensitive comparison against `"TRUE"`.
    pub fn get_bool(&self, name: &str) -> Result<bool, HttpError> {
        Ok(self.get(name)?.eq_ignore_ascii_case("TRUE"))
    }

    /// Get a float. Malformed numeric text degrades to `0.0`; only a
    /// missing key is an error.
    pub fn get_dbl(&self, name: &str) -> Result<f64, HttpError> {
        Ok(lenient_f64(self.get(name)?))
    }

    /// Get an integer. Malformed numeric text degrades to `0`; only a
    /// missing key is an error.
    pub fn get_int(&self, name: &str) -> Result<i64, HttpError> {
        Ok(lenient_i64(self.get(name)?))
    }

    /// Get a borrowed string value.
    pub fn get_str(&self, name: &str) -> Result<&str, HttpError> {
        self.get(name)
    }

    /// Get an owned copy of a string value.
    pub fn get_string(&self, name: &str) -> Result<String, HttpError> {
        self.get(name).map(str::to_owned)
    }

    fn set(&mut self, name: &str, value: String) {
        self.values.insert(name.to_owned(), Some(value));
    }

    /// Store `"true"` or `"false"`.
    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.set(name, if value { "true" } else { "false" }.to_owned());
    }

    /// Store a float as fixed-point text with six decimals.
    pub fn set_dbl(&mut self, name: &str, value: f64) {
        self.set(name, format!("{value:.6}"));
    }

    /// Store an integer as decimal text.
    pub fn set_int(&mut self, name: &str, value: i64) {
        self.set(name, value.to_string());
    }

    /// Store a string value, replacing any prior value or delete marker.
    pub fn set_str(&mut self, name: &str, value: impl Into<String>) {
        self.set(name, value.into());
    }

    /// Store a formatted string value.
    ///
    /// ```rust
    /// # let mut params = chatnet::HttpParams::new();
    /// params.set_str_fmt("range", format_args!("{}..{}", 10, 20));
    /// ```
    pub fn set_str_fmt(&mut self, name: &str, args: fmt::Arguments<'_>) {
        self.set(name, args.to_string());
    }

    /// Mark a key for deletion: the key survives as a tombstone until
    /// [`close`](Self::close) removes it from the serialization.
    pub fn unset(&mut self, name: &str) {
        self.values.insert(name.to_owned(), None);
    }

    /// Serialize and consume the bag.
    ///
    /// Keys carrying a delete marker are dropped; the rest are emitted as
    /// percent-encoded `key=value` pairs joined by `&`, each pair exactly
    /// once, in no particular order. With a `base_url` the result is
    /// `base_url?query`.
    ///
    /// Compatibility quirk, kept deliberately: the `?` is attached whenever
    /// `base_url` is given, even when every key was a tombstone and the
    /// query is empty.
    pub fn close(self, base_url: Option<&str>) -> String {
        let mut query = String::new();

        for (key, value) in &self.values {
            let Some(value) = value else {
                continue;
            };
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&encode(key));
            query.push('=');
            query.push_str(&encode(value));
        }

        match base_url {
            Some(base) => format!("{base}?{query}"),
            None => query,
        }
    }

    /// Number of stored keys, tombstones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

fn decode(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Longest-valid-prefix decimal integer parse; anything else is 0.
fn lenient_i64(text: &str) -> i64 {
    let rest = text.strip_prefix(['+', '-']).unwrap_or(text);
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let end = text.len() - rest.len() + digits;
    text[..end].parse().unwrap_or(0)
}

/// Longest-valid-prefix float parse; anything else is 0.0.
fn lenient_f64(text: &str) -> f64 {
    if let Ok(value) = text.parse::<f64>() {
        return value;
    }
    let mut best = 0.0;
    for (idx, _) in text.char_indices().skip(1) {
        if let Ok(value) = text[..idx].parse::<f64>() {
            best = value;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_query() {
        let params = HttpParams::parse("a=1&b=two", false);
        assert_eq!(params.get_str("a").unwrap(), "1");
        assert_eq!(params.get_str("b").unwrap(), "two");
    }

    #[test]
    fn test_parse_url_extracts_query_before_fragment() {
        let params = HttpParams::parse("https://x/a?b=1&c=2#frag", true);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get_str("b").unwrap(), "1");
        assert_eq!(params.get_str("c").unwrap(), "2");
    }

    #[test]
    fn test_parse_url_without_query_is_empty() {
        let params = HttpParams::parse("https://x/a", true);
        assert!(params.is_empty());
    }

    #[test]
    fn test_parse_skips_pair_without_separator() {
        let params = HttpParams::parse("k1=v1&badpair&k2=v2", false);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get_str("k1").unwrap(), "v1");
        assert_eq!(params.get_str("k2").unwrap(), "v2");
    }

    #[test]
    fn test_parse_value_keeps_later_equals_signs() {
        let params = HttpParams::parse("token=a=b=c", false);
        assert_eq!(params.get_str("token").unwrap(), "a=b=c");
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let params = HttpParams::parse("a=1&a=2", false);
        assert_eq!(params.get_str("a").unwrap(), "2");
    }

    #[test]
    fn test_parse_percent_decodes_both_sides() {
        let params = HttpParams::parse("her%20name=caf%C3%A9", false);
        assert_eq!(params.get_str("her name").unwrap(), "café");
    }

    #[test]
    fn test_missing_key_reports_no_match_with_zero_default() {
        let params = HttpParams::new();
        let err = params.get_int("missing").unwrap_err();
        assert_eq!(err, HttpError::no_match("missing"));
        assert_eq!(params.get_int("missing").unwrap_or_default(), 0);
    }

    #[test]
    fn test_get_bool_matches_true_case_insensitively() {
        let params = HttpParams::parse("a=TRUE&b=TrUe&c=1&d=false", false);
        assert!(params.get_bool("a").unwrap());
        assert!(params.get_bool("b").unwrap());
        assert!(!params.get_bool("c").unwrap());
        assert!(!params.get_bool("d").unwrap());
    }

    #[test]
    fn test_numeric_getters_parse_decimal() {
        let mut params = HttpParams::new();
        params.set_str("count", "42");
        params.set_str("ratio", "2.5");
        assert_eq!(params.get_int("count").unwrap(), 42);
        assert_eq!(params.get_dbl("ratio").unwrap(), 2.5);
    }

    #[test]
    fn test_numeric_getters_take_leading_prefix() {
        let mut params = HttpParams::new();
        params.set_str("count", "17abc");
        params.set_str("neg", "-3junk");
        params.set_str("ratio", "1.5x");
        assert_eq!(params.get_int("count").unwrap(), 17);
        assert_eq!(params.get_int("neg").unwrap(), -3);
        assert_eq!(params.get_dbl("ratio").unwrap(), 1.5);
    }

    #[test]
    fn test_malformed_numeric_degrades_to_zero() {
        let mut params = HttpParams::new();
        params.set_str("count", "not-a-number");
        assert_eq!(params.get_int("count").unwrap(), 0);
        assert_eq!(params.get_dbl("count").unwrap(), 0.0);
    }

    #[test]
    fn test_setters_format_values() {
        let mut params = HttpParams::new();
        params.set_bool("online", true);
        params.set_int("limit", -7);
        params.set_dbl("lat", 52.5);
        params.set_str_fmt("range", format_args!("{}..{}", 10, 20));
        assert_eq!(params.get_str("online").unwrap(), "true");
        assert_eq!(params.get_str("limit").unwrap(), "-7");
        assert_eq!(params.get_str("lat").unwrap(), "52.500000");
        assert_eq!(params.get_str("range").unwrap(), "10..20");
    }

    #[test]
    fn test_set_replaces_delete_marker() {
        let mut params = HttpParams::new();
        params.unset("key");
        assert!(params.get_str("key").is_err());
        params.set_str("key", "back");
        assert_eq!(params.get_str("key").unwrap(), "back");
    }

    #[test]
    fn test_close_skips_tombstoned_keys() {
        let mut params = HttpParams::new();
        params.set_str("keep", "v");
        params.set_str("drop", "v");
        params.unset("drop");
        let query = params.close(None);
        assert_eq!(query, "keep=v");
    }

    #[test]
    fn test_close_with_base_url_always_attaches_question_mark() {
        let params = HttpParams::new();
        assert_eq!(params.close(Some("https://h/p")), "https://h/p?");

        let mut params = HttpParams::new();
        params.set_str("a", "1");
        assert_eq!(params.close(Some("https://h/p")), "https://h/p?a=1");
    }

    #[test]
    fn test_close_encodes_space_as_percent20() {
        let mut params = HttpParams::new();
        params.set_str("q", "two words");
        assert_eq!(params.close(None), "q=two%20words");
    }

    #[test]
    fn test_round_trip_reserved_and_non_ascii() {
        let mut params = HttpParams::new();
        params.set_str("eq", "a=b");
        params.set_str("amp", "x&y");
        params.set_str("text", "grüße & tschüß");
        params.set_str("hash", "#frag?");

        let original = params.clone();
        let reparsed = HttpParams::parse(&params.close(None), false);
        assert_eq!(reparsed, original);
    }
}
