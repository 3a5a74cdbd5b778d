//! Query-string helpers for the application location
//!
//! The app keeps its state in a URL-like location string
//! (`wireframe://grid?size=medium`). These helpers read and rewrite single
//! query parameters without parsing the rest of the string, so any scheme
//! and any trailing fragment are left untouched.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::{Captures, Regex};

/// Default location when none is given on the command line
pub const DEFAULT_LOCATION: &str = "wireframe://grid";

/// Characters escaped in parameter values (everything but RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Look up query parameter `name` in `url`
///
/// Returns `None` if the parameter is absent and `Some("")` if it is present
/// without a value. Values have `+` turned into spaces and are then
/// percent-decoded; invalid UTF-8 is replaced rather than rejected.
pub fn get_parameter_by_name(name: &str, url: &str) -> Option<String> {
    let pattern = format!(r"[?&]{}(=([^&#]*)|&|#|$)", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(url)?;

    let raw = match caps.get(2) {
        Some(value) if !value.as_str().is_empty() => value.as_str(),
        _ => return Some(String::new()),
    };

    let spaced = raw.replace('+', " ");
    Some(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

/// Look up query parameter `name` and parse its leading integer
///
/// `"12"` and `"12px"` both give 12. Absent, empty and non-numeric values
/// give `None`.
pub fn get_parameter_by_name_int(name: &str, url: &str) -> Option<i64> {
    let value = get_parameter_by_name(name, url)?;
    let re = Regex::new(r"^\s*([+-]?\d+)").ok()?;
    let digits = re.captures(&value)?.get(1)?.as_str();
    digits.parse().ok()
}

/// Set query parameter `name` to `value` in `url`
///
/// An existing `name=...` assignment is rewritten in place, up to the next
/// `&`, `#` or the end of the string. Otherwise the parameter is appended
/// with `?` or `&` as appropriate, after dropping a dangling `?` or `#`.
/// The value is percent-encoded.
pub fn replace_url_param(url: &str, name: &str, value: &str) -> String {
    let encoded = utf8_percent_encode(value, QUERY_VALUE).to_string();
    let pattern = format!(r"\b({}=).*?(&|#|$)", regex::escape(name));

    if let Ok(re) = Regex::new(&pattern)
        && re.is_match(url)
    {
        return re
            .replacen(url, 1, |caps: &Captures| {
                format!("{}{}{}", &caps[1], encoded, &caps[2])
            })
            .into_owned();
    }

    let base = url
        .strip_suffix('?')
        .or_else(|| url.strip_suffix('#'))
        .unwrap_or(url);
    let separator = match base.find('?') {
        Some(pos) if pos > 0 => '&',
        _ => '?',
    };
    format!("{}{}{}={}", base, separator, name, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_parameter() {
        let url = "https://x/?a=1&b=two&c";
        assert_eq!(get_parameter_by_name("a", url).as_deref(), Some("1"));
        assert_eq!(get_parameter_by_name("b", url).as_deref(), Some("two"));
        assert_eq!(get_parameter_by_name("c", url).as_deref(), Some(""));
        assert_eq!(get_parameter_by_name("d", url), None);
    }

    #[test]
    fn test_get_parameter_empty_value() {
        assert_eq!(
            get_parameter_by_name("size", "app://grid?size=&x=1").as_deref(),
            Some("")
        );
        assert_eq!(
            get_parameter_by_name("size", "app://grid?size#top").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_get_parameter_decodes() {
        let url = "https://x/?q=hello+big%20world&e=caf%C3%A9";
        assert_eq!(
            get_parameter_by_name("q", url).as_deref(),
            Some("hello big world")
        );
        assert_eq!(get_parameter_by_name("e", url).as_deref(), Some("café"));
    }

    #[test]
    fn test_get_parameter_stops_at_fragment() {
        let url = "https://x/?size=small#size=big";
        assert_eq!(get_parameter_by_name("size", url).as_deref(), Some("small"));
    }

    #[test]
    fn test_get_parameter_requires_exact_prefix() {
        // `asize` must not match `size`
        assert_eq!(get_parameter_by_name("size", "https://x/?asize=1"), None);
    }

    #[test]
    fn test_get_parameter_escapes_name() {
        let url = "https://x/?a[]=3&a=4";
        assert_eq!(get_parameter_by_name("a[]", url).as_deref(), Some("3"));
        assert_eq!(get_parameter_by_name("a", url).as_deref(), Some("4"));
    }

    #[test]
    fn test_get_parameter_int() {
        let url = "https://x/?n=42&m=12px&s=small&e=";
        assert_eq!(get_parameter_by_name_int("n", url), Some(42));
        assert_eq!(get_parameter_by_name_int("m", url), Some(12));
        assert_eq!(get_parameter_by_name_int("s", url), None);
        assert_eq!(get_parameter_by_name_int("e", url), None);
        assert_eq!(get_parameter_by_name_int("missing", url), None);
    }

    #[test]
    fn test_replace_existing() {
        assert_eq!(
            replace_url_param("https://x/?a=1&b=2", "a", "9"),
            "https://x/?a=9&b=2"
        );
        assert_eq!(
            replace_url_param("https://x/?b=2&a=1#frag", "a", "9"),
            "https://x/?b=2&a=9#frag"
        );
    }

    #[test]
    fn test_replace_appends() {
        assert_eq!(replace_url_param("https://x/", "a", "1"), "https://x/?a=1");
        assert_eq!(replace_url_param("https://x/?", "a", "1"), "https://x/?a=1");
        assert_eq!(replace_url_param("https://x/#", "a", "1"), "https://x/?a=1");
        assert_eq!(
            replace_url_param("https://x/?b=2", "a", "1"),
            "https://x/?b=2&a=1"
        );
    }

    #[test]
    fn test_replace_encodes_value() {
        let url = replace_url_param(DEFAULT_LOCATION, "note", "a b&c");
        assert_eq!(url, "wireframe://grid?note=a%20b%26c");
        assert_eq!(get_parameter_by_name("note", &url).as_deref(), Some("a b&c"));
    }

    #[test]
    fn test_round_trip() {
        for url in ["https://x/?a=1", "https://x/", "wireframe://grid?size=big&q=1"] {
            for value in ["2", "medium", "", "x y"] {
                let updated = replace_url_param(url, "a", value);
                assert_eq!(
                    get_parameter_by_name("a", &updated).as_deref(),
                    Some(value),
                    "{} -> {}",
                    url,
                    updated
                );
            }
        }
    }
}
