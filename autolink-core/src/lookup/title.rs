//! HTML title extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Title used when a document has no usable `<title>` element.
pub const NO_TITLE: &str = "no title";

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>").unwrap();
}

/// Returns the text of the first `<title>` element, with runs of whitespace
/// collapsed to single spaces, or [`NO_TITLE`] when there is none or it is blank.
pub fn extract_title(content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    TITLE_RE
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_title() {
        let html = b"<html><head><title>T298595 Broken login</title></head><title>second</title></html>";
        assert_eq!(extract_title(html), "T298595 Broken login");
    }

    #[test]
    fn test_title_is_case_insensitive_and_spans_lines() {
        let html = b"<HTML><TITLE lang=\"en\">\n  Ticket\n  42\n</TITLE></HTML>";
        assert_eq!(extract_title(html), "Ticket 42");
    }

    #[test]
    fn test_missing_or_blank_title_falls_back() {
        assert_eq!(extract_title(b"<html><body>nothing</body></html>"), NO_TITLE);
        assert_eq!(extract_title(b"<title>   </title>"), NO_TITLE);
        assert_eq!(extract_title(b""), NO_TITLE);
    }

    #[test]
    fn test_does_not_match_similar_tags() {
        assert_eq!(extract_title(b"<titlebar>x</titlebar>"), NO_TITLE);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut html = b"<title>caf".to_vec();
        html.push(0xff);
        html.extend_from_slice(b"</title>");
        assert_eq!(extract_title(&html), "caf\u{fffd}");
    }
}
