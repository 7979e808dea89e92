use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Four dot-separated groups of 1-3 digits. Octet ranges are not checked, and the
    /// boundaries are ASCII word boundaries.
    static ref IP_REGEX: Regex = Regex::new(r"(?-u:\b)(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?-u:\b)").unwrap();
    static ref METHOD_REGEX: Regex = Regex::new(r"GET|PUT|POST|DELETE").unwrap();
}

/// Marks the end of the request target in a request line.
const PROTOCOL_MARKER: &str = " HTTP";

/// Pull every dotted-quad address out of a line, left to right.
pub fn extract_ip_addresses(line: &str) -> Vec<String> {
    IP_REGEX.find_iter(line).map(|m| m.as_str().to_owned()).collect()
}

/// Pull the requested url out of a line.
///
/// The url is whatever follows the first method keyword and precedes `" HTTP"`,
/// with all spaces removed. Lines without a method keyword have no url.
pub fn extract_url(line: &str) -> Option<String> {
    let keyword = METHOD_REGEX.find(line)?;
    let remainder = &line[keyword.end()..];
    let target = remainder.split(PROTOCOL_MARKER).next().unwrap_or(remainder);
    Some(target.split(' ').filter(|token| !token.is_empty()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APACHE_LINE: &str = r#"177.71.128.21 - - [10/Jul/2018:22:21:28 +0200] "GET /intranet-analytics/ HTTP/1.1" 200 3574 "-" "Mozilla/5.0 (X11; U; Linux x86_64; fr-FR) AppleWebKit/534.7 (KHTML, like Gecko) Epiphany/2.30.6 Safari/534.7""#;

    #[test]
    fn test_extract_ip_from_access_line() {
        assert_eq!(extract_ip_addresses(APACHE_LINE), vec!["177.71.128.21"]);
    }

    #[test]
    fn test_extract_ip_none() {
        assert!(extract_ip_addresses("No IP addresses in this line").is_empty());
    }

    #[test]
    fn test_extract_ip_keeps_order_and_duplicates() {
        let line = "10.0.0.2 forwarded for 192.168.1.10 via 10.0.0.2";
        assert_eq!(extract_ip_addresses(line), vec!["10.0.0.2", "192.168.1.10", "10.0.0.2"]);
    }

    #[test]
    fn test_extract_ip_no_range_check() {
        assert_eq!(extract_ip_addresses("from 999.999.999.999 ok"), vec!["999.999.999.999"]);
    }

    #[test]
    fn test_extract_ip_respects_word_boundaries() {
        assert!(extract_ip_addresses("id 1234.1.1.1").is_empty());
        assert!(extract_ip_addresses("1.2.3").is_empty());
    }

    #[test]
    fn test_extract_ip_after_non_ascii_letter() {
        assert_eq!(extract_ip_addresses("clienté1.2.3.4 x"), vec!["1.2.3.4"]);
    }

    #[test]
    fn test_extract_url() {
        assert_eq!(extract_url("GET /api/users HTTP/1.1").as_deref(), Some("/api/users"));
        assert_eq!(extract_url(APACHE_LINE).as_deref(), Some("/intranet-analytics/"));
    }

    #[test]
    fn test_extract_url_other_methods() {
        assert_eq!(extract_url(r#""POST /login HTTP/1.0""#).as_deref(), Some("/login"));
        assert_eq!(extract_url(r#""PUT /items/7 HTTP/2""#).as_deref(), Some("/items/7"));
        assert_eq!(extract_url(r#""DELETE /items/7 HTTP/1.1""#).as_deref(), Some("/items/7"));
    }

    #[test]
    fn test_extract_url_absent() {
        assert_eq!(extract_url("No URL in this line"), None);
    }

    #[test]
    fn test_extract_url_joins_tokens() {
        assert_eq!(extract_url("GET  /a b  HTTP/1.1").as_deref(), Some("/ab"));
    }

    #[test]
    fn test_extract_url_without_protocol_marker() {
        assert_eq!(extract_url("GET /health").as_deref(), Some("/health"));
        // present but empty is not the same as absent
        assert_eq!(extract_url("GET HTTP/1.1").as_deref(), Some(""));
    }

    #[test]
    fn test_extract_url_first_keyword_wins() {
        assert_eq!(extract_url("POST /GET HTTP/1.1").as_deref(), Some("/GET"));
        // keywords inside the path are not split on
        assert_eq!(extract_url("GET /OUTPUT HTTP/1.1").as_deref(), Some("/OUTPUT"));
        assert_eq!(extract_url("GET /INPUT/x HTTP/1.1").as_deref(), Some("/INPUT/x"));
    }
}
