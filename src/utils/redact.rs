//! Redaction of secrets before they reach the logs.

use regex::Regex;
use std::sync::OnceLock;

fn api_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(appid|api_?key|key)=[^&\s]*").expect("static pattern is valid")
    })
}

/// Mask credential query parameters in a URL or log line
pub fn redact_credentials(input: &str) -> String {
    api_key_pattern()
        .replace_all(input, "$1=[REDACTED]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appid_is_masked() {
        let url = "https://api.openweathermap.org/data/2.5/weather?q=Paris&appid=abc123&units=metric";
        let redacted = redact_credentials(url);

        assert!(!redacted.contains("abc123"));
        assert!(redacted.contains("appid=[REDACTED]"));
        assert!(redacted.contains("q=Paris"));
        assert!(redacted.contains("units=metric"));
    }

    #[test]
    fn test_other_key_spellings() {
        assert_eq!(redact_credentials("x?api_key=s3cr3t"), "x?api_key=[REDACTED]");
        assert_eq!(redact_credentials("x?APIKEY=s3cr3t&a=1"), "x?APIKEY=[REDACTED]&a=1");
    }

    #[test]
    fn test_text_without_secrets_unchanged() {
        let line = "GET /webhook 200";
        assert_eq!(redact_credentials(line), line);
    }
}
