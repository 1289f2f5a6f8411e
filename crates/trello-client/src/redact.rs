use reqwest::Url;

pub const REDACTED: &str = "***";

const SECRET_PARAMS: [&str; 2] = ["key", "token"];

/// Render a request URL for logging with credentials replaced by [`REDACTED`].
///
/// The `key` and `token` query values are replaced structurally, then any
/// remaining literal occurrence of a secret (in the path, say) is scrubbed.
pub fn mask_secrets(url: &Url, secrets: &[&str]) -> String {
    let mut masked = url.clone();
    if url.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let value = if SECRET_PARAMS.contains(&k.as_ref()) {
                    REDACTED.to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), value)
            })
            .collect();
        masked.query_pairs_mut().clear().extend_pairs(pairs);
    }

    scrub_secrets(masked.as_str(), secrets)
}

/// Replace every literal occurrence of a secret in `text` with [`REDACTED`].
pub fn scrub_secrets(text: &str, secrets: &[&str]) -> String {
    let mut scrubbed = text.to_string();
    for secret in secrets.iter().filter(|s| !s.is_empty()) {
        scrubbed = scrubbed.replace(secret, REDACTED);
    }
    scrubbed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_key_and_token_params() {
        let url =
            Url::parse("https://api.trello.com/1/boards/b1?fields=id&key=abc123&token=tok789")
                .unwrap();
        let masked = mask_secrets(&url, &["abc123", "tok789"]);
        assert!(!masked.contains("abc123"));
        assert!(!masked.contains("tok789"));
        assert!(masked.contains("fields=id"));
        assert!(masked.contains("key=***") || masked.contains("key=%2A%2A%2A"));
    }

    #[test]
    fn test_masks_secret_in_path() {
        let url = Url::parse("https://api.trello.com/1/boards/abc123?key=abc123").unwrap();
        let masked = mask_secrets(&url, &["abc123"]);
        assert!(!masked.contains("abc123"));
    }

    #[test]
    fn test_scrub_secrets_in_text() {
        let scrubbed = scrub_secrets(r#"{"text":"invalid token tok789"}"#, &["abc123", "tok789"]);
        assert_eq!(scrubbed, r#"{"text":"invalid token ***"}"#);
    }

    #[test]
    fn test_url_without_query() {
        let url = Url::parse("https://api.trello.com/1/members/me").unwrap();
        assert_eq!(
            mask_secrets(&url, &["", "zzz"]),
            "https://api.trello.com/1/members/me"
        );
    }
}
