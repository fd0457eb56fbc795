//! Script URL resolution

/// Release channel used when the host does not pick one
pub const DEFAULT_CLOUD_CHANNEL: &str = "5";

/// API key used in the default URL when the host supplies none
pub const PLACEHOLDER_API_KEY: &str = "no-api-key";

/// Resolves the library script URL
///
/// An explicit source is used verbatim. Otherwise the CDN URL is built from
/// the API key (or the placeholder when absent or empty) and the channel.
pub fn resolve_script_src(explicit: Option<&str>, api_key: Option<&str>, channel: &str) -> String {
    if let Some(src) = explicit {
        return src.to_string();
    }
    let api_key = match api_key {
        Some(key) if !key.is_empty() => key,
        _ => PLACEHOLDER_API_KEY,
    };
    format!(
        "https://cdn.tiny.cloud/1/{}/tinymce/{}/tinymce.min.js",
        api_key, channel
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        assert_eq!(
            resolve_script_src(None, None, DEFAULT_CLOUD_CHANNEL),
            "https://cdn.tiny.cloud/1/no-api-key/tinymce/5/tinymce.min.js"
        );
    }

    #[test]
    fn test_api_key_and_channel() {
        assert_eq!(
            resolve_script_src(None, Some("abc123"), "5-dev"),
            "https://cdn.tiny.cloud/1/abc123/tinymce/5-dev/tinymce.min.js"
        );
    }

    #[test]
    fn test_empty_api_key_uses_placeholder() {
        assert!(resolve_script_src(None, Some(""), "5").contains("/no-api-key/"));
    }

    #[test]
    fn test_explicit_source_wins() {
        assert_eq!(
            resolve_script_src(Some("/assets/tinymce.js"), Some("abc"), "5"),
            "/assets/tinymce.js"
        );
    }
}
