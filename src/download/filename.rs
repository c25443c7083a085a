//! Filename derivation for resolved files.
//!
//! The response filename is chosen in a fixed order: whatever the resolver
//! reported, then the last segment of the final request URL, then
//! [`DEFAULT_FILENAME`].

use url::Url;

/// Name used when neither the resolver nor the URL yields one.
pub const DEFAULT_FILENAME: &str = "download";

/// Picks the response filename for a resolved file. Never returns an empty string.
#[must_use]
pub fn resolve_filename(resolved: &str, final_url: &str) -> String {
    if !resolved.is_empty() {
        return resolved.to_string();
    }
    let derived = filename_from_url(final_url);
    if !derived.is_empty() {
        return derived;
    }
    DEFAULT_FILENAME.to_string()
}

/// Best-effort filename from a URL's last path segment, percent-decoded.
///
/// Returns an empty string when the URL does not parse or its path ends in `/`.
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(last) = parsed.path_segments().and_then(|mut segments| segments.next_back()) else {
        return String::new();
    };
    if last.is_empty() {
        return String::new();
    }
    let decoded = urlencoding::decode(last).map_or_else(|_| last.to_string(), |d| d.into_owned());
    sanitize_filename(&decoded)
}

/// Parses a Content-Disposition header to extract the filename.
///
/// Handles:
/// - `attachment; filename="example.pdf"`
/// - `attachment; filename=example.pdf`
/// - `attachment; filename*=UTF-8''example.pdf` (RFC 5987)
#[must_use]
pub fn parse_content_disposition(header: &str) -> Option<String> {
    // RFC 5987 form wins when both are present
    if let Some(pos) = header.find("filename*=") {
        let value = header[pos + 10..].trim();
        if let Some(quote_pos) = value.find("''") {
            let encoded = &value[quote_pos + 2..];
            let end = encoded.find(';').unwrap_or(encoded.len());
            if let Ok(decoded) = urlencoding::decode(encoded[..end].trim()) {
                return Some(decoded.into_owned());
            }
        }
    }

    if let Some(pos) = header.find("filename=") {
        let value = header[pos + 9..].trim();

        if let Some(stripped) = value.strip_prefix('"') {
            if let Some(end) = stripped.find('"') {
                let filename = &stripped[..end];
                return (!filename.is_empty()).then(|| filename.to_string());
            }
        } else {
            let end = value.find(';').unwrap_or(value.len());
            let filename = value[..end].trim();
            if !filename.is_empty() {
                return Some(filename.to_string());
            }
        }
    }

    None
}

/// Replaces path separators and control characters.
///
/// The result is a display name for the caller, not a filesystem path, so
/// only characters that would make it look like one are rewritten.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized == "." || sanitized == ".." {
        return String::new();
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- resolve_filename ---

    #[test]
    fn test_resolve_filename_prefers_resolver_name() {
        assert_eq!(
            resolve_filename("report.pdf", "https://download.test/files/other.bin"),
            "report.pdf"
        );
    }

    #[test]
    fn test_resolve_filename_falls_back_to_url_segment() {
        assert_eq!(
            resolve_filename("", "https://download.test/files/archive.zip?token=1"),
            "archive.zip"
        );
    }

    #[test]
    fn test_resolve_filename_falls_back_to_default() {
        assert_eq!(resolve_filename("", "https://download.test/"), DEFAULT_FILENAME);
        assert_eq!(resolve_filename("", "not a url"), DEFAULT_FILENAME);
        assert_eq!(resolve_filename("", ""), DEFAULT_FILENAME);
    }

    // --- filename_from_url ---

    #[test]
    fn test_filename_from_url_uses_last_path_segment() {
        assert_eq!(
            filename_from_url("https://example.com/papers/thesis.pdf"),
            "thesis.pdf"
        );
    }

    #[test]
    fn test_filename_from_url_percent_decodes() {
        assert_eq!(
            filename_from_url("https://example.com/my%20report.pdf"),
            "my report.pdf"
        );
    }

    #[test]
    fn test_filename_from_url_trailing_slash_is_empty() {
        assert_eq!(filename_from_url("https://example.com/dir/"), "");
        assert_eq!(filename_from_url("https://example.com"), "");
    }

    #[test]
    fn test_filename_from_url_unparseable_is_empty() {
        assert_eq!(filename_from_url("bad"), "");
    }

    #[test]
    fn test_filename_from_url_encoded_separator_is_sanitized() {
        assert_eq!(filename_from_url("https://example.com/a%2Fb.txt"), "a_b.txt");
    }

    #[test]
    fn test_filename_from_url_dot_segment_is_empty() {
        assert_eq!(filename_from_url("https://example.com/%2E%2E"), "");
    }

    // --- parse_content_disposition ---

    #[test]
    fn test_parse_content_disposition_quoted() {
        let header = r#"attachment; filename="example.pdf""#;
        assert_eq!(
            parse_content_disposition(header),
            Some("example.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_unquoted_with_params() {
        let header = "attachment; filename=example.pdf; size=1234";
        assert_eq!(
            parse_content_disposition(header),
            Some("example.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_rfc5987() {
        let header = "attachment; filename*=UTF-8''example%20file.pdf";
        assert_eq!(
            parse_content_disposition(header),
            Some("example file.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_empty_quoted_is_none() {
        assert_eq!(parse_content_disposition(r#"attachment; filename="""#), None);
    }

    #[test]
    fn test_parse_content_disposition_missing() {
        assert_eq!(parse_content_disposition("attachment"), None);
    }
}
