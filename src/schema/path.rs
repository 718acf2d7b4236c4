/// Reduces a URL or path to the page identity used as the join key.
///
/// A leading `http://host` or `https://host` is removed; an empty remainder
/// becomes `/`. Anything else passes through untouched, so the function is
/// idempotent.
pub fn canonicalize_path(raw: &str) -> String {
    let stripped = strip_scheme_and_host(raw).unwrap_or(raw);
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

fn strip_scheme_and_host(raw: &str) -> Option<&str> {
    let after_scheme = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))?;
    let host_len = after_scheme.find('/').unwrap_or(after_scheme.len());
    if host_len == 0 {
        return None;
    }
    Some(&after_scheme[host_len..])
}

#[cfg(test)]
mod tests {
    use super::canonicalize_path;

    #[test]
    fn strips_scheme_and_host() {
        assert_eq!(canonicalize_path("https://a.com/blog/post"), "/blog/post");
        assert_eq!(canonicalize_path("http://www.a.com/x?utm=1"), "/x?utm=1");
        assert_eq!(canonicalize_path("/already/a/path"), "/already/a/path");
    }

    #[test]
    fn bare_host_becomes_root() {
        assert_eq!(canonicalize_path("https://a.com"), "/");
        assert_eq!(canonicalize_path("http://a.com/"), "/");
        assert_eq!(canonicalize_path(""), "/");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "https://a.com",
            "https://a.com/p",
            "http:///odd",
            "https://",
            "relative/page",
            "/",
            "https://a.com/https://b.com/c",
        ];
        for input in inputs {
            let once = canonicalize_path(input);
            assert_eq!(canonicalize_path(&once), once, "input {input}");
        }
    }

    #[test]
    fn only_lowercase_http_schemes_are_stripped() {
        assert_eq!(canonicalize_path("ftp://a.com/x"), "ftp://a.com/x");
        assert_eq!(canonicalize_path("HTTPS://a.com/x"), "HTTPS://a.com/x");
    }
}
