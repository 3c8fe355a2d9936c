//! URL normalization and match classification.
//!
//! A URL is reduced to `(domain, path)` where `domain` is the first label of
//! the host with one leading `www.` removed (`https://www.example.com/foo` →
//! `("example", "/foo")`). Two URLs match when their domains are equal; the
//! match is exact when the paths are equal or the second URL has no path.
//!
//! Comparison is case-sensitive. The host is kept as the user wrote it, so
//! `Example.com` and `example.com` do not match even though the URL parser
//! would lowercase both.
//!
//! Paths are compared as written: `/a b` and `/a%20b` are different paths.
//! Internationalized hosts are the one exception to "as written"; they
//! compare (and seed the search) in their punycode form, the same on both
//! sides.
//!
//! Strings that do not parse (including schemeless `example.com`) normalize to
//! `(input, "")` instead of failing, so classification always has something
//! to compare.

use url::Url;

use constellate_common::ConstellateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub domain: String,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlMatch {
    pub matches: bool,
    pub is_exact: bool,
}

pub fn normalize_url(raw: &str) -> NormalizedUrl {
    let Ok(parsed) = Url::parse(raw) else {
        return NormalizedUrl {
            domain: raw.to_string(),
            path: String::new(),
        };
    };

    let host = match parsed.host_str() {
        Some(parsed_host) if !parsed_host.is_empty() => host_as_written(raw, parsed_host),
        _ => raw,
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    let domain = host.split('.').next().unwrap_or(host);

    NormalizedUrl {
        domain: domain.to_string(),
        path: path_as_written(raw, &parsed),
    }
}

/// Decide whether `source` refers to the same site as `candidate`, and whether
/// it is the same page. An empty path on `source` counts as exact.
pub fn classify_match(candidate: &str, source: &str) -> UrlMatch {
    let a = normalize_url(candidate);
    let b = normalize_url(source);
    let matches = a.domain == b.domain;
    let is_exact = matches && (a.path == b.path || b.path.is_empty());
    UrlMatch { matches, is_exact }
}

/// Validate the user's URL and derive the search query seed from it.
/// The candidate must parse and carry a host.
pub fn domain_token(candidate: &str) -> Result<String, ConstellateError> {
    let parsed = Url::parse(candidate)
        .map_err(|e| ConstellateError::InvalidInput(format!("{candidate}: {e}")))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(normalize_url(candidate).domain),
        _ => Err(ConstellateError::InvalidInput(format!(
            "{candidate}: URL has no host"
        ))),
    }
}

/// The text between `://` and the first `/`, `?` or `#`.
fn authority(raw: &str) -> Option<&str> {
    let rest = &raw[raw.find("://")? + 3..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Everything after the authority: path, query and fragment as written.
fn after_authority(raw: &str) -> Option<&str> {
    let start = raw.find("://")? + 3;
    let len = authority(raw)?.len();
    Some(&raw[start + len..])
}

/// The host exactly as it appears in `raw`, falling back to the parser's
/// (lowercased, IDNA-encoded) host when the two disagree beyond ASCII case.
fn host_as_written<'a>(raw: &'a str, parsed_host: &'a str) -> &'a str {
    authority(raw)
        .map(|auth| auth.rsplit_once('@').map_or(auth, |(_, host)| host))
        .map(strip_port)
        .filter(|host| host.eq_ignore_ascii_case(parsed_host))
        .unwrap_or(parsed_host)
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split_once(':').map_or(host, |(h, _)| h)
}

/// The path exactly as it appears in `raw`: no percent-encoding, no dot
/// segment removal, and `""` when nothing but a query or fragment follows the
/// authority (the parser would report `/`).
fn path_as_written(raw: &str, parsed: &Url) -> String {
    let raw = raw.trim_matches(|c: char| c <= ' ');
    match after_authority(raw) {
        Some(tail) if !parsed.cannot_be_a_base() => {
            let end = tail.find(['?', '#']).unwrap_or(tail.len());
            tail[..end].to_string()
        }
        _ => parsed.path().to_string(),
    }
}
