//! Domain extraction from decoded GFWList rules.
//!
//! This is a heuristic, not an ad-block rule parser: each rule line yields
//! at most one domain, the first domain-like substring found in it. Rules
//! that only make sense as wildcards or regexes may be missed, and some
//! non-domain tokens may slip through.
//!
//! Per line, in order:
//! 1. trim; skip blank lines and lines starting with `!`, `[` or `@`
//! 2. take the first match of [`DOMAIN_PATTERN`], lower-cased and trimmed
//! 3. reject bare dotted-quad IPv4 literals
//! 4. reject anything containing `localhost`
//! 5. strip one leading `.`
//! 6. keep only if non-empty and still containing a `.`

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Optional `||` or `.*` prefix, then `label.rest`
pub const DOMAIN_PATTERN: &str = r"(?:\|\||\.\*)?([a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+)";

static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DOMAIN_PATTERN).expect("domain pattern is valid"));

static DOTTED_QUAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("dotted quad pattern is valid")
});

/// Line prefixes for comments (`!`), section headers (`[AutoProxy]`) and
/// exception rules (`@@`)
const SKIPPED_PREFIXES: [char; 3] = ['!', '[', '@'];

/// Returns true for a bare `a.b.c.d` literal with 1-3 digits per part.
///
/// Octet ranges are not checked; `999.1.1.1` still counts as an IP-like
/// token to reject.
pub fn is_dotted_quad(s: &str) -> bool {
    DOTTED_QUAD_RE.is_match(s)
}

/// Extract the candidate domain from a single rule line.
///
/// # Examples
/// ```
/// use fwdlist::extractor::extract_line;
/// assert_eq!(extract_line("||example.com^"), Some("example.com".to_string()));
/// assert_eq!(extract_line("@@||good.example.com|"), None);
/// assert_eq!(extract_line("192.168.1.1"), None);
/// ```
pub fn extract_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(SKIPPED_PREFIXES) {
        return None;
    }

    let captures = DOMAIN_RE.captures(line)?;
    let candidate = captures.get(1)?.as_str().trim().to_ascii_lowercase();

    if is_dotted_quad(&candidate) || candidate.contains("localhost") {
        return None;
    }

    let domain = candidate.strip_prefix('.').unwrap_or(&candidate);
    if domain.is_empty() || !domain.contains('.') {
        return None;
    }

    Some(domain.to_string())
}

/// Extract the sorted, de-duplicated domain set from decoded list text.
pub fn extract(decoded: &str) -> Vec<String> {
    let domains: BTreeSet<String> = decoded.lines().filter_map(extract_line).collect();
    domains.into_iter().collect()
}
