//! URL decomposition into a three-level content hierarchy.
//!
//! Level 1 is the host (netloc), levels 2 and 3 are the first two path
//! segments. URLs without a scheme are treated as `host/segment/segment`.

use std::sync::LazyLock;

use regex::Regex;

/// RFC 3986 appendix B, restricted to syntactically valid schemes.
const URI_PATTERN: &str =
    r"(?s)^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$";

static URI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URI_PATTERN).expect("invalid URI pattern"));

/// The hierarchical levels of a URL.
///
/// Levels are contiguous from the root: once a level is `None`, every
/// deeper level is `None` as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlLevels {
    pub level1: Option<String>,
    pub level2: Option<String>,
    pub level3: Option<String>,
}

impl UrlLevels {
    fn from_parts<'a>(mut parts: impl Iterator<Item = &'a str>) -> Self {
        let level1 = parts.next().map(str::to_string);
        let level2 = level1.as_ref().and(parts.next()).map(str::to_string);
        let level3 = level2.as_ref().and(parts.next()).map(str::to_string);
        Self {
            level1,
            level2,
            level3,
        }
    }

    /// Returns the levels as a tuple.
    pub fn as_tuple(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            self.level1.as_deref(),
            self.level2.as_deref(),
            self.level3.as_deref(),
        )
    }
}

/// Components of a URL split per RFC 3986. Query and fragment are kept for
/// completeness but never contribute to levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Split a URL into `(scheme, netloc, path, query, fragment)`.
///
/// Never fails: anything that is not a recognizable component lands in `path`.
pub fn split_url(url: &str) -> UrlParts<'_> {
    let Some(caps) = URI_REGEX.captures(url) else {
        return UrlParts {
            path: url,
            ..UrlParts::default()
        };
    };
    let group = |i| caps.get(i).map(|m| m.as_str()).unwrap_or("");
    UrlParts {
        scheme: group(1),
        netloc: group(2),
        path: group(3),
        query: group(4),
        fragment: group(5),
    }
}

/// Decompose a URL into its host and first two path segments.
///
/// Empty path segments (double slashes, leading or trailing `/`) are skipped.
pub fn decompose(url: Option<&str>) -> UrlLevels {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return UrlLevels::default();
    };

    let parts = split_url(url);
    let segments = parts.path.split('/').filter(|s| !s.is_empty());

    if parts.netloc.is_empty() && !parts.path.is_empty() {
        // No authority: the host is the first path segment.
        return UrlLevels::from_parts(segments);
    }

    let netloc = Some(parts.netloc).filter(|n| !n.is_empty());
    UrlLevels::from_parts(netloc.into_iter().chain(segments))
}
