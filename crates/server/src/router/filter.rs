//! Request matching for router items.
//!
//! A router item matches on the method with a [`MethodFilter`] and on the path
//! with a [`PathMatcher`]. Path matching is literal: no percent-decoding, no
//! trailing-slash normalization and no segment semantics.

use http::Method;

/// Matches a request path either exactly or by literal prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatcher {
    /// The path must equal this string
    Exact(String),
    /// The path must start with this string; the rest is handed to the handler
    Prefix(String),
}

impl PathMatcher {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Returns the unmatched tail of `path`, or `None` if this matcher rejects it.
    pub fn matches<'p>(&self, path: &'p str) -> Option<&'p str> {
        match self {
            PathMatcher::Exact(expected) => (path == expected).then_some(""),
            PathMatcher::Prefix(prefix) => path.strip_prefix(prefix.as_str()),
        }
    }
}

/// Parses a route pattern: a trailing `*` makes it a prefix match.
///
/// ```
/// use raw_http_server::router::filter::PathMatcher;
///
/// assert_eq!(PathMatcher::from("/"), PathMatcher::exact("/"));
/// assert_eq!(PathMatcher::from("/echo/*"), PathMatcher::prefix("/echo/"));
/// ```
impl From<&str> for PathMatcher {
    fn from(pattern: &str) -> Self {
        match pattern.strip_suffix('*') {
            Some(prefix) => Self::prefix(prefix),
            None => Self::exact(pattern),
        }
    }
}

/// Matches a request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodFilter(Method);

impl MethodFilter {
    pub fn new(method: Method) -> Self {
        Self(method)
    }

    pub fn method(&self) -> &Method {
        &self.0
    }

    pub fn matches(&self, method: &Method) -> bool {
        self.0 == *method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        let matcher = PathMatcher::exact("/");
        assert_eq!(matcher.matches("/"), Some(""));
        assert_eq!(matcher.matches("/index.html"), None);
        assert_eq!(matcher.matches(""), None);
    }

    #[test]
    fn prefix_match_returns_raw_tail() {
        let matcher = PathMatcher::from("/echo/*");
        assert_eq!(matcher.matches("/echo/abc"), Some("abc"));
        assert_eq!(matcher.matches("/echo/a%20b/c"), Some("a%20b/c"));
        assert_eq!(matcher.matches("/echo/"), Some(""));
        assert_eq!(matcher.matches("/echo"), None);
        assert_eq!(matcher.matches("/ECHO/abc"), None);
    }

    #[test]
    fn method_filter() {
        let filter = MethodFilter::new(Method::GET);
        assert!(filter.matches(&Method::GET));
        assert!(!filter.matches(&Method::POST));
        assert!(!filter.matches(&Method::HEAD));
    }
}
