//! Location policy for documentation pages
//!
//! Before any network I/O happens the requested location is checked against a
//! [`LocationPolicy`]. The default [`DocsSitePolicy`] only lets through pages
//! served from a single documentation host whose location ends with one of the
//! approved page suffixes.

/// Host the documentation tools are scoped to by default
pub const DEFAULT_DOCS_HOST: &str = "docs.oracle.com";

/// Page suffixes accepted by default
pub const DEFAULT_PAGE_SUFFIXES: &[&str] = &[".htm", ".html"];

/// Why a location was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("URL must be from the {host} domain")]
    Host { host: String },

    #[error("URL must end with {}", .suffixes.join(" or "))]
    Suffix { suffixes: Vec<String> },
}

/// Predicate over locations deciding whether they may be fetched
pub trait LocationPolicy: Send + Sync {
    fn check(&self, location: &str) -> Result<(), PolicyViolation>;

    /// Host used to scope search queries
    fn host(&self) -> &str;
}

/// Single-host policy with a page suffix allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsSitePolicy {
    host: String,
    suffixes: Vec<String>,
}

impl DocsSitePolicy {
    pub fn new(host: impl Into<String>, suffixes: &[&str]) -> Self {
        Self {
            host: host.into(),
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Policy for the given host with the default `.htm`/`.html` suffixes
    pub fn for_host(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PAGE_SUFFIXES)
    }

    fn host_matches(&self, location: &str) -> bool {
        location
            .strip_prefix("https://")
            .or_else(|| location.strip_prefix("http://"))
            .and_then(|rest| rest.strip_prefix(self.host.as_str()))
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl Default for DocsSitePolicy {
    fn default() -> Self {
        Self::for_host(DEFAULT_DOCS_HOST)
    }
}

impl LocationPolicy for DocsSitePolicy {
    fn check(&self, location: &str) -> Result<(), PolicyViolation> {
        if !self.host_matches(location) {
            return Err(PolicyViolation::Host {
                host: self.host.clone(),
            });
        }

        if !self.suffixes.iter().any(|suffix| location.ends_with(suffix)) {
            return Err(PolicyViolation::Suffix {
                suffixes: self.suffixes.clone(),
            });
        }

        Ok(())
    }

    fn host(&self) -> &str {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_htm_and_html_pages() {
        let policy = DocsSitePolicy::default();
        assert!(policy
            .check("https://docs.oracle.com/en-us/iaas/Content/home.htm")
            .is_ok());
        assert!(policy
            .check("http://docs.oracle.com/en/database/index.html")
            .is_ok());
    }

    #[test]
    fn test_rejects_other_host() {
        let policy = DocsSitePolicy::default();
        let err = policy.check("https://example.com/page.htm").unwrap_err();
        assert_eq!(err.to_string(), "URL must be from the docs.oracle.com domain");
    }

    #[test]
    fn test_rejects_lookalike_hosts() {
        let policy = DocsSitePolicy::default();
        assert!(policy.check("https://docs.oracle.com.evil.io/a.htm").is_err());
        assert!(policy.check("https://xdocs.oracle.com/a.htm").is_err());
        assert!(policy.check("ftp://docs.oracle.com/a.htm").is_err());
        assert!(policy.check("https://docs.oracle.com").is_err());
    }

    #[test]
    fn test_rejects_wrong_suffix() {
        let policy = DocsSitePolicy::default();
        let err = policy.check("https://docs.oracle.com/page.txt").unwrap_err();
        assert_eq!(err.to_string(), "URL must end with .htm or .html");
    }

    #[test]
    fn test_host_is_checked_before_suffix() {
        let policy = DocsSitePolicy::default();
        let err = policy.check("https://example.com/page.txt").unwrap_err();
        assert!(matches!(err, PolicyViolation::Host { .. }));
    }

    #[test]
    fn test_custom_host_and_suffixes() {
        let policy = DocsSitePolicy::new("docs.example.org", &[".md"]);
        assert_eq!(policy.host(), "docs.example.org");
        assert!(policy.check("https://docs.example.org/guide.md").is_ok());
        let err = policy.check("https://docs.example.org/guide.htm").unwrap_err();
        assert_eq!(err.to_string(), "URL must end with .md");
    }
}
