use url::Url;

use crate::errors::{AppError, OriginPatternError};

/// Origin sent by browsers for documents loaded from `file://`.
pub const NULL_ORIGIN: &str = "null";

pub fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:5500",
        "http://localhost:8000",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5500",
        "http://127.0.0.1:8000",
        "http://localhost",
        "http://127.0.0.1",
        "https://*.github.io",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OriginRule {
    Any,
    Null,
    Exact {
        scheme: String,
        host: String,
        port: u16,
    },
    /// `scheme://*.suffix[:port]`: any strict subdomain of `suffix`.
    Subdomain {
        scheme: String,
        suffix: String,
        port: u16,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct RequestOrigin {
    scheme: String,
    host: String,
    port: u16,
}

/// Static list of origins allowed to call the API cross-origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginAllowList {
    rules: Vec<OriginRule>,
}

impl OriginAllowList {
    pub fn new<I, S>(entries: I, allow_null_origin: bool) -> Result<Self, OriginPatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = entries
            .into_iter()
            .map(|entry| parse_rule(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if allow_null_origin && !rules.contains(&OriginRule::Null) {
            rules.push(OriginRule::Null);
        }

        Ok(OriginAllowList { rules })
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim();

        if origin.eq_ignore_ascii_case(NULL_ORIGIN) {
            return self.rules.iter().any(|r| matches!(r, OriginRule::Any | OriginRule::Null));
        }

        if self.allows_any() {
            return true;
        }

        let Some(request) = parse_request_origin(origin) else {
            return false;
        };

        self.rules.iter().any(|rule| match rule {
            OriginRule::Any => true,
            OriginRule::Null => false,
            OriginRule::Exact { scheme, host, port } => {
                request.scheme == *scheme && request.host == *host && request.port == *port
            }
            OriginRule::Subdomain { scheme, suffix, port } => {
                request.scheme == *scheme && request.port == *port && is_strict_subdomain(&request.host, suffix)
            }
        })
    }

    pub fn check(&self, origin: &str) -> Result<(), AppError> {
        if self.is_allowed(origin) {
            Ok(())
        } else {
            Err(AppError::OriginRejected(origin.to_string()))
        }
    }

    pub fn allows_any(&self) -> bool {
        self.rules.contains(&OriginRule::Any)
    }

    pub fn allows_null(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, OriginRule::Any | OriginRule::Null))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_rule(entry: &str) -> Result<OriginRule, OriginPatternError> {
    let entry = entry.trim();

    if entry.is_empty() {
        return Err(OriginPatternError::Empty);
    }
    if entry == "*" {
        return Ok(OriginRule::Any);
    }
    if entry.eq_ignore_ascii_case(NULL_ORIGIN) {
        return Ok(OriginRule::Null);
    }

    if entry.contains('*') {
        return parse_wildcard_rule(entry);
    }

    let origin = parse_request_origin(entry)
        .ok_or_else(|| OriginPatternError::Invalid(entry.to_string()))?;

    Ok(OriginRule::Exact {
        scheme: origin.scheme,
        host: origin.host,
        port: origin.port,
    })
}

fn parse_wildcard_rule(entry: &str) -> Result<OriginRule, OriginPatternError> {
    let (scheme, rest) = entry
        .split_once("://")
        .ok_or_else(|| OriginPatternError::Invalid(entry.to_string()))?;

    let suffix_and_port = rest
        .strip_prefix("*.")
        .ok_or_else(|| OriginPatternError::MisplacedWildcard(entry.to_string()))?;

    if suffix_and_port.contains('*') {
        return Err(OriginPatternError::MisplacedWildcard(entry.to_string()));
    }

    // Reuse the URL parser on a concrete stand-in host for validation.
    let probe = parse_request_origin(&format!("{scheme}://wildcard.{suffix_and_port}"))
        .ok_or_else(|| OriginPatternError::Invalid(entry.to_string()))?;

    let suffix = probe
        .host
        .strip_prefix("wildcard.")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| OriginPatternError::Invalid(entry.to_string()))?
        .to_string();

    Ok(OriginRule::Subdomain {
        scheme: probe.scheme,
        suffix,
        port: probe.port,
    })
}

/// Parses a serialized origin (`scheme://host[:port]`). Anything carrying a
/// path, query, fragment or credentials is not an origin.
fn parse_request_origin(origin: &str) -> Option<RequestOrigin> {
    if origin.ends_with('/') {
        return None;
    }

    let url = Url::parse(origin).ok()?;

    if (url.path() != "/" && !url.path().is_empty())
        || url.query().is_some()
        || url.fragment().is_some()
        || !url.username().is_empty()
        || url.password().is_some()
    {
        return None;
    }

    let host = url.host_str().filter(|h| !h.is_empty())?.to_ascii_lowercase();
    let port = url.port_or_known_default()?;

    Some(RequestOrigin {
        scheme: url.scheme().to_string(),
        host,
        port,
    })
}

fn is_strict_subdomain(host: &str, suffix: &str) -> bool {
    let Some(prefix) = host.strip_suffix(suffix).and_then(|p| p.strip_suffix('.')) else {
        return false;
    };

    !prefix.is_empty() && prefix.split('.').all(|label| !label.is_empty())
}
