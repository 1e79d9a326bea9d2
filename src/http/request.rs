//! Request parsing.
//!
//! # Responsibilities
//! - Turn one framed request into a [`ParsedRequest`]
//! - Enforce the validation order: method, URI, headers, version, then the
//!   control interface, then the blocklist
//!
//! # Design Decisions
//! - Control paths are recognized before the blocklist is consulted, so
//!   control commands can never be blocked
//! - Header names are kept in insertion order because they flow into the
//!   canonical outbound request, and therefore into the cache key

use url::Url;

use crate::control;
use crate::http::server::ProxyState;

/// Methods the parser recognizes at all; of these only GET is implemented.
const KNOWN_METHODS: [&str; 4] = ["GET", "POST", "HEAD", "PUT"];

/// An insertion-ordered header collection.
///
/// Re-inserting an existing name replaces its value in place, so the last
/// occurrence wins while the original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The valid payload of a parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParts {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub headers: HeaderMap,
}

/// Outcome of parsing one client request.
///
/// Exactly one variant is produced per parse; the first four never touch the
/// network toward an origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRequest {
    /// Malformed method, URI, headers, or version.
    BadRequest,
    /// A recognized method other than GET.
    NotImplemented,
    /// A control-interface path; the state mutation already happened.
    ControlHandled,
    /// The resolved host:port matched the blocklist.
    Blocked,
    /// A well-formed, forwardable GET request.
    Valid(RequestParts),
}

/// Parse one framed request.
///
/// Validation order is load-bearing: method, absolute URI, headers, version,
/// control interface, blocklist. A failure at any step leaves cache and
/// blocklist state untouched.
pub fn parse_request(message: &[u8], state: &ProxyState) -> ParsedRequest {
    let text = String::from_utf8_lossy(message);

    let request_line = text.split("\r\n").next().unwrap_or("");
    let mut tokens = request_line.split_whitespace();

    let Some(method) = tokens.next() else {
        return ParsedRequest::BadRequest;
    };
    if !KNOWN_METHODS.contains(&method) {
        return ParsedRequest::BadRequest;
    }
    if method != "GET" {
        return ParsedRequest::NotImplemented;
    }

    let Some(target) = tokens.next() else {
        return ParsedRequest::BadRequest;
    };
    // An absolute URI needs a scheme, an authority, and an explicit path;
    // `Url::parse` would normalize a missing path to "/", so check the raw
    // target before parsing.
    let Some((_, after_scheme)) = target.split_once("://") else {
        return ParsedRequest::BadRequest;
    };
    if !after_scheme.contains('/') {
        return ParsedRequest::BadRequest;
    }
    let Ok(uri) = Url::parse(target) else {
        return ParsedRequest::BadRequest;
    };
    let Some(host) = uri.host_str() else {
        return ParsedRequest::BadRequest;
    };

    let header_section = match text.find("\r\n\r\n") {
        Some(end) => &text[..end],
        None => text.as_ref(),
    };
    let mut headers = HeaderMap::new();
    for line in header_section.split("\r\n").skip(1) {
        let Some((name, value)) = line.split_once(": ") else {
            return ParsedRequest::BadRequest;
        };
        if name.ends_with(' ') {
            return ParsedRequest::BadRequest;
        }
        headers.insert(name, value);
    }

    match tokens.next() {
        Some("HTTP/1.0") => {}
        _ => return ParsedRequest::BadRequest,
    }

    let host = host.to_string();
    let port = uri.port().unwrap_or(80);
    let path = uri.path().to_string();

    if control::try_handle(&path, state) {
        return ParsedRequest::ControlHandled;
    }

    if state.blocklist.is_blocked(&format!("{host}:{port}")) {
        return ParsedRequest::Blocked;
    }

    ParsedRequest::Valid(RequestParts {
        host,
        port,
        path,
        headers,
    })
}
