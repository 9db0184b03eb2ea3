//! Request-line parsing for the bare-socket server.
//!
//! Only the first line of the request is interpreted:
//!
//! ```text
//! GET /path?query HTTP/1.1\r\n
//! ```
//!
//! Headers and any body are read off the socket but otherwise ignored.

use thiserror::Error;

/// Errors produced while parsing a request line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was received before the peer closed.
    #[error("empty request")]
    Empty,

    /// The request line is not valid UTF-8.
    #[error("request line is not valid UTF-8")]
    InvalidEncoding,

    /// The request line does not have the `METHOD TARGET VERSION` shape.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// The protocol is something other than HTTP/1.x.
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(String),
}

/// The parsed first line of an HTTP/1.x request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    path: String,
    version: String,
}

impl RequestLine {
    /// Parse the request line at the start of `raw`.
    ///
    /// The line ends at the first `\n` (a preceding `\r` is dropped), or at
    /// the end of `raw` when no newline was received. Origin-form (`/path`),
    /// asterisk-form (`*`) and absolute-form (`http://host/path`) targets are
    /// accepted.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        let line_end = raw.iter().position(|&b| b == b'\n').unwrap_or(raw.len());
        let line = std::str::from_utf8(&raw[..line_end]).map_err(|_| ParseError::InvalidEncoding)?;
        let line = line.strip_suffix('\r').unwrap_or(line);
        let malformed = || ParseError::MalformedRequestLine(line.to_string());

        let mut parts = line.split(' ');
        let (method, target, version) = match (parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(t), Some(v)) if parts.next().is_none() => (m, t, v),
            _ => return Err(malformed()),
        };

        if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(malformed());
        }
        let path = target_path(target).ok_or_else(malformed)?;
        if !version.starts_with("HTTP/") {
            return Err(malformed());
        }
        if !version.starts_with("HTTP/1.") {
            return Err(ParseError::UnsupportedVersion(version.to_string()));
        }

        Ok(Self {
            method: method.to_string(),
            path: path.to_string(),
            version: version.to_string(),
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path component of the target, without scheme, authority or query.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn version(&self) -> &str {
        &self.version
    }
}

/// Reduce a request target to the path used for routing.
fn target_path(target: &str) -> Option<&str> {
    if target == "*" {
        return Some(target);
    }
    if target.starts_with('/') {
        return Some(strip_query(target));
    }

    // Absolute form: scheme "://" authority [path] ["?" query]
    let (scheme, rest) = target.split_once("://")?;
    if !(scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")) {
        return None;
    }
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    if authority_end == 0 {
        return None;
    }
    match &rest[authority_end..] {
        path if path.starts_with('/') => Some(strip_query(path)),
        _ => Some("/"),
    }
}

fn strip_query(target: &str) -> &str {
    target.split('?').next().unwrap_or_default()
}
