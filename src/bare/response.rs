//! Response building and the fixed routing table for the bare-socket server.

use super::request::{ParseError, RequestLine};
use crate::domain::GREETING;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Status codes the bare server can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    VersionNotSupported,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::VersionNotSupported => 505,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::VersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

/// A complete HTTP/1.1 response, always sent with `Connection: close`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    headers: Vec<(&'static str, String)>,
    body: Vec<u8>,
    omit_body: bool,
}

impl Response {
    /// Plain-text response with the given status and body.
    fn text(status: Status, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", TEXT_PLAIN.to_string())],
            body: body.as_bytes().to_vec(),
            omit_body: false,
        }
    }

    /// Plain-text body made of the status reason, e.g. `Not Found\n`.
    fn status_only(status: Status) -> Self {
        Self::text(status, &format!("{}\n", status.reason()))
    }

    /// Map a parse failure to the response sent back to the client.
    pub fn from_parse_error(err: &ParseError) -> Self {
        match err {
            ParseError::UnsupportedVersion(_) => Self::status_only(Status::VersionNotSupported),
            _ => Self::status_only(Status::BadRequest),
        }
    }

    fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    /// Keep the headers (including `Content-Length`) but send no body.
    fn without_body(mut self) -> Self {
        self.omit_body = true;
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        if self.omit_body {
            &[]
        } else {
            &self.body
        }
    }

    /// Serialize status line, headers and body for the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status.code(), self.status.reason());
        for (name, value) in &self.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        head.push_str("Connection: close\r\n\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(self.body());
        bytes
    }
}

/// Route a parsed request. Only `/` exists; it answers GET and HEAD.
pub fn route(request: &RequestLine) -> Response {
    match request.path() {
        "/" => match request.method() {
            "GET" => Response::text(Status::Ok, GREETING),
            "HEAD" => Response::text(Status::Ok, GREETING).without_body(),
            _ => Response::status_only(Status::MethodNotAllowed).with_header("Allow", "GET, HEAD"),
        },
        _ => Response::status_only(Status::NotFound),
    }
}
