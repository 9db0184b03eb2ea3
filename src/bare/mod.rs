//! Bare-socket variant of the greeting service.
//!
//! No framework: a `TcpListener` accept loop, a request-line parser, and a
//! fixed routing table. Connections are served strictly one at a time and
//! closed after a single response.

mod listener;
mod request;
mod response;

pub use listener::BareServer;
pub use request::{ParseError, RequestLine};
