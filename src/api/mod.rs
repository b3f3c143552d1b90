//! Client-facing surface: status snapshot, control commands, routing and
//! the transport hand-off.
//!
//! Every route resolves to an [`HttpResponse`] value. Transport adapters
//! only copy it onto the wire, so nothing here depends on a network stack.

pub mod channels;
pub mod control;
pub mod routes;
pub mod status;

pub const CONTENT_TYPE_TEXT: &str = "text/plain";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html";

/// Transport-independent response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::text(200, body)
    }

    pub fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_HTML,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::text(404, "Not Found")
    }

    /// The control loop is backed up; the client should retry.
    pub fn unavailable() -> Self {
        Self::text(503, "Busy")
    }
}
