//! Status capture around an inner handler's response.

use axum::http::{Response, StatusCode};

/// Remembers the status of the response passing through it.
///
/// Starts at `200 OK`, which is also what axum sends when a handler never
/// picks a status. `record` hands the response back untouched: headers, body
/// and status all reach the caller exactly as the handler produced them.
#[derive(Debug, Clone, Copy)]
pub struct StatusCapture {
    status: StatusCode,
}

impl Default for StatusCapture {
    fn default() -> Self {
        Self { status: StatusCode::OK }
    }
}

impl StatusCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<B>(&mut self, response: Response<B>) -> Response<B> {
        self.status = response.status();
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Decimal status code, e.g. `"404"`.
    pub fn status_label(&self) -> &str {
        self.status.as_str()
    }
}
