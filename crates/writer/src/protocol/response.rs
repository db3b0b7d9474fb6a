//! HTTP response header handling.
//!
//! The head is the standard `http::Response` with an empty body placeholder,
//! built from the status and header map a sink holds at commit time.

use http::{HeaderMap, Response, StatusCode};

/// Type alias for HTTP response headers.
///
/// This type represents the header portion of an HTTP response, using
/// `http::Response<()>` with an empty body placeholder.
pub type ResponseHead = Response<()>;

pub(crate) fn build_response_head(status: StatusCode, headers: HeaderMap) -> ResponseHead {
    let mut head = Response::new(());
    *head.status_mut() = status;
    *head.headers_mut() = headers;
    head
}
