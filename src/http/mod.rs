//! HTTP protocol pieces shared by the gateway.
//!
//! The gateway speaks a deliberately small subset of HTTP/1.0: it accepts
//! `GET <path> HTTP/1.0|HTTP/1.1` request lines, discards headers, and
//! closes the connection after every response.
//!
//! - **`request`**: the tokenized request line
//! - **`parser`**: request-line validation and its status-code mapping
//! - **`response`**: status codes and reason phrases
//! - **`writer`**: status-line, error-page and redirect emission

pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
