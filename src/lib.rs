//! # fluent-http
//!
//! fluent-http assembles an HTTP request through a chain of calls and executes it
//! on a blocking [reqwest](https://docs.rs/reqwest) client. The response body is
//! buffered, so it can be read as many times as needed, and it can be decoded as
//! JSON straight into a caller type.
//!
//! ## Usage
//!
//! ```no_run
//! use fluent_http::{mime_type, RequestBuilder};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Echo {
//!     data: String,
//! }
//!
//! let (response, echo): (_, Echo) = RequestBuilder::new()
//!     .post("http://httpbin.org/post")
//!     .content_type(mime_type::TEXT_PLAIN)
//!     .query_add("tag", "a")
//!     .query_add("tag", "b")
//!     .basic_auth("user", "password")
//!     .body("hello")
//!     .unmarshal_json()?;
//!
//! assert_eq!(response.status(), 200);
//! assert_eq!(echo.data, "hello");
//! # Ok::<(), fluent_http::Error>(())
//! ```
//!
//! ### Defaults
//!
//! Requests carry `Content-Type: application/json` unless another content type is
//! set, time out after 20 seconds and refuse response bodies over 10 MiB. See
//! [`ClientConfig`].
//!
//! ### Debug dumps
//!
//! With `debug(true)` the rendered request and response are written to the
//! builder's [`Logger`]. Each builder owns its logger; `RequestBuilder::new()`
//! creates one on standard output and [`LogLogger`] forwards to the `log` facade.
//!
//! ```no_run
//! use fluent_http::{LogLogger, RequestBuilder};
//!
//! let response = RequestBuilder::with_logger(LogLogger::default())
//!     .debug(true)
//!     .get("http://httpbin.org/get")
//!     .execute()?;
//! println!("{}", String::from_utf8_lossy(response.body()));
//! # Ok::<(), fluent_http::Error>(())
//! ```

use std::time::Duration;

mod builder;
mod error;
mod executor;
pub mod logger;
pub mod mime_type;
mod output;

pub use builder::{Body, Method, RequestBuilder};
pub use error::{Error, ErrorKind};
pub use logger::{LogLogger, Logger, WriterLogger};

pub type Result<T> = std::result::Result<T, Error>;

/// A fully buffered response; the body can be read any number of times.
pub type Response = http::Response<Vec<u8>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    /// Largest response body that will be buffered, in bytes.
    pub max_body_size: usize,
    pub ssl_check: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            max_body_size: 10 * 1024 * 1024,
            ssl_check: true,
        }
    }
}

impl ClientConfig {
    pub fn new(timeout: Duration, max_body_size: usize, ssl_check: bool) -> Self {
        Self {
            timeout,
            max_body_size,
            ssl_check,
        }
    }
}
