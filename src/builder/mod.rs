use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::logger::{Logger, WriterLogger};
use crate::ClientConfig;


#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match *self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
        };
        f.write_str(method)
    }
}

/// Request body input, resolved by the caller rather than by inspecting the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
}

impl Body {
    /// Captures a serializable value as a structured body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Body> {
        serde_json::to_value(value).map(Body::Json)
    }

    /// `None` for a structured value that is not a JSON object.
    fn into_bytes(self) -> serde_json::Result<Option<Vec<u8>>> {
        match self {
            Body::Text(text) => Ok(Some(text.into_bytes())),
            Body::Bytes(bytes) => Ok(Some(bytes)),
            Body::Json(value) if value.is_object() => serde_json::to_vec(&value).map(Some),
            Body::Json(_) => Ok(None),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

/// Accumulates one request through chained calls.
///
/// Nothing is validated while building; `execute` checks the url and the
/// logger before any network activity. Calling `execute` again sends the
/// request again.
pub struct RequestBuilder<'a> {
    pub(crate) url: String,
    pub(crate) method: Method,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) queries: BTreeMap<String, Vec<String>>,
    pub(crate) debug: bool,
    pub(crate) config: ClientConfig,
    pub(crate) basic_auth: Option<(String, String)>,
    pub(crate) body: Vec<u8>,
    pub(crate) body_error: Option<serde_json::Error>,
    pub(crate) logger: Option<Box<dyn Logger + 'a>>,
    pub(crate) client: Option<(ClientConfig, Client)>,
}

impl<'a> Default for RequestBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> fmt::Debug for RequestBuilder<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("queries", &self.queries)
            .field("debug", &self.debug)
            .field("config", &self.config)
            .field("basic_auth", &self.basic_auth.as_ref().map(|(user, _)| user))
            .field("body_len", &self.body.len())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl<'a> RequestBuilder<'a> {
    /// A builder that dumps to its own standard output logger.
    pub fn new() -> RequestBuilder<'a> {
        Self::with_logger(WriterLogger::stdout())
    }

    pub fn with_logger<L: Logger + 'a>(logger: L) -> RequestBuilder<'a> {
        RequestBuilder {
            url: String::new(),
            method: Method::default(),
            headers: HashMap::new(),
            queries: BTreeMap::new(),
            debug: false,
            config: ClientConfig::default(),
            basic_auth: None,
            body: Vec::new(),
            body_error: None,
            logger: Some(Box::new(logger)),
            client: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> RequestBuilder<'a> {
        Self::new().config(config)
    }

    pub fn get(self, url: impl Into<String>) -> Self {
        self.target(Method::Get, url)
    }

    pub fn post(self, url: impl Into<String>) -> Self {
        self.target(Method::Post, url)
    }

    pub fn put(self, url: impl Into<String>) -> Self {
        self.target(Method::Put, url)
    }

    pub fn delete(self, url: impl Into<String>) -> Self {
        self.target(Method::Delete, url)
    }

    pub fn head(self, url: impl Into<String>) -> Self {
        self.target(Method::Head, url)
    }

    pub fn patch(self, url: impl Into<String>) -> Self {
        self.target(Method::Patch, url)
    }

    fn target(mut self, method: Method, url: impl Into<String>) -> Self {
        self.method = method;
        self.url = url.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn content_type(self, mime: impl Into<String>) -> Self {
        self.header("Content-Type", mime)
    }

    /// Same as [`query_set`](Self::query_set).
    pub fn query(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_set(key, value)
    }

    /// Replaces every value previously set for `key`.
    pub fn query_set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.insert(key.into(), vec![value.into()]);
        self
    }

    /// Appends another value for `key`.
    pub fn query_add(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.config.max_body_size = max_body_size;
        self
    }

    pub fn ssl_check(mut self, ssl_check: bool) -> Self {
        self.config.ssl_check = ssl_check;
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// `None` leaves the builder without a logger, which `execute` rejects.
    pub fn logger(mut self, logger: Option<Box<dyn Logger + 'a>>) -> Self {
        self.logger = logger;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Structured values follow the same rule as
    /// [`json_body`](Self::json_body): only JSON objects replace the body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        match body.into().into_bytes() {
            Ok(Some(bytes)) => self.set_body(bytes),
            Ok(None) => {}
            Err(e) => self.body_error = Some(e),
        }
        self
    }

    pub fn string_body(mut self, body: impl Into<String>) -> Self {
        self.set_body(body.into().into_bytes());
        self
    }

    /// Serializes `value` as the body when it is a map or a struct. Values
    /// that serialize to anything other than a JSON object leave the body as
    /// it was.
    pub fn json_body<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) if bytes.first() == Some(&b'{') => self.set_body(bytes),
            Ok(_) => {}
            Err(e) => self.body_error = Some(e),
        }
        self
    }

    /// Form-encodes the pairs in the order they are yielded. Keys and values
    /// are percent-encoded. The content type is not changed; pair it with
    /// `content_type(mime_type::APPLICATION_FORM_URLENCODED)`.
    pub fn url_encoded_body<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        self.set_body(serializer.finish().into_bytes());
        self
    }

    fn set_body(&mut self, bytes: Vec<u8>) {
        self.body = bytes;
        self.body_error = None;
    }
}
