use crate::error::ErrorKind::{
    BodyTooLarge, Decode, Encode, InvalidHeader, InvalidResponse, InvalidUrl, LoggerEmpty, ReadBody,
    Transport, UrlEmpty,
};
use crate::Response;
use std::fmt::Formatter;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
}

#[derive(Debug)]
pub enum ErrorKind {
    UrlEmpty,
    LoggerEmpty,
    InvalidUrl(String, url::ParseError),
    InvalidHeader(String),
    Encode(serde_json::Error),
    Transport(reqwest::Error),
    ReadBody(std::io::Error),
    BodyTooLarge(usize),
    InvalidResponse(http::Error),
    /// The body did not match the target type. The buffered response is kept
    /// so the status and headers can still be inspected.
    Decode(Box<Response>, serde_json::Error),
}

impl Error {
    /// The response that was received before the failure, if any.
    pub fn response(&self) -> Option<&Response> {
        match &self.kind {
            Decode(response, _) => Some(response),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<Response> {
        match self.kind {
            Decode(response, _) => Some(*response),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Transport(e).into()
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        InvalidResponse(e).into()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            UrlEmpty | LoggerEmpty | InvalidHeader(_) | BodyTooLarge(_) => None,
            InvalidUrl(_, e) => Some(e),
            Encode(e) | Decode(_, e) => Some(e),
            Transport(e) => Some(e),
            ReadBody(e) => Some(e),
            InvalidResponse(e) => Some(e),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match &self.kind {
            UrlEmpty => f.write_str("url is empty"),
            LoggerEmpty => f.write_str("logger is empty"),
            InvalidUrl(url, e) => f.write_fmt(format_args!("Invalid url - {}: {}", url, e)),
            InvalidHeader(name) => f.write_fmt(format_args!("Invalid header: {}", name)),
            Encode(e) => f.write_fmt(format_args!("Could not encode the request body: {}", e)),
            Transport(e) => f.write_fmt(format_args!("{}", e)),
            ReadBody(e) => f.write_fmt(format_args!("Could not read the response body: {}", e)),
            BodyTooLarge(limit) => f.write_fmt(format_args!(
                "Response body exceeds the limit of {} bytes",
                limit
            )),
            InvalidResponse(e) => f.write_fmt(format_args!("Http Response Error: {}", e)),
            Decode(response, e) => f.write_fmt(format_args!(
                "Could not decode the response body ({}): {}",
                response.status(),
                e
            )),
        }
    }
}
