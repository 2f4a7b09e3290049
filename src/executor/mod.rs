use std::io::Read;

use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use log::{debug, warn};
use reqwest::blocking::{Client, Request};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::builder::{Method, RequestBuilder};
use crate::error::ErrorKind::{
    BodyTooLarge, Decode, Encode, InvalidHeader, InvalidUrl, LoggerEmpty, ReadBody, UrlEmpty,
};
use crate::output::{format_request, format_response, format_response_head};
use crate::{mime_type, Error, Response, Result};


impl<'a> RequestBuilder<'a> {
    /// Sends the request and buffers the whole response body.
    ///
    /// Transport errors are returned as they come from the client, without
    /// retrying.
    pub fn execute(&mut self) -> Result<Response> {
        self.validate()?;

        let client = self.client()?;
        let request = self.materialize(&client)?;

        debug!("{} {}", request.method(), request.url());
        if self.debug {
            self.log(&format_request(&request));
        }

        let mut response = client.execute(request)?;
        let head = response_head(&response)?;
        debug!("{} {}", head.status(), self.url);

        let body = match read_body(&mut response, self.config.max_body_size) {
            Ok(body) => body,
            Err(e) => {
                if self.debug {
                    self.log(&format_response_head(&head));
                }
                return Err(e);
            }
        };
        let (parts, ()) = head.into_parts();
        let response = Response::from_parts(parts, body);

        if self.debug {
            self.log(&format_response(&response));
        }

        Ok(response)
    }

    /// Executes the request and decodes the body as JSON.
    ///
    /// When decoding fails the error still carries the response, see
    /// [`Error::response`].
    pub fn unmarshal_json<T: DeserializeOwned>(&mut self) -> Result<(Response, T)> {
        let response = self.execute()?;
        match serde_json::from_slice(response.body()) {
            Ok(value) => Ok((response, value)),
            Err(e) => Err(Decode(Box::new(response), e).into()),
        }
    }

    /// A body that failed to serialize is reported once; the previous body
    /// stays in place.
    fn validate(&mut self) -> Result<()> {
        if self.url.is_empty() {
            return Err(UrlEmpty.into());
        }
        if self.logger.is_none() {
            return Err(LoggerEmpty.into());
        }
        if let Some(e) = self.body_error.take() {
            return Err(Encode(e).into());
        }
        Ok(())
    }

    /// Reuses the client built for the current config.
    fn client(&mut self) -> Result<Client> {
        if let Some((config, client)) = &self.client {
            if *config == self.config {
                return Ok(client.clone());
            }
        }
        let client = Client::builder()
            .timeout(self.config.timeout)
            .danger_accept_invalid_certs(!self.config.ssl_check)
            .build()?;
        self.client = Some((self.config.clone(), client.clone()));
        Ok(client)
    }

    fn materialize(&self, client: &Client) -> Result<Request> {
        let mut request_builder = client
            .request(self.method.into(), self.url_with_query()?)
            .headers(self.header_map()?);

        if let Some((username, password)) = &self.basic_auth {
            if !username.is_empty() || !password.is_empty() {
                request_builder = request_builder.basic_auth(username, Some(password));
            }
        }
        if !self.body.is_empty() {
            request_builder = request_builder.body(self.body.clone());
        }

        Ok(request_builder.build()?)
    }

    /// The accumulated query replaces whatever query the url already had.
    fn url_with_query(&self) -> Result<Url> {
        let mut url =
            Url::parse(&self.url).map_err(|e| Error::from(InvalidUrl(self.url.clone(), e)))?;
        url.set_query(None);
        if !self.queries.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, values) in &self.queries {
                for value in values {
                    pairs.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }

    /// The json content type goes in first so an explicit one replaces it.
    fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(mime_type::APPLICATION_JSON),
        );
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| Error::from(InvalidHeader(key.clone())))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| Error::from(InvalidHeader(key.clone())))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn log(&mut self, message: &str) {
        if let Some(logger) = self.logger.as_mut() {
            if let Err(e) = logger.log(message) {
                warn!("Failed writing debug dump: {}", e);
            }
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

fn response_head(response: &reqwest::blocking::Response) -> Result<http::Response<()>> {
    let mut response_builder = http::Response::builder()
        .version(response.version())
        .status(response.status());

    for (name, value) in response.headers() {
        response_builder = response_builder.header(name, value);
    }

    Ok(response_builder.body(())?)
}

/// Reads at most `limit` bytes; anything longer is an error rather than a
/// truncated body.
fn read_body<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|e| Error::from(ReadBody(e)))?;
    if body.len() > limit {
        return Err(BodyTooLarge(limit).into());
    }
    Ok(body)
}
