
use http::HeaderMap;

use crate::Response;

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(key, value)| format!("{}: {}\n", key, String::from_utf8_lossy(value.as_bytes())))
        .collect()
}

fn format_body(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

/// Renders the outgoing request the way it goes on the wire.
pub(crate) fn format_request(request: &reqwest::blocking::Request) -> String {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };
    let body = request
        .body()
        .and_then(|body| body.as_bytes())
        .unwrap_or_default();

    format!(
        "{method} {target} HTTP/1.1\nHost: {host}\n{headers}\n{body}",
        method = request.method(),
        target = target,
        host = host,
        headers = format_headers(request.headers()),
        body = format_body(body),
    )
}

/// Status line and headers, for when the body never arrived.
pub(crate) fn format_response_head<B>(response: &http::Response<B>) -> String {
    format!(
        "{version:?} {status}\n{headers}",
        version = response.version(),
        status = response.status(),
        headers = format_headers(response.headers()),
    )
}

pub(crate) fn format_response(response: &Response) -> String {
    format!(
        "{head}\n{body}",
        head = format_response_head(response),
        body = format_body(response.body()),
    )
}
