use crate::http::request::{Method, Request};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Missing method or target, or a line that is not UTF-8.
    InvalidRequest,
    InvalidMethod,
    /// A query pair without `=`.
    MalformedQuery,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidRequest => write!(f, "invalid request line"),
            ParseError::InvalidMethod => write!(f, "unknown request method"),
            ParseError::MalformedQuery => write!(f, "malformed query string"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a request line such as `GET /movies?title=Heat HTTP/1.1`.
///
/// The version token is optional. A malformed query string does not fail the
/// request: it is logged and the request proceeds with no parameters.
pub fn parse_request_line(line: &str) -> Result<Request, ParseError> {
    let mut parts = line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().unwrap_or("HTTP/1.1");

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    let (path, query_string) = split_target(target);

    let query = match query_string {
        Some(qs) => parse_params(qs).unwrap_or_else(|e| {
            tracing::warn!(query = %qs, error = %e, "Ignoring query string");
            HashMap::new()
        }),
        None => HashMap::new(),
    };

    Ok(Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        query,
    })
}

/// Splits a request target on the first `?` into path and query string.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Parses `key=value&key=value` into a map.
///
/// Each pair is split on its first `=`, values are not percent-decoded and a
/// repeated key keeps its last value. Empty segments (`a=1&&b=2`) are skipped.
pub fn parse_params(query: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut params = HashMap::new();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair.split_once('=').ok_or(ParseError::MalformedQuery)?;
        params.insert(key.to_string(), value.to_string());
    }

    Ok(params)
}

/// Extracts the raw `title` parameter from a GET or POST request line.
///
/// Returns `None` for other methods, for lines without a query string and
/// for queries that have no title or cannot be parsed.
pub fn parse_title_from_request(line: &str) -> Option<String> {
    let request = parse_request_line(line).ok()?;
    if !request.method.is_routable() {
        return None;
    }
    request.title().map(str::to_string)
}

/// Position of the first `\n` in `buf`, if any.
pub fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n')
}

/// Decodes one request line, dropping the line terminator.
pub fn decode_line(raw: &[u8]) -> Result<&str, ParseError> {
    let line = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidRequest)?;
    Ok(line.trim_end_matches(['\r', '\n']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = parse_request_line("GET /index.html HTTP/1.1").unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/index.html");
        assert!(req.query.is_empty());
    }

    #[test]
    fn title_stays_percent_encoded() {
        let title =
            parse_title_from_request("GET /path?title=Guardians%20Of%20The%20Galaxy HTTP/1.1");

        assert_eq!(title.as_deref(), Some("Guardians%20Of%20The%20Galaxy"));
    }
}
