use crate::http::mime;

/// Content type of movie lookup responses.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=ISO-8859-1";

/// HTTP status codes supported by the server.
///
/// Common HTTP status codes used in responses:
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request line
/// - `NotFound` (404): Asset not found
/// - `MethodNotAllowed` (405): HTTP method not supported
/// - `InternalServerError` (500): Asset could not be read
/// - `BadGateway` (502): Movie provider failed
/// - `ServiceUnavailable` (503): Connection limit reached
/// - `GatewayTimeout` (504): Movie provider or request deadline timed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
    /// 502 Bad Gateway
    BadGateway,
    /// 503 Service Unavailable
    ServiceUnavailable,
    /// 504 Gateway Timeout
    GatewayTimeout,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use reel::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
            StatusCode::BadGateway => 502,
            StatusCode::ServiceUnavailable => 503,
            StatusCode::GatewayTimeout => 504,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use reel::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::BadGateway.reason_phrase(), "Bad Gateway");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::BadGateway => "Bad Gateway",
            StatusCode::ServiceUnavailable => "Service Unavailable",
            StatusCode::GatewayTimeout => "Gateway Timeout",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep their insertion order so the serialized form is stable. No
/// `Content-Length` is ever added: the body ends when the connection closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they were added
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use reel::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// assert_eq!(response.header("Content-Type"), Some("application/json"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, replacing the value in place if the name is already set.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A 200 OK response with the given content type and body.
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .body(body.into())
            .build()
    }

    /// A 200 OK response carrying movie data.
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self::ok(JSON_CONTENT_TYPE, body)
    }

    /// A plain-text error response whose body is the status line text,
    /// e.g. `404 Not Found`.
    pub fn error(status: StatusCode) -> Self {
        let body = format!("{} {}", status.as_u16(), status.reason_phrase());
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .body(body.into_bytes())
            .build()
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::error(StatusCode::BadRequest)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::error(StatusCode::NotFound)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::error(StatusCode::InternalServerError)
    }

    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Header block of a 200 response serving the asset at `path`.
///
/// ```
/// # use reel::http::response::http_header;
/// assert_eq!(http_header("cinema.png"), "HTTP/1.1 200 OK\r\nContent-Type:image/png\r\n\r\n");
/// ```
pub fn http_header(path: &str) -> String {
    let response = Response::ok(mime::content_type(path), Vec::new());
    String::from_utf8_lossy(&crate::http::writer::serialize_head(&response)).into_owned()
}
