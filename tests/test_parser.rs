use reel::http::parser::{
    decode_line, find_line_end, parse_params, parse_request_line, parse_title_from_request,
    split_target, ParseError,
};
use reel::http::request::Method;

#[test]
fn test_parse_title_from_request() {
    let line = "GET /path?title=Guardians%20Of%20The%20Galaxy HTTP/1.1";
    let title = parse_title_from_request(line);

    assert_eq!(title.as_deref(), Some("Guardians%20Of%20The%20Galaxy"));
}

#[test]
fn test_parse_title_from_post_request() {
    let title = parse_title_from_request("POST /movies?title=Heat HTTP/1.1");
    assert_eq!(title.as_deref(), Some("Heat"));
}

#[test]
fn test_parse_title_missing() {
    assert_eq!(parse_title_from_request("GET /movies HTTP/1.1"), None);
    assert_eq!(parse_title_from_request("GET /movies?year=2010 HTTP/1.1"), None);
    assert_eq!(parse_title_from_request("DELETE /movies?title=Heat HTTP/1.1"), None);
    assert_eq!(parse_title_from_request("GET /movies?title HTTP/1.1"), None);
    assert_eq!(parse_title_from_request(""), None);
}

#[test]
fn test_parse_params() {
    let params = parse_params("title=Guardians%20Of%20The%20Galaxy&year=2010").unwrap();

    assert_eq!(params.len(), 2);
    assert!(params.contains_key("title"));
    assert!(params.contains_key("year"));
    assert_eq!(params.get("title").unwrap(), "Guardians%20Of%20The%20Galaxy");
    assert_eq!(params.get("year").unwrap(), "2010");
}

#[test]
fn test_parse_params_last_value_wins() {
    let params = parse_params("title=Alien&title=Aliens").unwrap();

    assert_eq!(params.len(), 1);
    assert_eq!(params.get("title").unwrap(), "Aliens");
}

#[test]
fn test_parse_params_splits_on_first_equals() {
    let params = parse_params("q=a=b").unwrap();
    assert_eq!(params.get("q").unwrap(), "a=b");
}

#[test]
fn test_parse_params_empty_value() {
    let params = parse_params("title=").unwrap();
    assert_eq!(params.get("title").unwrap(), "");
}

#[test]
fn test_parse_params_skips_empty_segments() {
    let params = parse_params("a=1&&b=2&").unwrap();
    assert_eq!(params.len(), 2);

    assert!(parse_params("").unwrap().is_empty());
}

#[test]
fn test_parse_params_malformed_pair() {
    let result = parse_params("title=Heat&broken");
    assert_eq!(result, Err(ParseError::MalformedQuery));
}

#[test]
fn test_parse_simple_get_request() {
    let req = parse_request_line("GET / HTTP/1.1").unwrap();

    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/");
    assert_eq!(req.version, "HTTP/1.1");
    assert!(req.query.is_empty());
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = parse_request_line("GET /movies?title=Heat&year=1995 HTTP/1.1").unwrap();

    assert_eq!(req.path, "/movies");
    assert_eq!(req.param("title"), Some("Heat"));
    assert_eq!(req.param("year"), Some("1995"));
}

#[test]
fn test_parse_request_splits_on_first_question_mark() {
    let req = parse_request_line("GET /movies?title=What?&x=1 HTTP/1.1").unwrap();

    assert_eq!(req.path, "/movies");
    assert_eq!(req.param("title"), Some("What?"));
}

#[test]
fn test_parse_request_malformed_query_is_dropped() {
    let req = parse_request_line("GET /movies?title HTTP/1.1").unwrap();

    assert_eq!(req.path, "/movies");
    assert!(req.query.is_empty());
}

#[test]
fn test_parse_request_without_version() {
    let req = parse_request_line("GET /index.html").unwrap();

    assert_eq!(req.path, "/index.html");
    assert_eq!(req.version, "HTTP/1.1");
}

#[test]
fn test_parse_request_missing_target() {
    assert_eq!(parse_request_line("GET"), Err(ParseError::InvalidRequest));
    assert_eq!(parse_request_line("   "), Err(ParseError::InvalidRequest));
}

#[test]
fn test_parse_invalid_http_method() {
    let result = parse_request_line("INVALID / HTTP/1.1");
    assert_eq!(result, Err(ParseError::InvalidMethod));
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let line = format!("{} / HTTP/1.1", method_str);
        let parsed = parse_request_line(&line).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_split_target() {
    assert_eq!(split_target("/a?b=c"), ("/a", Some("b=c")));
    assert_eq!(split_target("/a"), ("/a", None));
    assert_eq!(split_target("/a?"), ("/a", Some("")));
}

#[test]
fn test_find_line_end() {
    assert_eq!(find_line_end(b"GET / HTTP/1.1\r\nHost: x\r\n"), Some(15));
    assert_eq!(find_line_end(b"GET / HTTP/1.1"), None);
}

#[test]
fn test_decode_line_strips_terminator() {
    assert_eq!(decode_line(b"GET / HTTP/1.1\r\n").unwrap(), "GET / HTTP/1.1");
    assert_eq!(decode_line(b"GET / HTTP/1.1\n").unwrap(), "GET / HTTP/1.1");
    assert_eq!(decode_line(b"\xff\xfe\n"), Err(ParseError::InvalidRequest));
}
