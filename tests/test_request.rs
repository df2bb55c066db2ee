use reel::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

#[test]
fn test_request_param_retrieval() {
    let mut query = HashMap::new();
    query.insert("title".to_string(), "Heat".to_string());
    query.insert("year".to_string(), "1995".to_string());

    let req = Request {
        method: Method::GET,
        path: "/movies".to_string(),
        version: "HTTP/1.1".to_string(),
        query,
    };

    assert_eq!(req.param("title"), Some("Heat"));
    assert_eq!(req.param("year"), Some("1995"));
    assert_eq!(req.param("missing"), None);
    assert_eq!(req.title(), Some("Heat"));
}

#[test]
fn test_request_without_title() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/movies")
        .build()
        .unwrap();

    assert_eq!(req.title(), None);
    assert_eq!(req.version, "HTTP/1.1");
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_request_builder_params() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/movies")
        .version("HTTP/1.0")
        .param("title", "Alien")
        .param("title", "Aliens")
        .build()
        .unwrap();

    assert_eq!(req.method, Method::POST);
    assert_eq!(req.version, "HTTP/1.0");
    assert_eq!(req.title(), Some("Aliens"));
    assert_eq!(req.query.len(), 1);
}

#[test]
fn test_request_method_equality() {
    assert_eq!(Method::GET, Method::GET);
    assert_ne!(Method::GET, Method::POST);
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("INVALID"), None);
    assert_eq!(Method::from_str("get"), None); // Case-sensitive
}

#[test]
fn test_request_method_routable() {
    assert!(Method::GET.is_routable());
    assert!(Method::POST.is_routable());
    assert!(!Method::PUT.is_routable());
    assert!(!Method::DELETE.is_routable());
    assert!(!Method::HEAD.is_routable());
}
