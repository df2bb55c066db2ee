use reel::http::mime::{content_type, is_binary, is_image};

#[test]
fn test_content_type() {
    assert_eq!(content_type("cinema.png"), "image/png");
    assert_eq!(content_type("client.html"), "text/html");
    assert_eq!(content_type("client.css"), "text/css");
    assert_eq!(content_type("client.js"), "text/javascript");
    assert_eq!(content_type("favicon.ico"), "image/x-icon");
    assert_eq!(content_type("cinema.jpg"), "image/jpeg");
}

#[test]
fn test_content_type_more_extensions() {
    assert_eq!(content_type("poster.jpeg"), "image/jpeg");
    assert_eq!(content_type("spinner.gif"), "image/gif");
    assert_eq!(content_type("logo.svg"), "image/svg+xml");
    assert_eq!(content_type("movie.json"), "application/json");
    assert_eq!(content_type("notes.txt"), "text/plain");
    assert_eq!(content_type("old.htm"), "text/html");
}

#[test]
fn test_content_type_uses_last_segment() {
    assert_eq!(content_type("/img.v2/cinema.png"), "image/png");
    assert_eq!(content_type("/img.v2/README"), "");
    assert_eq!(content_type("/archive.tar.gz"), "");
}

#[test]
fn test_content_type_case_insensitive() {
    assert_eq!(content_type("CINEMA.PNG"), "image/png");
    assert_eq!(content_type("Index.Html"), "text/html");
}

#[test]
fn test_content_type_unknown() {
    assert_eq!(content_type("/"), "");
    assert_eq!(content_type(""), "");
    assert_eq!(content_type("data.bin"), "");
    assert_eq!(content_type("Makefile"), "");
}

#[test]
fn test_image_and_binary_classification() {
    assert!(is_image("image/png"));
    assert!(!is_image("text/html"));

    assert!(is_binary("image/x-icon"));
    assert!(is_binary(""));
    assert!(!is_binary("text/css"));
    assert!(!is_binary("application/json"));
}
