use staticd::http::mime::content_type_for;
use staticd::http::request::{Method, Version};
use staticd::http::response::{
    OPTIONS_BODY, SERVER_ID, Status, build_header, error_response, options_response,
};

fn header_lines(header: &str) -> Vec<&str> {
    assert!(header.ends_with("\r\n\r\n"), "missing blank-line terminator");
    header.trim_end_matches("\r\n").split("\r\n").collect()
}

#[test]
fn test_header_line_order() {
    let header = build_header(Version::HTTP_11, Status::Ok, Method::GET, "/index.html", 3000);
    let lines = header_lines(&header);

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "HTTP/1.1 200 OK");
    assert_eq!(lines[1], format!("Server: {}", SERVER_ID));
    assert!(lines[2].starts_with("Date: "));
    assert!(lines[2].ends_with(" GMT"));
    assert_eq!(lines[3], "Content-Type: text/html");
    assert_eq!(lines[4], "Content-Length: 3000");
}

#[test]
fn test_header_date_shape() {
    let header = build_header(Version::HTTP_10, Status::Ok, Method::GET, "/a.txt", 1);
    let date_line = header_lines(&header)[2];

    // Date: DD Mon YYYY HH:MM:SS GMT
    let fields: Vec<&str> = date_line.split_whitespace().collect();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0], "Date:");
    assert_eq!(fields[1].len(), 2);
    assert!(fields[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(fields[2].len(), 3);
    assert_eq!(fields[3].len(), 4);
    assert_eq!(fields[4].matches(':').count(), 2);
    assert_eq!(fields[5], "GMT");
}

#[test]
fn test_header_unknown_extension_has_empty_content_type() {
    let header = build_header(Version::HTTP_11, Status::Ok, Method::GET, "/data.bin", 10);
    assert_eq!(header_lines(&header)[3].trim_end(), "Content-Type:");
}

#[test]
fn test_header_status_line_uses_request_version() {
    let header = build_header(Version::HTTP_10, Status::NotFound, Method::GET, "/x.html", 0);
    assert!(header.starts_with("HTTP/1.0 404 Not Found\r\n"));
}

#[test]
fn test_options_content_length_is_always_zero() {
    let header = build_header(Version::HTTP_11, Status::Ok, Method::OPTIONS, "*", 9999);
    assert_eq!(header_lines(&header)[4], "Content-Length: 0");
}

#[test]
fn test_options_response_carries_capability_body() {
    let response = String::from_utf8(options_response(Version::HTTP_11)).unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Length: 0\r\n"));
    assert!(response.ends_with(OPTIONS_BODY));
    assert!(response.contains("Allow: GET,HEAD,OPTIONS"));
    assert!(response.contains("Public: GET,HEAD,OPTIONS"));
}

#[test]
fn test_error_response_body_shape() {
    let response = String::from_utf8(error_response(
        Version::HTTP_11,
        "/../etc/passwd",
        Status::Forbidden,
    ))
    .unwrap();

    assert!(response.starts_with("HTTP/1.1 403 Forbidden\r\n"));
    assert!(response.ends_with("<html>\n403 Forbidden\n</html>\n"));

    let body = "<html>\n403 Forbidden\n</html>\n";
    assert!(response.contains(&format!("Content-Length: {}\r\n", body.len())));
}

#[test]
fn test_error_response_not_implemented() {
    let response =
        String::from_utf8(error_response(Version::HTTP_11, "", Status::NotImplemented)).unwrap();

    assert!(response.starts_with("HTTP/1.1 501 Not Implemented\r\n"));
    assert!(response.ends_with("<html>\n501 Not Implemented\n</html>\n"));
}

#[test]
fn test_status_codes_and_phrases() {
    assert_eq!(Status::Ok.as_u16(), 200);
    assert_eq!(Status::BadRequest.as_u16(), 400);
    assert_eq!(Status::Forbidden.as_u16(), 403);
    assert_eq!(Status::NotFound.as_u16(), 404);
    assert_eq!(Status::NotImplemented.as_u16(), 501);

    assert_eq!(Status::Ok.reason_phrase(), "OK");
    assert_eq!(Status::NotImplemented.reason_phrase(), "Not Implemented");
}

#[test]
fn test_content_type_lookup() {
    assert_eq!(content_type_for("/index.html"), "text/html");
    assert_eq!(content_type_for("/notes.TXT"), "text/plain");
    assert_eq!(content_type_for("/cat.jpg"), "image/jpeg");
    assert_eq!(content_type_for("/cat.JPEG"), "image/jpeg");
    assert_eq!(content_type_for("/logo.png"), "image/png");
    assert_eq!(content_type_for("/anim.gif"), "image/gif");
    assert_eq!(content_type_for("/ring.m4r"), "audio/m4r");
    assert_eq!(content_type_for("/data.bin"), "");
    assert_eq!(content_type_for("/noextension"), "");
}
