use crate::http::mime;
use crate::http::request::{Method, Version};

/// Fixed server identification sent on every response.
pub const SERVER_ID: &str = "staticd minimal static file server";

/// Capability advertisement appended to OPTIONS responses.
pub const OPTIONS_BODY: &str = "Access-Control-Allow-Methods: GET,HEAD,OPTIONS\n\
                                Allow: GET,HEAD,OPTIONS\n\
                                Public: GET,HEAD,OPTIONS\n";

/// HTTP status vocabulary used in response status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 501 Not Implemented
    NotImplemented,
}

impl Status {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::Forbidden => "Forbidden",
            Status::NotFound => "Not Found",
            Status::NotImplemented => "Not Implemented",
        }
    }
}

/// Builds the response head for a request, in fixed order: status line,
/// server identification, date (GMT), content type derived from the target
/// extension, content length, blank-line terminator.
///
/// The content length is `0` unconditionally for OPTIONS requests even
/// though a capability body follows; otherwise it is the known file or
/// body size.
pub fn build_header(
    version: Version,
    status: Status,
    method: Method,
    target: &str,
    content_length: u64,
) -> String {
    let date = chrono::Utc::now().format("%d %b %Y %H:%M:%S");
    let length = match method {
        Method::OPTIONS => 0,
        _ => content_length,
    };

    format!(
        "{} {} {}\r\n\
         Server: {}\r\n\
         Date: {} GMT\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         \r\n",
        version,
        status.as_u16(),
        status.reason_phrase(),
        SERVER_ID,
        date,
        mime::content_type_for(target),
        length,
    )
}

/// Builds a complete error response: head plus a one-line HTML body
/// naming the status. Sent for every rejection, HEAD requests included,
/// so the client always has something to display.
pub fn error_response(version: Version, target: &str, status: Status) -> Vec<u8> {
    let body = format!(
        "<html>\n{} {}\n</html>\n",
        status.as_u16(),
        status.reason_phrase()
    );
    let mut response =
        build_header(version, status, Method::GET, target, body.len() as u64).into_bytes();
    response.extend_from_slice(body.as_bytes());
    response
}

/// Builds a complete OPTIONS response: a 200 head advertising
/// `Content-Length: 0`, followed by the fixed capability body.
pub fn options_response(version: Version) -> Vec<u8> {
    let mut response = build_header(
        version,
        Status::Ok,
        Method::OPTIONS,
        "*",
        OPTIONS_BODY.len() as u64,
    )
    .into_bytes();
    response.extend_from_slice(OPTIONS_BODY.as_bytes());
    response
}
