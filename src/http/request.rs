use std::fmt;

/// HTTP request methods served by this server.
///
/// Only GET, HEAD and OPTIONS are supported. Any other syntactically valid
/// method token is answered with 501 Not Implemented by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
}

impl Method {
    /// Parses a method token, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token("get"), Some(Method::GET));
    /// assert_eq!(Method::from_token("DELETE"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("GET") {
            Some(Method::GET)
        } else if s.eq_ignore_ascii_case("HEAD") {
            Some(Method::HEAD)
        } else if s.eq_ignore_ascii_case("OPTIONS") {
            Some(Method::OPTIONS)
        } else {
            None
        }
    }
}

/// HTTP protocol version of a request.
///
/// Only the `HTTP/1.x` family is accepted; the minor digit drives the
/// connection persistence decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const HTTP_10: Version = Version { major: 1, minor: 0 };
    pub const HTTP_11: Version = Version { major: 1, minor: 1 };

    /// Parses a version token of the shape `HTTP/1.<digit>`, with a
    /// case-insensitive scheme token.
    pub fn from_token(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 8 || !bytes[..7].eq_ignore_ascii_case(b"HTTP/1.") {
            return None;
        }
        let minor = bytes[7];
        minor.is_ascii_digit().then(|| Version {
            major: 1,
            minor: minor - b'0',
        })
    }

    /// Whether the connection should stay open for further requests.
    ///
    /// HTTP/1.1 connections persist by default; every other minor version
    /// closes after the response.
    pub fn persistent(&self) -> bool {
        self.minor == 1
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

/// A validated client request.
///
/// Produced by the parser once a complete request line has been read and
/// matched against the accepted grammar. The target has already been
/// rewritten from `/` to `/index.html` when applicable.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, HEAD or OPTIONS)
    pub method: Method,
    /// The request target path (e.g., "/index.html")
    pub target: String,
    /// Protocol version from the request line
    pub version: Version,
}

impl Request {
    /// Whether the connection serving this request should be kept open
    /// after the response is fully sent.
    pub fn persistent(&self) -> bool {
        self.version.persistent()
    }
}
