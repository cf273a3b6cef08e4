use crate::http::request::{Method, Request, Version};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Request line does not match any accepted grammar (400)
    BadRequest,
    /// Well-formed request line with an unsupported method (501).
    /// Carries the parsed version so the connection persistence decision
    /// can still be made.
    NotImplemented { version: Version },
    /// No blank-line terminator seen yet; more bytes are needed
    Incomplete,
}

/// Finds the end of a request head in `buf`.
///
/// A request is complete once a blank line is observed, terminated either
/// by `\r\n\r\n` or by a bare `\n\n`. Returns the index one past the
/// terminator of whichever appears first.
pub fn find_request_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4);
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|p| p + 2);

    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Parses and validates a request head.
///
/// Accepted request-line shapes:
///
/// - `("GET"|"HEAD") SP target SP "HTTP/1." digit` (method and scheme
///   tokens are case-insensitive), or
/// - `"OPTIONS" SP anything`.
///
/// A target of exactly `/` is rewritten to `/index.html`. A well-formed
/// line whose method is an unknown alphabetic token fails with
/// `NotImplemented`; everything else fails with `BadRequest`. The
/// filesystem is never touched here.
pub fn parse_request(buf: &[u8]) -> Result<Request, ParseError> {
    let end = find_request_end(buf).ok_or(ParseError::Incomplete)?;

    let text = std::str::from_utf8(&buf[..end]).map_err(|_| ParseError::BadRequest)?;
    let request_line = text.lines().next().ok_or(ParseError::BadRequest)?;

    let mut parts = request_line.split_whitespace();
    let method_token = parts.next().ok_or(ParseError::BadRequest)?;
    let target = parts.next();
    let version_token = parts.next();

    match Method::from_token(method_token) {
        Some(Method::OPTIONS) => {
            // OPTIONS accepts anything after the method token; the version
            // is parsed opportunistically for the persistence decision.
            let target = target.ok_or(ParseError::BadRequest)?;
            let version = version_token
                .and_then(Version::from_token)
                .unwrap_or(Version::HTTP_10);
            Ok(Request {
                method: Method::OPTIONS,
                target: rewrite_target(target),
                version,
            })
        }
        Some(method) => {
            let target = target.ok_or(ParseError::BadRequest)?;
            let version = version_token
                .and_then(Version::from_token)
                .ok_or(ParseError::BadRequest)?;
            Ok(Request {
                method,
                target: rewrite_target(target),
                version,
            })
        }
        None => {
            // A plausible method token with an otherwise valid request line
            // is answered 501 rather than 400.
            let well_formed = method_token.chars().all(|c| c.is_ascii_alphabetic());
            match (well_formed, version_token.and_then(Version::from_token)) {
                (true, Some(version)) => Err(ParseError::NotImplemented { version }),
                _ => Err(ParseError::BadRequest),
            }
        }
    }
}

fn rewrite_target(target: &str) -> String {
    if target == "/" {
        "/index.html".to_string()
    } else {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET /files/a.txt HTTP/1.1\r\n\r\n";

        let parsed = parse_request(req).unwrap();

        assert_eq!(parsed.method, Method::GET);
        assert_eq!(parsed.target, "/files/a.txt");
        assert_eq!(parsed.version, Version::HTTP_11);
    }

    #[test]
    fn root_target_is_rewritten() {
        let parsed = parse_request(b"GET / HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(parsed.target, "/index.html");
    }
}
