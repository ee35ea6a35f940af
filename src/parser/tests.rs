//! Tests for the request-line parser.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::parser::{parse_request, read_request, Error, HttpRequest, Method};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/index.html");
        assert_eq!(result.version, "HTTP/1.1");
    }

    #[test]
    fn test_parse_head_request() {
        let result = parse_request(b"HEAD / HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::HEAD);
        assert!(result.is_head());
        assert_eq!(result.version, "HTTP/1.0");
    }

    #[test]
    fn test_headers_are_ignored() {
        // No Host header and a garbage header line are both fine
        let request = b"GET /a.css HTTP/1.1\r\nnot a header\r\n\r\nbody bytes";
        let result = parse_request(request).unwrap();
        assert_eq!(result, HttpRequest::new(Method::GET, "/a.css", "HTTP/1.1"));
    }

    #[test]
    fn test_unknown_method_is_kept() {
        let result = parse_request(b"POST /x HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::Other("POST".to_string()));
        assert_eq!(result.method.to_string(), "POST");
    }

    #[test]
    fn test_unknown_version_is_kept() {
        let result = parse_request(b"GET / HTTP/9.9\r\n\r\n").unwrap();
        assert_eq!(result.version, "HTTP/9.9");
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let result = parse_request(b"GET /index.html HTTP/1.1 trailing junk\r\n").unwrap();
        assert_eq!(result.path, "/index.html");
        assert_eq!(result.version, "HTTP/1.1");
    }

    #[test]
    fn test_line_without_crlf() {
        let result = parse_request(b"GET /index.html HTTP/1.1").unwrap();
        assert_eq!(result.path, "/index.html");
    }

    #[test]
    fn test_too_few_tokens() {
        let result = parse_request(b"GET /index.html\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref l)) if l == "GET /index.html"));

        let result = parse_request(b"INVALID REQUEST");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_blank_request() {
        let result = parse_request(b"\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(parse_request(b""), Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_invalid_utf8() {
        let result = parse_request(b"GET /\xff\xfe HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::InvalidUtf8)));
    }

    #[test]
    fn test_method_display_roundtrip() {
        for token in ["GET", "HEAD", "DELETE", "BREW"] {
            assert_eq!(Method::from(token).as_str(), token);
        }
    }

    #[tokio::test]
    async fn test_read_request_single_read() {
        let mut stream = Cursor::new(b"GET /page.html HTTP/1.1\r\nHost: x\r\n\r\n".to_vec());
        let request = read_request(&mut stream, 1024).await.unwrap();
        assert_eq!(request.path, "/page.html");
    }

    #[tokio::test]
    async fn test_read_request_truncates_to_buffer() {
        // The version token falls outside an 8 byte buffer
        let mut stream = Cursor::new(b"GET /long-path HTTP/1.1\r\n".to_vec());
        let result = read_request(&mut stream, 8).await;
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref l)) if l == "GET /lon"));
    }

    #[tokio::test]
    async fn test_read_request_closed_connection() {
        let mut stream = Cursor::new(Vec::new());
        let result = read_request(&mut stream, 1024).await;
        assert!(matches!(result, Err(Error::EmptyRequest)));
    }
}
