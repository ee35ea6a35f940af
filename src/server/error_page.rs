//! Error responses shown to clients.

use crate::server::response::{HttpResponse, StatusCode};

/// Produces the response sent for a failed request.
///
/// Implementations must not depend on the request itself; the only inputs are the
/// status and the client address.
pub trait ErrorRenderer: Send + Sync {
    /// Build the error response for `status`, addressed to `client`.
    fn render(&self, status: StatusCode, client: &str) -> HttpResponse;
}

/// Default self-contained HTML error page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlErrorPage;

impl ErrorRenderer for HtmlErrorPage {
    fn render(&self, status: StatusCode, client: &str) -> HttpResponse {
        let code = status.as_u16();
        let reason = status.reason_phrase();

        let body = format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"UTF-8\">\n\
             <title>Error {code} ({reason})</title>\n\
             </head>\n\
             <body>\n\
             <h1>{code} - {reason}</h1>\n\
             <p><strong>Client IP:</strong> {client}</p>\n\
             <p>The request could not be completed: {detail}.</p>\n\
             </body>\n\
             </html>\n",
            client = escape_html(client),
            detail = reason.to_lowercase(),
        );

        HttpResponse::new(status)
            .with_content_type("text/html")
            .with_body_string(body)
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names_code_reason_and_client() {
        let response = HtmlErrorPage.render(StatusCode::NotFound, "10.0.0.7");
        let body = String::from_utf8(response.body.clone()).unwrap();

        assert_eq!(response.status, StatusCode::NotFound);
        assert_eq!(response.content_type, "text/html");
        assert!(body.contains("404 - Not Found"));
        assert!(body.contains("10.0.0.7"));
        assert_eq!(response.content_length(), body.len());
    }

    #[test]
    fn test_client_is_escaped() {
        let response = HtmlErrorPage.render(StatusCode::BadRequest, "<script>");
        let body = String::from_utf8(response.body).unwrap();
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
    }
}
