//! Response serialization onto a connection.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::parser::HttpRequest;
use crate::server::access_log::{AccessLog, MISSING_FIELD};
use crate::server::error::Error;
use crate::server::response::HttpResponse;

/// Version used on the status line when no request line could be parsed.
pub const FALLBACK_VERSION: &str = "HTTP/1.1";

/// Send `response` and record it in the access log.
///
/// The status line echoes the request's version. For HEAD requests the body is
/// withheld while `Content-Length` still declares its size. The whole response
/// goes out in one buffered write. The access-log line is written whether or not
/// the send succeeded.
pub async fn write_response<S>(
    stream: &mut S,
    request: Option<&HttpRequest>,
    response: &HttpResponse,
    client: &str,
    access_log: &AccessLog,
) -> Result<(), Error>
where
    S: AsyncWrite + Unpin,
{
    let version = request.map_or(FALLBACK_VERSION, |r| r.version.as_str());
    let include_body = !request.is_some_and(HttpRequest::is_head);

    let bytes = response.to_bytes(version, include_body);
    let result = async {
        stream.write_all(&bytes).await?;
        stream.flush().await
    }
    .await;

    access_log.log(
        client,
        request.map_or(MISSING_FIELD, |r| r.method.as_str()),
        request.map_or(MISSING_FIELD, |r| r.path.as_str()),
        request.map_or(MISSING_FIELD, |r| r.version.as_str()),
        response.status.as_u16(),
    );

    result.map_err(Error::from)
}
