//! Static file serving from a document root.
//!
//! Request paths are resolved lexically: after decoding, the path is split
//! into segments and each one must be a plain file name. Parent references
//! (`..` with either separator) are refused before the filesystem is touched,
//! so a resolved path is always a descendant of the root.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::server::error::ResolveError;
use crate::server::handler::{ResolveFuture, Resource, ResourceResolver};
use crate::server::mime::guess_mime_type;

/// File served for an empty path or `/`.
pub const INDEX_FILE: &str = "index.html";

/// Serves files beneath a document root.
///
/// Every request re-reads the file; nothing is cached.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    /// Create a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The document root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a request path to a location under the document root without touching
    /// the filesystem.
    pub fn file_path(&self, request_path: &str) -> Result<PathBuf, ResolveError> {
        Ok(self.root.join(safe_relative_path(request_path)?))
    }
}

impl ResourceResolver for StaticFiles {
    fn resolve<'a>(&'a self, path: &'a str) -> ResolveFuture<'a> {
        Box::pin(async move {
            let file_path = self.file_path(path)?;

            let metadata = tokio::fs::metadata(&file_path)
                .await
                .map_err(|e| classify_io_error(e, &file_path))?;
            if metadata.is_dir() {
                return Err(ResolveError::NotFound(file_path));
            }

            let body = tokio::fs::read(&file_path)
                .await
                .map_err(|e| classify_io_error(e, &file_path))?;

            Ok(Resource {
                body,
                content_type: guess_mime_type(&file_path).to_string(),
            })
        })
    }
}

/// Turn a request path into a relative path containing only plain file names.
pub fn safe_relative_path(request_path: &str) -> Result<PathBuf, ResolveError> {
    // Drop the query string and fragment
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let decoded = percent_decode(path)
        .ok_or_else(|| ResolveError::NotFound(PathBuf::from(request_path)))?;

    if decoded.contains('\0') {
        return Err(ResolveError::Forbidden(request_path.to_string()));
    }

    let mut relative = PathBuf::new();
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(ResolveError::Forbidden(request_path.to_string())),
            _ => {}
        }

        // Reject anything the platform would read as a root, prefix or parent
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => relative.push(name),
            _ => return Err(ResolveError::Forbidden(request_path.to_string())),
        }
    }

    if relative.as_os_str().is_empty() {
        relative.push(INDEX_FILE);
    }

    Ok(relative)
}

/// Map a filesystem error to the resolution failure reported to the client.
pub fn classify_io_error(error: io::Error, path: &Path) -> ResolveError {
    match error.kind() {
        io::ErrorKind::NotFound => ResolveError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ResolveError::Forbidden(path.display().to_string()),
        _ => ResolveError::Internal(error),
    }
}

/// Decode `%XX` escapes. Returns `None` for a malformed escape or non UTF-8 output.
fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_val)?;
            let lo = bytes.get(i + 2).copied().and_then(hex_val)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
