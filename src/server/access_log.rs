//! Common Log Format access log.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::warn;

/// Placeholder for request fields that are unknown, e.g. after a parse failure.
pub const MISSING_FIELD: &str = "-";

/// Destination for access-log lines.
///
/// One line is written per completed request. Each line goes out in a single
/// `write_all` under the lock, so concurrent requests never interleave.
pub struct AccessLog {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl AccessLog {
    /// Log to an arbitrary writer.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }

    /// Log to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Append to the file at `path`, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file: File = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    /// Record one request.
    ///
    /// Never fails: if the sink rejects the line it is handed to the `log`
    /// facade instead, and otherwise dropped.
    pub fn log(&self, client: &str, method: &str, path: &str, version: &str, status: u16) {
        let line = format_entry(client, method, path, version, status, &timestamp());

        let result = match self.sink.lock() {
            Ok(mut sink) => sink
                .write_all(format!("{line}\n").as_bytes())
                .and_then(|()| sink.flush()),
            Err(_) => Err(io::Error::new(io::ErrorKind::Other, "access log sink poisoned")),
        };

        if let Err(e) = result {
            warn!("Access log write failed ({e}): {line}");
        }
    }
}

impl std::fmt::Debug for AccessLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessLog").finish_non_exhaustive()
    }
}

/// Local wall-clock time in the access-log layout, e.g. `07/Mar/2025 14:05:09`.
fn timestamp() -> String {
    Local::now().format("%d/%b/%Y %H:%M:%S").to_string()
}

/// Build a log line (without the trailing newline).
pub fn format_entry(
    client: &str,
    method: &str,
    path: &str,
    version: &str,
    status: u16,
    timestamp: &str,
) -> String {
    format!("{client} - - [{timestamp}] \"{method} {path} {version}\" {status} -")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Writer that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_format_entry() {
        let line = format_entry("127.0.0.1", "GET", "/index.html", "HTTP/1.1", 200, "07/Mar/2025 14:05:09");
        assert_eq!(
            line,
            "127.0.0.1 - - [07/Mar/2025 14:05:09] \"GET /index.html HTTP/1.1\" 200 -"
        );
    }

    #[test]
    fn test_timestamp_layout() {
        let ts = timestamp();
        // dd/Mon/yyyy HH:MM:SS
        assert_eq!(ts.len(), 20);
        assert_eq!(&ts[2..3], "/");
        assert_eq!(&ts[6..7], "/");
        assert_eq!(&ts[11..12], " ");
    }

    #[test]
    fn test_one_line_per_call() {
        let buf = SharedBuf::default();
        let log = AccessLog::new(buf.clone());

        log.log("10.1.1.1", "GET", "/", "HTTP/1.1", 200);
        log.log("10.1.1.2", MISSING_FIELD, MISSING_FIELD, MISSING_FIELD, 400);

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("10.1.1.1 - - ["));
        assert!(lines[0].ends_with("\"GET / HTTP/1.1\" 200 -"));
        assert!(lines[1].ends_with("\"- - -\" 400 -"));
    }

    #[test]
    fn test_concurrent_lines_do_not_interleave() {
        let buf = SharedBuf::default();
        let log = Arc::new(AccessLog::new(buf.clone()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        log.log(&format!("10.0.0.{i}"), "GET", "/a.txt", "HTTP/1.1", 200);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.ends_with("\"GET /a.txt HTTP/1.1\" 200 -")));
    }

    #[test]
    fn test_failing_sink_is_swallowed() {
        let log = AccessLog::new(FailingWriter);
        log.log("10.0.0.1", "GET", "/", "HTTP/1.1", 200);
    }

    #[test]
    fn test_append_to_file() {
        let path = std::env::temp_dir().join(format!("microserve_access_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let log = AccessLog::append(&path).unwrap();
        log.log("127.0.0.1", "HEAD", "/x", "HTTP/1.0", 404);
        drop(log);
        let log = AccessLog::append(&path).unwrap();
        log.log("127.0.0.1", "GET", "/y", "HTTP/1.0", 200);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("\"HEAD /x HTTP/1.0\" 404 -"));
        let _ = std::fs::remove_file(&path);
    }
}
