//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

/// Request methods the dispatcher distinguishes.
///
/// Only GET and HEAD have handlers. Any other token is kept verbatim in
/// [`Method::Other`] so it can be logged and answered with 501.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// HEAD method: Same as GET but only transfers the status line and header section.
    HEAD,
    /// Any method without a bound handler.
    Other(String),
}

impl Method {
    /// The method token as it appeared on the request line.
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::Other(token) => token,
        }
    }
}

// Parsing a method never fails; unknown tokens are a dispatch-time concern.
impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            other => Method::Other(other.to_string()),
        }
    }
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Method::from(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
