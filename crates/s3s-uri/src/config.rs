//! Parser configuration
//!
//! # Example
//! ```
//! use s3s_uri::config::S3UriConfig;
//! use s3s_uri::parse_with_config;
//!
//! let config = S3UriConfig::default().with_decode_query(true);
//! let uri = parse_with_config("https://s3.amazonaws.com/bucket/key?a=1&b=x%20y", &config).unwrap();
//!
//! let qs = uri.uri().query().unwrap().as_decoded().unwrap();
//! assert_eq!(qs.get_unique("b"), Some("x y"));
//! ```

use serde::{Deserialize, Serialize};

/// S3 URI parser configuration.
///
/// Missing fields take their default values when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct S3UriConfig {
    /// Exposes the query of the parsed URI as decoded `(name, value)` pairs
    /// instead of the raw query string.
    ///
    /// Default: `false`
    pub decode_query: bool,
}

impl S3UriConfig {
    /// Sets [`decode_query`](Self::decode_query).
    #[must_use]
    pub fn with_decode_query(mut self, decode_query: bool) -> Self {
        self.decode_query = decode_query;
        self
    }
}
