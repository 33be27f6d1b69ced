//! Amazon S3 URI parser
//!
//! `s3s-uri` decomposes an Amazon S3 resource locator into its region, bucket and key.
//!
//! # Supported forms
//!
//! | Form | Example |
//! |---|---|
//! | `s3` scheme | `s3://bucket/key` |
//! | path-style | `https://s3.amazonaws.com/bucket/key`, `https://s3-eu-west-1.amazonaws.com/bucket/key` |
//! | virtual-hosted-style | `https://bucket.s3.amazonaws.com/key`, `https://bucket.s3.eu-west-1.amazonaws.com/key` |
//!
//! The region defaults to [`DEFAULT_REGION`] when the host does not name one.
//! Keys are percent-decoded; buckets and regions are not.
//!
//! Dual-stack endpoints, accelerate endpoints and `versionId` are not recognized.
//! Such URIs are parsed with the same rules.
//!
//! # Example
//!
//! ```
//! let uri = s3s_uri::parse("https://bucket.s3-eu-west-1.amazonaws.com/dir/key%20with%20space").unwrap();
//! assert_eq!(uri.region(), "eu-west-1");
//! assert_eq!(uri.bucket(), Some("bucket"));
//! assert_eq!(uri.key(), Some("dir/key with space"));
//! assert!(!uri.is_path_style());
//!
//! let uri = s3s_uri::parse("s3://bucket").unwrap();
//! assert_eq!(uri.region(), s3s_uri::DEFAULT_REGION);
//! assert_eq!(uri.key(), None);
//!
//! assert!(s3s_uri::parse("https://aws.amazon.com").is_err());
//! ```
//!
//! Parsing is pure: there is no global state, and concurrent calls are independent.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(
    clippy::bool_assert_comparison, // I don't like `assert!(!expression)`. It's very misleading.
    clippy::module_name_repetitions,
    clippy::single_match_else,
)]

mod error;
mod uri;

pub mod config;
pub mod endpoint;
pub mod query;
pub mod region;

pub use self::error::ParseS3UriError;
pub use self::region::DEFAULT_REGION;
pub use self::uri::{RawUri, S3Location, S3Uri, parse_with_config};

/// Parses an S3 URI with the default configuration
///
/// # Errors
/// Returns an error if `uri` is not an S3 URI
pub fn parse(uri: &str) -> Result<S3Uri, ParseS3UriError> {
    S3Uri::parse(uri)
}

/// Parses an S3 URI held in a dynamically typed value
///
/// # Errors
/// Returns [`ParseS3UriError::InvalidArgumentType`] if `value` is not a string,
/// or an error if it is not an S3 URI
///
/// # Examples
/// ```
/// use s3s_uri::ParseS3UriError;
/// use serde_json::json;
///
/// let uri = s3s_uri::parse_value(&json!("s3://bucket/key")).unwrap();
/// assert_eq!(uri.key(), Some("key"));
///
/// let err = s3s_uri::parse_value(&json!(2)).unwrap_err();
/// assert_eq!(err, ParseS3UriError::InvalidArgumentType { found: "number" });
/// ```
pub fn parse_value(value: &serde_json::Value) -> Result<S3Uri, ParseS3UriError> {
    use serde_json::Value;

    let found = match value {
        Value::String(s) => return S3Uri::parse(s),
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    Err(ParseS3UriError::InvalidArgumentType { found })
}
