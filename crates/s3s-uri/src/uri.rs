//! S3 URI

use crate::config::S3UriConfig;
use crate::endpoint::Endpoint;
use crate::error::ParseS3UriError;
use crate::query::{OrderedQs, Query};
use crate::region::DEFAULT_REGION;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// A parsed S3 URI
///
/// Supported forms:
/// + `s3://bucket/key`
/// + path-style: `https://s3.amazonaws.com/bucket/key`, `https://s3-eu-west-1.amazonaws.com/bucket/key`
/// + virtual-hosted-style: `https://bucket.s3.amazonaws.com/key`, `https://bucket.s3.eu-west-1.amazonaws.com/key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Uri {
    region: Box<str>,
    bucket: Option<Box<str>>,
    key: Option<Box<str>>,
    is_path_style: bool,
    uri: RawUri,
}

/// The generic URI components of an [`S3Uri`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUri {
    url: Url,
    path: Box<str>,
    query: Option<Query>,
}

/// The S3 components of an [`S3Uri`], as a plain record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Location {
    /// region
    pub region: String,
    /// bucket
    pub bucket: Option<String>,
    /// key
    pub key: Option<String>,
    /// whether the bucket is in the path
    pub is_path_style: bool,
}

impl S3Uri {
    /// The region assumed when the URI does not name one
    pub const DEFAULT_REGION: &'static str = DEFAULT_REGION;

    /// Parses [`S3Uri`] with the default configuration
    ///
    /// # Errors
    /// Returns an error if `uri` is not an S3 URI
    pub fn parse(uri: &str) -> Result<Self, ParseS3UriError> {
        parse_with_config(uri, &S3UriConfig::default())
    }

    /// Returns the region, or [`DEFAULT_REGION`](Self::DEFAULT_REGION) if the URI does not name one.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the bucket, or `None` if the URI names no bucket.
    #[must_use]
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    /// Returns the percent-decoded key, or `None` if the URI names no key.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns `true` if the bucket is in the path rather than in the host.
    #[must_use]
    pub fn is_path_style(&self) -> bool {
        self.is_path_style
    }

    /// Returns the generic URI components.
    #[must_use]
    pub fn uri(&self) -> &RawUri {
        &self.uri
    }

    /// Copies the S3 components into a [`S3Location`].
    #[must_use]
    pub fn to_location(&self) -> S3Location {
        S3Location {
            region: self.region.to_string(),
            bucket: self.bucket.as_deref().map(ToOwned::to_owned),
            key: self.key.as_deref().map(ToOwned::to_owned),
            is_path_style: self.is_path_style,
        }
    }
}

impl RawUri {
    /// Returns the parsed URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the scheme, lowercased.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Returns the host, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Returns the explicit port, if any.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// Returns the path as written in the input.
    ///
    /// Unlike [`Url::path`], dot segments are kept and nothing is re-encoded.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query, raw or decoded depending on [`S3UriConfig::decode_query`].
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }
}

/// Parses an S3 URI
///
/// # Errors
/// Returns an error if `uri` is not an S3 URI
#[tracing::instrument(level = "debug", skip(config), err)]
pub fn parse_with_config(uri: &str, config: &S3UriConfig) -> Result<S3Uri, ParseS3UriError> {
    let url = Url::parse(uri).map_err(|e| ParseS3UriError::from_url_error(uri, e))?;

    // a decoded query is always present, possibly empty
    let query = if config.decode_query {
        let qs = OrderedQs::parse(url.query().unwrap_or_default())
            .map_err(|_| ParseS3UriError::InvalidEncoding { uri: uri.into() })?;
        Some(Query::Decoded(qs))
    } else {
        url.query().map(|qs| Query::Raw(qs.into()))
    };

    let host = url.host_str().filter(|h| !h.is_empty()).map(str::to_ascii_lowercase);
    let path = raw_path(uri);

    let (region, bucket, key, is_path_style) = if url.scheme() == "s3" {
        let Some(bucket) = host else {
            return Err(ParseS3UriError::MissingBucket { uri: uri.into() });
        };
        debug!(?bucket, ?path, "parsing s3 scheme");
        (DEFAULT_REGION, Some(bucket.into_boxed_str()), strip_leading_slash(path), false)
    } else {
        let Some(host) = host.as_deref() else {
            return Err(ParseS3UriError::MissingHost { uri: uri.into() });
        };
        let Some(ep) = Endpoint::parse(host) else {
            return Err(ParseS3UriError::NotAnS3Endpoint { uri: uri.into() });
        };
        debug!(?ep);

        match ep.bucket() {
            None => {
                debug!(?path, "parsing path-style uri");
                let (bucket, key) = split_path_style(path);
                (ep.region(), bucket.map(Into::into), key, true)
            }
            Some(bucket) => {
                debug!(?bucket, ?path, "parsing virtual-hosted-style uri");
                (ep.region(), Some(bucket.into()), strip_leading_slash(path), false)
            }
        }
    };

    let key = key.map(|key| decode_key(uri, key)).transpose()?;

    Ok(S3Uri {
        region: region.into(),
        bucket,
        key,
        is_path_style,
        uri: RawUri {
            url,
            path: path.into(),
            query,
        },
    })
}

/// Returns the path of `uri` as written, up to the query or fragment.
///
/// The generic parser removes dot segments (`a/../b`, `%2e%2e`) and re-encodes the path,
/// but both are legal in S3 keys.
fn raw_path(uri: &str) -> &str {
    let uri = uri.trim_matches(|c: char| c <= ' ');
    let rest = uri.split_once(':').map_or(uri, |(_, rest)| rest);
    let rest = match rest.strip_prefix("//") {
        Some(authority) => authority.find(['/', '?', '#']).map_or("", |idx| &authority[idx..]),
        None => rest,
    };
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// `/key` => `Some("key")`; `""`, `/` => `None`
fn strip_leading_slash(path: &str) -> Option<&str> {
    let key = path.strip_prefix('/').unwrap_or(path);
    (!key.is_empty()).then_some(key)
}

/// `/bucket/key` => `(Some("bucket"), Some("key"))`
///
/// The bucket is the text before the first slash, even when empty: `//key` => `(Some(""), Some("key"))`
fn split_path_style(path: &str) -> (Option<&str>, Option<&str>) {
    let Some(rest) = strip_leading_slash(path) else { return (None, None) };
    match rest.split_once('/') {
        None => (Some(rest), None),
        Some((bucket, key)) => (Some(bucket), (!key.is_empty()).then_some(key)),
    }
}

/// Every `%` must start a `%XX` escape.
fn has_valid_escapes(s: &str) -> bool {
    let mut rest = s;
    while let Some(idx) = rest.find('%') {
        let hex = rest.as_bytes().get(idx + 1..idx + 3);
        if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
            return false;
        }
        rest = &rest[idx + 3..];
    }
    true
}

fn decode_key(uri: &str, key: &str) -> Result<Box<str>, ParseS3UriError> {
    let invalid = || ParseS3UriError::InvalidEncoding { uri: uri.into() };
    if !has_valid_escapes(key) {
        return Err(invalid());
    }
    let key = urlencoding::decode(key).map_err(|_| invalid())?;
    Ok(key.into())
}

impl FromStr for S3Uri {
    type Err = ParseS3UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for S3Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri.url.as_str())
    }
}

impl Serialize for S3Uri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.uri.url.as_str())
    }
}

impl<'de> Deserialize<'de> for S3Uri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(S3UriVisitor)
    }
}

struct S3UriVisitor;

impl S3UriVisitor {
    fn reject<E: serde::de::Error>(found: &'static str) -> Result<S3Uri, E> {
        Err(E::custom(ParseS3UriError::InvalidArgumentType { found }))
    }
}

impl<'de> serde::de::Visitor<'de> for S3UriVisitor {
    type Value = S3Uri;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an S3 URI string")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        S3Uri::parse(v).map_err(E::custom)
    }

    fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Self::reject("boolean")
    }

    fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Self::reject("number")
    }

    fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Self::reject("number")
    }

    fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Self::reject("number")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Self::reject("null")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Self::reject("null")
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, _: A) -> Result<Self::Value, A::Error> {
        Self::reject("array")
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, _: A) -> Result<Self::Value, A::Error> {
        Self::reject("object")
    }
}
