/// Errors returned when parsing an [`S3Uri`](crate::S3Uri).
///
/// None of them are transient: each one describes a defect of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseS3UriError {
    /// The input is not a string.
    #[error("ParseS3UriError: InvalidArgumentType: expected a string, found {found}")]
    InvalidArgumentType {
        /// type of the rejected input
        found: &'static str,
    },

    /// The input is not a syntactically valid URI.
    #[error("ParseS3UriError: MalformedUri: {source}")]
    MalformedUri {
        /// generic URI parsing error
        #[source]
        source: url::ParseError,
    },

    /// An `s3://` URI without a bucket.
    #[error("ParseS3UriError: MissingBucket: {uri}")]
    MissingBucket {
        /// the rejected URI
        uri: Box<str>,
    },

    /// An HTTP(S) URI without a host.
    #[error("ParseS3UriError: MissingHost: {uri}")]
    MissingHost {
        /// the rejected URI
        uri: Box<str>,
    },

    /// The host does not look like an S3 endpoint.
    #[error("ParseS3UriError: NotAnS3Endpoint: {uri}")]
    NotAnS3Endpoint {
        /// the rejected URI
        uri: Box<str>,
    },

    /// The key or query does not decode to UTF-8.
    #[error("ParseS3UriError: InvalidEncoding: {uri}")]
    InvalidEncoding {
        /// the rejected URI
        uri: Box<str>,
    },
}

impl ParseS3UriError {
    /// Maps a generic URI parsing error.
    ///
    /// A special-scheme URL (`http`, `https`) with an empty host is rejected by the
    /// generic parser, but is reported as [`MissingHost`](Self::MissingHost).
    pub(crate) fn from_url_error(uri: &str, source: url::ParseError) -> Self {
        match source {
            url::ParseError::EmptyHost => Self::MissingHost { uri: uri.into() },
            _ => Self::MalformedUri { source },
        }
    }
}
