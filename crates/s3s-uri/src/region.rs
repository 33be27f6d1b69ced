//! S3 region defaulting
//!
//! An S3 endpoint host only sometimes names its region. The legacy global
//! endpoint (`s3.amazonaws.com`, `bucket.s3.amazonaws.com`) carries the token
//! `amazonaws` where a regional endpoint carries the region, so that token is
//! mapped to [`DEFAULT_REGION`].

/// The region assumed when an S3 URI does not name one.
///
/// # Examples
/// ```
/// # use s3s_uri::region::DEFAULT_REGION;
/// assert_eq!(DEFAULT_REGION, "us-east-1");
/// ```
pub const DEFAULT_REGION: &str = "us-east-1";

/// The token following `s3` on the global endpoint.
const GLOBAL_ENDPOINT_TOKEN: &str = "amazonaws";

/// Resolves the region named by the token that follows `s3` in an endpoint host.
///
/// Any token other than `amazonaws` is returned verbatim, without validation.
///
/// # Examples
/// ```
/// # use s3s_uri::region::region_from_token;
/// assert_eq!(region_from_token("amazonaws"), "us-east-1");
/// assert_eq!(region_from_token("eu-west-1"), "eu-west-1");
/// assert_eq!(region_from_token("aws-region"), "aws-region");
/// ```
#[must_use]
pub fn region_from_token(token: &str) -> &str {
    if token == GLOBAL_ENDPOINT_TOKEN { DEFAULT_REGION } else { token }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_endpoint_token() {
        assert_eq!(region_from_token("amazonaws"), DEFAULT_REGION);
    }

    #[test]
    fn regional_tokens_are_verbatim() {
        assert_eq!(region_from_token("us-west-2"), "us-west-2");
        assert_eq!(region_from_token("us-gov-west-1"), "us-gov-west-1");
        assert_eq!(region_from_token("cn-north-1"), "cn-north-1");

        // not validated
        assert_eq!(region_from_token("website"), "website");
        assert_eq!(region_from_token("accesspoint"), "accesspoint");
        assert_eq!(region_from_token("amazonaws-cn"), "amazonaws-cn");
    }
}
