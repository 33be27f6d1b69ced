//! S3 endpoint host matching
//!
//! A host names an S3 endpoint when it has the shape
//! `[<prefix>.]s3(.|-)<token>.<rest>`, which is the regular expression
//! `^(.+\.)?s3[.-]([a-z0-9-]+)\.` written out by hand.
//!
//! + `<prefix>.` is the bucket label of a virtual-hosted-style host.
//!   When several positions could start the `s3` label, the longest prefix wins.
//! + `<token>` is the region (`s3.eu-west-1`, `s3-eu-west-1`)
//!   or `amazonaws` on the global endpoint (`s3.amazonaws.com`).
//!
//! The match is a heuristic. Dual-stack and accelerate endpoints are not recognized
//! as such and fall through the same rules.

use crate::region::region_from_token;

/// An S3 endpoint recognized in a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    /// bucket label including its trailing dot
    prefix: Option<&'a str>,
    /// token following `s3`
    token: &'a str,
}

impl<'a> Endpoint<'a> {
    /// Matches `host` against the endpoint shape.
    ///
    /// Returns `None` if the host is not an S3 endpoint.
    ///
    /// # Examples
    /// ```
    /// # use s3s_uri::endpoint::Endpoint;
    /// let ep = Endpoint::parse("bucket.s3.eu-west-1.amazonaws.com").unwrap();
    /// assert_eq!(ep.bucket(), Some("bucket"));
    /// assert_eq!(ep.region(), "eu-west-1");
    ///
    /// let ep = Endpoint::parse("s3.amazonaws.com").unwrap();
    /// assert_eq!(ep.bucket(), None);
    /// assert_eq!(ep.region(), "us-east-1");
    ///
    /// assert!(Endpoint::parse("aws.amazon.com").is_none());
    /// ```
    #[must_use]
    pub fn parse(host: &'a str) -> Option<Self> {
        for (idx, _) in host.rmatch_indices('.') {
            // the prefix needs at least one character before its dot
            if idx == 0 {
                continue;
            }
            let (prefix, rest) = host.split_at(idx + 1);
            if let Some(token) = match_service(rest) {
                return Some(Self {
                    prefix: Some(prefix),
                    token,
                });
            }
        }

        match_service(host).map(|token| Self { prefix: None, token })
    }

    /// Returns the bucket label with its trailing dot, if the host is virtual-hosted-style.
    #[must_use]
    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    /// Returns the bucket named by the host, if the host is virtual-hosted-style.
    #[must_use]
    pub fn bucket(&self) -> Option<&'a str> {
        self.prefix.map(|p| p.strip_suffix('.').unwrap_or(p))
    }

    /// Returns the raw token following `s3`.
    #[must_use]
    pub fn token(&self) -> &'a str {
        self.token
    }

    /// Returns the region of the endpoint.
    #[must_use]
    pub fn region(&self) -> &'a str {
        region_from_token(self.token)
    }

    /// Whether the bucket must be taken from the path.
    #[must_use]
    pub fn is_path_style(&self) -> bool {
        self.prefix.is_none()
    }
}

/// Matches `s3[.-]([a-z0-9-]+)\.` at the start of `s`, returning the token.
fn match_service(s: &str) -> Option<&str> {
    let rest = s.strip_prefix("s3")?;
    let rest = rest.strip_prefix(['.', '-'])?;

    let len = rest.bytes().take_while(|&b| is_token_byte(b)).count();
    if len == 0 {
        return None;
    }

    let (token, tail) = rest.split_at(len);
    tail.starts_with('.').then_some(token)
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_style_hosts() {
        let ep = Endpoint::parse("s3.amazonaws.com").unwrap();
        assert_eq!(ep.prefix(), None);
        assert_eq!(ep.token(), "amazonaws");
        assert_eq!(ep.region(), "us-east-1");
        assert!(ep.is_path_style());

        let ep = Endpoint::parse("s3-eu-west-1.amazonaws.com").unwrap();
        assert_eq!(ep.token(), "eu-west-1");
        assert!(ep.is_path_style());

        let ep = Endpoint::parse("s3.ap-south-1.amazonaws.com").unwrap();
        assert_eq!(ep.region(), "ap-south-1");
        assert!(ep.is_path_style());
    }

    #[test]
    fn virtual_hosted_style_hosts() {
        let ep = Endpoint::parse("bucket.s3.amazonaws.com").unwrap();
        assert_eq!(ep.prefix(), Some("bucket."));
        assert_eq!(ep.bucket(), Some("bucket"));
        assert_eq!(ep.region(), "us-east-1");
        assert!(!ep.is_path_style());

        let ep = Endpoint::parse("bucket.s3-aws-region.amazonaws.com").unwrap();
        assert_eq!(ep.bucket(), Some("bucket"));
        assert_eq!(ep.region(), "aws-region");

        let ep = Endpoint::parse("my.dotted.bucket.s3.us-west-2.amazonaws.com").unwrap();
        assert_eq!(ep.bucket(), Some("my.dotted.bucket"));
        assert_eq!(ep.region(), "us-west-2");
    }

    #[test]
    fn longest_prefix_wins() {
        // both `s3.s3.` and `s3.` could start the service label
        let ep = Endpoint::parse("s3.s3.eu-west-1.amazonaws.com").unwrap();
        assert_eq!(ep.bucket(), Some("s3"));
        assert_eq!(ep.region(), "eu-west-1");

        let ep = Endpoint::parse("a.s3-x.s3.us-east-2.amazonaws.com").unwrap();
        assert_eq!(ep.bucket(), Some("a.s3-x"));
        assert_eq!(ep.region(), "us-east-2");
    }

    #[test]
    fn prefix_needs_a_label() {
        // `.s3.` at the start is not a bucket prefix, and `.s3` is not `s3`
        assert!(Endpoint::parse(".s3.amazonaws.com").is_none());
    }

    #[test]
    fn token_is_followed_by_a_dot() {
        assert!(Endpoint::parse("s3.amazonaws").is_none());
        assert!(Endpoint::parse("s3-eu-west-1").is_none());
        assert!(Endpoint::parse("s3..amazonaws.com").is_none());
        assert!(Endpoint::parse("s3_eu.amazonaws.com").is_none());
    }

    #[test]
    fn non_s3_hosts() {
        assert!(Endpoint::parse("aws.amazon.com").is_none());
        assert!(Endpoint::parse("example.com").is_none());
        assert!(Endpoint::parse("localhost").is_none());
        assert!(Endpoint::parse("").is_none());
        assert!(Endpoint::parse("s4.amazonaws.com").is_none());
    }

    #[test]
    fn permissive_matching() {
        // any `s3` label delimited by `.` or `-` counts
        let ep = Endpoint::parse("s3.example.com").unwrap();
        assert_eq!(ep.region(), "example");

        let ep = Endpoint::parse("bucket.s3.dualstack.us-east-1.amazonaws.com").unwrap();
        assert_eq!(ep.bucket(), Some("bucket"));
        assert_eq!(ep.region(), "dualstack");
    }
}
