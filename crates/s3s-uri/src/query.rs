//! Query strings

use std::fmt;

/// The query of a parsed URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// raw query string, without the leading `?`
    Raw(Box<str>),
    /// decoded `(name, value)` pairs
    Decoded(OrderedQs),
}

impl Query {
    /// Returns the raw query string, if the query was not decoded.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Query::Raw(s) => Some(s),
            Query::Decoded(_) => None,
        }
    }

    /// Returns the decoded pairs, if the query was decoded.
    #[must_use]
    pub fn as_decoded(&self) -> Option<&OrderedQs> {
        match self {
            Query::Raw(_) => None,
            Query::Decoded(qs) => Some(qs),
        }
    }
}

/// Immutable query string container
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderedQs {
    /// Ascending query string pairs
    qs: Vec<(String, String)>,
}

/// [`OrderedQs`]
#[derive(Debug)]
pub struct ParseQueryError {
    /// url encoding error
    inner: serde_urlencoded::de::Error,
}

impl OrderedQs {
    /// Constructs [`OrderedQs`] from vec
    ///
    /// + strings must be url-decoded
    #[must_use]
    pub fn from_vec_unchecked(mut v: Vec<(String, String)>) -> Self {
        // stable
        v.sort_by(|a, b| a.0.cmp(&b.0));
        Self { qs: v }
    }

    /// Parses [`OrderedQs`] from query
    ///
    /// # Errors
    /// Returns [`ParseQueryError`] if query cannot be decoded
    pub fn parse(query: &str) -> Result<Self, ParseQueryError> {
        let result = serde_urlencoded::from_str::<Vec<(String, String)>>(query);
        let v = result.map_err(|e| ParseQueryError { inner: e })?;
        Ok(Self::from_vec_unchecked(v))
    }

    fn get_all_pairs(&self, name: &str) -> &[(String, String)] {
        let slice = self.qs.as_slice();

        let lower_bound = slice.partition_point(|x| x.0.as_str() < name);
        let upper_bound = slice.partition_point(|x| x.0.as_str() <= name);

        &slice[lower_bound..upper_bound]
    }

    /// Gets all values of a name, in their original order. Time `O(logn)`
    pub fn get_all(&self, name: impl AsRef<str>) -> impl Iterator<Item = &str> + '_ {
        self.get_all_pairs(name.as_ref()).iter().map(|x| x.1.as_str())
    }

    /// Gets query values by name. Time `O(logn)`
    ///
    /// Returns `None` if the name is missing or repeated.
    #[must_use]
    pub fn get_unique(&self, name: impl AsRef<str>) -> Option<&str> {
        match self.get_all_pairs(name.as_ref()) {
            [(_, v)] => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns an iterator over (name, value) pairs, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.qs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.qs.len()
    }

    /// Returns `true` if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qs.is_empty()
    }
}

impl AsRef<[(String, String)]> for OrderedQs {
    fn as_ref(&self) -> &[(String, String)] {
        self.qs.as_ref()
    }
}

impl fmt::Display for ParseQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseQueryError: {}", self.inner)
    }
}

impl std::error::Error for ParseQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag() {
        {
            let query = "tagging";
            let qs = OrderedQs::parse(query).unwrap();
            assert_eq!(qs.as_ref(), &[("tagging".to_owned(), String::new())]);

            assert_eq!(qs.get_unique("taggin"), None);
            assert_eq!(qs.get_unique("tagging"), Some(""));
            assert_eq!(qs.get_unique("taggingg"), None);
        }

        {
            let query = "tagging&tagging";
            let qs = OrderedQs::parse(query).unwrap();
            assert_eq!(
                qs.as_ref(),
                &[("tagging".to_owned(), String::new()), ("tagging".to_owned(), String::new())]
            );

            assert_eq!(qs.get_unique("taggin"), None);
            assert_eq!(qs.get_unique("tagging"), None);
            assert_eq!(qs.get_unique("taggingg"), None);
        }
    }

    #[test]
    fn sorted_and_decoded() {
        let qs = OrderedQs::parse("versionId=abc&a=x%20y&b=1+2&a=z").unwrap();
        assert_eq!(qs.len(), 4);

        let names: Vec<&str> = qs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "a", "b", "versionId"]);

        assert_eq!(qs.get_all("a").collect::<Vec<_>>(), ["x y", "z"]);
        assert_eq!(qs.get_unique("a"), None);
        assert_eq!(qs.get_unique("b"), Some("1 2"));
        assert_eq!(qs.get_unique("versionId"), Some("abc"));
        assert_eq!(qs.get_all("missing").count(), 0);
    }

    #[test]
    fn empty() {
        let qs = OrderedQs::parse("").unwrap();
        assert!(qs.is_empty());
        assert_eq!(qs.iter().count(), 0);
    }

    #[test]
    fn query_accessors() {
        let raw = Query::Raw("a=1".into());
        assert_eq!(raw.as_raw(), Some("a=1"));
        assert!(raw.as_decoded().is_none());

        let decoded = Query::Decoded(OrderedQs::parse("a=1").unwrap());
        assert!(decoded.as_raw().is_none());
        assert_eq!(decoded.as_decoded().unwrap().get_unique("a"), Some("1"));
    }
}
