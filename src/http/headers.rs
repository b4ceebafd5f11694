use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::HttpError;

/// Extra request headers keyed by name, one value per name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: BTreeMap<String, String>,
}

impl HeaderSet {
    /// Builds the set from ordered `(name, value)` pairs. A name that appears
    /// again replaces the earlier value.
    #[must_use]
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut entries = BTreeMap::new();
        for (name, value) in pairs {
            entries.insert(name.into(), value.into());
        }
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Converts the set into a header map ready to attach to a request.
    ///
    /// # Errors
    ///
    /// Returns an error when a name or value is not valid in an HTTP header.
    pub fn to_header_map(&self) -> Result<HeaderMap, HttpError> {
        let mut headers = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in self.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                HttpError::InvalidHeaderName {
                    name: name.to_owned(),
                    source: err,
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|err| HttpError::InvalidHeaderValue {
                    name: name.to_owned(),
                    source: err,
                })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
