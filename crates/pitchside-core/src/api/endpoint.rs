//! Endpoint values: a resource path plus its already-stringified query parameters.

use reqwest::Url;

use super::FetchError;

/// One GET request against the football API, minus the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: &'static str,
    params: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            params: Vec::new(),
        }
    }

    /// Append a query parameter. Values are encoded when the URL is built.
    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn path(&self) -> &str {
        self.path
    }

    /// Full request URL under `base_url`, with the query string encoded.
    ///
    /// Encoding is `application/x-www-form-urlencoded`: spaces go out as `+`,
    /// everything outside the unreserved set as `%XX`.
    pub fn url(&self, base_url: &str) -> Result<Url, FetchError> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let parsed = if self.params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, self.params.iter().map(|(k, v)| (*k, v.as_str())))
        };
        parsed.map_err(|e| FetchError::Unexpected(format!("invalid endpoint URL '{}': {}", raw, e)))
    }
}

/// `path?query` portion of a URL, for logs.
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}
