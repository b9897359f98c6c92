use url::Url;

use super::params::QueryParams;

/// Origin that relative locations are resolved against. Only the path and
/// query of the result are kept.
const RELATIVE_ORIGIN: &str = "http://localhost/";

/// The page location a view is rendered at: a path plus its query string.
///
/// Only the query part feeds requests; the path is kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: QueryParams,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    /// Parse a path or absolute URL, e.g.
    /// `https://sentry.io/organizations/acme/discover/results/?statsPeriod=24h`.
    pub fn parse(input: &str) -> Self {
        let url = Url::parse(input)
            .or_else(|_| Url::parse(RELATIVE_ORIGIN).and_then(|origin| origin.join(input)));
        match url {
            Ok(url) => Self {
                path: url.path().to_string(),
                query: url.query().map(QueryParams::parse).unwrap_or_default(),
            },
            Err(_) => Self::new(input),
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.set(key, value);
        self
    }
}
