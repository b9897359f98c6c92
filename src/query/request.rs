use std::fmt;
use std::sync::Arc;

use crate::view::{Location, QueryParams, ViewState};

/// Everything a query is derived from. Replaced as a whole on every
/// dependency change.
#[derive(Clone)]
pub struct QueryProps {
    pub view: Arc<dyn ViewState>,
    pub location: Location,
    pub organization: String,
    /// Endpoint segment after the organization, e.g. `events`.
    pub route: String,
    /// Sent as `per_page`.
    pub limit: Option<u32>,
    /// Explicit cursor; takes precedence over one found in the location.
    pub cursor: Option<String>,
    /// Ask the server to skip pagination. A cursor is still sent if set.
    pub no_pagination: bool,
    pub referrer: Option<String>,
}

impl QueryProps {
    pub fn new(
        view: impl ViewState,
        organization: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            view: Arc::new(view),
            location: Location::default(),
            organization: organization.into(),
            route: route.into(),
            limit: None,
            cursor: None,
            no_pagination: false,
            referrer: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn without_pagination(mut self) -> Self {
        self.no_pagination = true;
        self
    }
}

impl fmt::Debug for QueryProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryProps")
            .field("valid", &self.view.is_valid())
            .field("location", &self.location.path)
            .field("organization", &self.organization)
            .field("route", &self.route)
            .field("limit", &self.limit)
            .field("cursor", &self.cursor)
            .field("no_pagination", &self.no_pagination)
            .field("referrer", &self.referrer)
            .finish()
    }
}

/// A fully derived GET request: path relative to the API host plus query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub path: String,
    pub params: QueryParams,
}

impl QueryRequest {
    /// `{base_path}/{organization}/{route}/`
    pub fn path_for(base_path: &str, organization: &str, route: &str) -> String {
        format!(
            "{}/{}/{}/",
            base_path.trim_end_matches('/'),
            organization,
            route.trim_matches('/')
        )
    }

    /// Merge `base` with the caller overrides; each override is only added
    /// when provided.
    pub fn build(base_path: &str, props: &QueryProps, base: QueryParams) -> Self {
        let mut params = base;
        if let Some(limit) = props.limit {
            params.set("per_page", limit.to_string());
        }
        if let Some(cursor) = props.cursor.as_deref() {
            params.set("cursor", cursor);
        }
        if props.no_pagination {
            params.set("noPagination", "true");
        }
        if let Some(referrer) = props.referrer.as_deref() {
            params.set("referrer", referrer);
        }

        Self {
            path: Self::path_for(base_path, &props.organization, &props.route),
            params,
        }
    }
}
