use serde::{Deserialize, Serialize};

use super::location::Location;
use super::params::QueryParams;
use super::ViewState;

/// Location query keys allowed to override the view.
const LOCATION_PASSTHROUGH: &[&str] = &["cursor", "utc"];

/// Time window a view covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Relative period such as `24h` or `14d`, sent as `statsPeriod`.
    Relative(String),
    /// Absolute bounds, sent as `start`/`end` verbatim.
    Absolute { start: String, end: String },
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Relative("24h".to_string())
    }
}

impl TimeRange {
    /// Time range selected by the location query, if any.
    ///
    /// `start` and `end` must both be present; a lone bound is ignored.
    fn from_location(query: &QueryParams) -> Option<Self> {
        if let (Some(start), Some(end)) = (query.get("start"), query.get("end")) {
            return Some(TimeRange::Absolute {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        query
            .get("statsPeriod")
            .filter(|p| !p.is_empty())
            .map(|p| TimeRange::Relative(p.to_string()))
    }

    fn apply(&self, params: &mut QueryParams) {
        match self {
            TimeRange::Relative(period) => params.set("statsPeriod", period.as_str()),
            TimeRange::Absolute { start, end } => {
                params.set("start", start.as_str());
                params.set("end", end.as_str());
            }
        }
    }
}

/// A saved or ad-hoc events query: columns, filter, sort and selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub projects: Vec<u64>,
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub time_range: TimeRange,
}

impl EventView {
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl ViewState for EventView {
    fn is_valid(&self) -> bool {
        self.fields.iter().any(|f| !f.trim().is_empty())
    }

    fn query_params(&self, location: &Location) -> QueryParams {
        let mut params = QueryParams::new();

        let mut seen = Vec::with_capacity(self.fields.len());
        for field in self.fields.iter().filter(|f| !f.trim().is_empty()) {
            if !seen.contains(&field) {
                seen.push(field);
                params.append("field", field.as_str());
            }
        }

        if !self.query.trim().is_empty() {
            params.set("query", self.query.trim());
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            params.set("sort", sort);
        }
        for project in &self.projects {
            params.append("project", project.to_string());
        }
        for environment in &self.environments {
            params.append("environment", environment.as_str());
        }

        TimeRange::from_location(&location.query)
            .as_ref()
            .unwrap_or(&self.time_range)
            .apply(&mut params);

        for key in LOCATION_PASSTHROUGH {
            if let Some(value) = location.query.get(key) {
                params.set(*key, value);
            }
        }

        params
    }
}
