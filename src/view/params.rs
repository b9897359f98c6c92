use std::collections::{BTreeMap, BTreeSet};

use url::form_urlencoded;

/// Keys that change between otherwise identical requests and must not
/// trigger a refetch (cache busters, client timestamps).
pub const VOLATILE_KEYS: &[&str] = &["_", "requestedAt"];

/// Keys whose values are a selection, where order carries no meaning.
pub const UNORDERED_KEYS: &[&str] = &["field", "project", "environment"];

/// Ordered multimap of request query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), vec![value.into()]);
    }

    /// Append a value to `key`, keeping existing ones.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into `(key, value)` pairs, repeated keys kept in order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key.clone(), v.clone())))
            .collect()
    }

    /// Parse an `a=1&b=2&b=3` query string (`application/x-www-form-urlencoded`).
    pub fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .filter(|(key, _)| !key.is_empty())
            .collect()
    }

    /// Compare two parameter sets, ignoring [`VOLATILE_KEYS`] and treating
    /// [`UNORDERED_KEYS`] as sets.
    pub fn is_similar(&self, other: &QueryParams) -> bool {
        let keys = |p: &QueryParams| -> BTreeSet<String> {
            p.entries
                .keys()
                .filter(|k| !VOLATILE_KEYS.contains(&k.as_str()))
                .cloned()
                .collect()
        };

        let current_keys = keys(self);
        if current_keys != keys(other) {
            return false;
        }

        current_keys.iter().all(|key| {
            let a = self.get_all(key);
            let b = other.get_all(key);
            if UNORDERED_KEYS.contains(&key.as_str()) {
                a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
            } else {
                a == b
            }
        })
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}
