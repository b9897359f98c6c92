use crate::query::hooks::{base_params, QueryHooks};
use crate::query::request::QueryProps;

/// Decide whether moving from `previous` to `current` needs a new fetch.
///
/// True when the derived payloads are not similar, when `limit`, `route`
/// or `cursor` changed, when the caller's predicate says so, or when the
/// view just became valid.
pub fn should_refetch<T>(previous: &QueryProps, current: &QueryProps, hooks: &QueryHooks<T>) -> bool {
    let before = base_params(previous, hooks);
    let after = base_params(current, hooks);
    if !current.view.is_similar(&after, &before) {
        return true;
    }

    if previous.limit != current.limit
        || previous.route != current.route
        || previous.cursor != current.cursor
    {
        return true;
    }

    if let Some(predicate) = &hooks.should_refetch_data {
        if predicate(previous, current) {
            return true;
        }
    }

    !previous.view.is_valid() && current.view.is_valid()
}
