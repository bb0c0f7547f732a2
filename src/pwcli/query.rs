//! Ordered query construction for listing commands.
//!
//! Builders return the complete parameter list for one request, in the
//! order the wire expects. Keys with no value stay in the list as `None`
//! placeholders; the transport drops them when the request goes out, so
//! the built shape is stable regardless of which filters were supplied.

use crate::client::{ApiVersion, Param};
use log::warn;

/// Sort applied to series and patch listings when none is requested.
pub const DEFAULT_SORT: &str = "-date";

/// Bundles have no date field; they sort by id.
pub const BUNDLE_DEFAULT_SORT: &str = "id";

/// Patch hash filtering shipped with API 1.1.
pub fn supports_hash_filter(version: ApiVersion) -> bool {
    version >= ApiVersion::new(1, 1)
}

pub fn series_list(
    submitter: Option<u32>,
    query: Option<&str>,
    page: Option<u32>,
    per_page: Option<u32>,
    order: &str,
) -> Vec<Param> {
    let mut params = Vec::with_capacity(5);
    if let Some(id) = submitter {
        params.push(("submitter", Some(id.to_string())));
    }
    params.extend(tail(query, page, per_page, order));
    params
}

#[allow(clippy::too_many_arguments)]
pub fn patch_list(
    version: ApiVersion,
    states: &[String],
    submitter: Option<u32>,
    delegate: Option<u32>,
    hash: Option<&str>,
    archived: Option<bool>,
    query: Option<&str>,
    page: Option<u32>,
    per_page: Option<u32>,
    order: &str,
) -> Vec<Param> {
    let mut params = Vec::new();
    for state in states {
        params.push(("state", Some(state.clone())));
    }
    if let Some(id) = submitter {
        params.push(("submitter", Some(id.to_string())));
    }
    if let Some(id) = delegate {
        params.push(("delegate", Some(id.to_string())));
    }
    if let Some(hash) = hash {
        if supports_hash_filter(version) {
            params.push(("hash", Some(hash.to_string())));
        } else {
            warn!(
                "hash filtering requires API 1.1, server offers {}; ignoring the hash filter",
                version
            );
        }
    }
    if let Some(archived) = archived {
        params.push(("archived", Some(archived.to_string())));
    }
    params.extend(tail(query, page, per_page, order));
    params
}

pub fn bundle_list(
    owner: Option<u32>,
    query: Option<&str>,
    page: Option<u32>,
    per_page: Option<u32>,
    order: &str,
) -> Vec<Param> {
    let mut params = Vec::with_capacity(5);
    if let Some(id) = owner {
        params.push(("owner", Some(id.to_string())));
    }
    params.extend(tail(query, page, per_page, order));
    params
}

/// Keys shared by every listing, always present and always last.
fn tail(query: Option<&str>, page: Option<u32>, per_page: Option<u32>, order: &str) -> Vec<Param> {
    vec![
        ("q", query.map(str::to_string)),
        ("page", page.map(|page| page.to_string())),
        ("per_page", per_page.map(|per_page| per_page.to_string())),
        ("order", Some(order.to_string())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_series_query_keeps_placeholder_keys() {
        assert_eq!(
            series_list(None, None, None, None, DEFAULT_SORT),
            vec![
                ("q", None),
                ("page", None),
                ("per_page", None),
                ("order", Some("-date".to_string())),
            ]
        );
    }

    #[test]
    fn a_lone_submitter_filter_keeps_the_other_placeholders() {
        assert_eq!(
            series_list(Some(1), None, None, None, DEFAULT_SORT),
            vec![
                ("submitter", Some("1".to_string())),
                ("q", None),
                ("page", None),
                ("per_page", None),
                ("order", Some("-date".to_string())),
            ]
        );
    }

    #[test]
    fn filtered_series_query_leads_with_the_submitter() {
        assert_eq!(
            series_list(Some(1), Some("test"), Some(1), Some(1), "-name"),
            vec![
                ("submitter", Some("1".to_string())),
                ("q", Some("test".to_string())),
                ("page", Some("1".to_string())),
                ("per_page", Some("1".to_string())),
                ("order", Some("-name".to_string())),
            ]
        );
    }

    #[test]
    fn patch_states_repeat_before_identity_filters() {
        let states = vec!["under-review".to_string(), "new".to_string()];
        let params = patch_list(
            ApiVersion::new(1, 2),
            &states,
            Some(3),
            Some(12),
            None,
            None,
            None,
            None,
            None,
            DEFAULT_SORT,
        );

        assert_eq!(
            params,
            vec![
                ("state", Some("under-review".to_string())),
                ("state", Some("new".to_string())),
                ("submitter", Some("3".to_string())),
                ("delegate", Some("12".to_string())),
                ("q", None),
                ("page", None),
                ("per_page", None),
                ("order", Some("-date".to_string())),
            ]
        );
    }

    #[test]
    fn hash_filter_requires_a_new_enough_server() {
        let kept = patch_list(
            ApiVersion::new(1, 1),
            &[],
            None,
            None,
            Some("abc123"),
            None,
            None,
            None,
            None,
            DEFAULT_SORT,
        );
        assert!(kept.contains(&("hash", Some("abc123".to_string()))));

        let dropped = patch_list(
            ApiVersion::new(1, 0),
            &[],
            None,
            None,
            Some("abc123"),
            None,
            None,
            None,
            None,
            DEFAULT_SORT,
        );
        assert!(!dropped.iter().any(|(key, _)| *key == "hash"));
    }

    #[test]
    fn archived_filter_is_sent_only_when_requested() {
        let params = patch_list(
            ApiVersion::new(1, 2),
            &[],
            None,
            None,
            None,
            Some(true),
            None,
            None,
            None,
            DEFAULT_SORT,
        );
        assert!(params.contains(&("archived", Some("true".to_string()))));

        let params = patch_list(
            ApiVersion::new(1, 2),
            &[],
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            DEFAULT_SORT,
        );
        assert!(!params.iter().any(|(key, _)| *key == "archived"));
    }

    #[test]
    fn bundle_queries_lead_with_the_owner() {
        assert_eq!(
            bundle_list(Some(42), None, None, Some(10), BUNDLE_DEFAULT_SORT),
            vec![
                ("owner", Some("42".to_string())),
                ("q", None),
                ("page", None),
                ("per_page", Some("10".to_string())),
                ("order", Some("id".to_string())),
            ]
        );
    }
}
