//! Series operations: list, show, download and apply.

use crate::client::{ApiClient, Resource};
use crate::commands::helpers::save_mbox;
use crate::error::Result;
use crate::filters::resolve_submitter;
use crate::git::PatchApplier;
use crate::model::Series;
use crate::query;
use std::path::{Path, PathBuf};

/// Listing filters as given on the command line. The submitter is still a
/// free-text fragment at this point; `list` resolves it.
#[derive(Debug, Clone, Default)]
pub struct SeriesFilters {
    pub submitter: Option<String>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub order: String,
}

pub fn list<C: ApiClient>(client: &C, filters: &SeriesFilters) -> Result<Vec<Series>> {
    let submitter = match &filters.submitter {
        Some(fragment) => Some(resolve_submitter(client, fragment)?),
        None => None,
    };
    let params = query::series_list(
        submitter,
        filters.query.as_deref(),
        filters.page,
        filters.per_page,
        &filters.order,
    );
    client.index(Resource::Series, &params)
}

pub fn show<C: ApiClient>(client: &C, id: u32) -> Result<Series> {
    client.detail(Resource::Series, id)
}

/// Download the series mbox. Without an output path the file keeps the
/// name the server assigned; the returned path is where it landed.
pub fn download<C: ApiClient>(client: &C, id: u32, output: Option<&Path>) -> Result<PathBuf> {
    let series: Series = client.detail(Resource::Series, id)?;
    save_mbox(client, &series.mbox, output)
}

/// Apply the series to the working tree. Extra arguments are handed to
/// `git am` unchanged.
pub fn apply<C: ApiClient, A: PatchApplier>(
    client: &C,
    applier: &A,
    id: u32,
    args: &[String],
) -> Result<()> {
    let series: Series = client.detail(Resource::Series, id)?;
    let mbox = client.download(&series.mbox)?;
    applier.apply(&mbox, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::replay::{Call, ReplayClient};
    use crate::error::PwError;
    use crate::query::DEFAULT_SORT;
    use serde_json::json;
    use std::cell::RefCell;

    fn series_json(id: u32) -> serde_json::Value {
        json!({
            "id": id,
            "date": "2017-01-01 00:00:00",
            "name": "Sample series",
            "submitter": {"id": 1, "name": "John Doe", "email": "john@example.com"},
            "project": {"id": 1, "name": "bar", "link_name": "bar"},
            "version": 1,
            "total": 2,
            "received_total": 2,
            "received_all": true,
            "mbox": format!("https://example.com/api/1.2/series/{}/mbox/", id),
        })
    }

    fn default_filters() -> SeriesFilters {
        SeriesFilters {
            order: DEFAULT_SORT.to_string(),
            ..Default::default()
        }
    }

    struct RecordingApplier {
        applied: RefCell<Vec<(PathBuf, Vec<String>)>>,
    }

    impl RecordingApplier {
        fn new() -> Self {
            Self {
                applied: RefCell::new(Vec::new()),
            }
        }
    }

    impl PatchApplier for RecordingApplier {
        fn apply(&self, mbox: &Path, args: &[String]) -> Result<()> {
            self.applied
                .borrow_mut()
                .push((mbox.to_path_buf(), args.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn listing_without_filters_issues_the_default_query() {
        let client = ReplayClient::new();
        client.script_index(json!([series_json(123)]));

        let series = list(&client, &default_filters()).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].id, 123);
        assert_eq!(
            client.calls(),
            vec![Call::Index {
                resource: Resource::Series,
                params: vec![
                    ("q", None),
                    ("page", None),
                    ("per_page", None),
                    ("order", Some("-date".to_string())),
                ],
            }]
        );
    }

    #[test]
    fn listing_with_filters_resolves_the_submitter_first() {
        let client = ReplayClient::new();
        client.script_index(json!([
            {"id": 1, "name": "John Doe", "email": "john@example.com"},
        ]));
        client.script_index(json!([series_json(123)]));

        let filters = SeriesFilters {
            submitter: Some("john@example.com".to_string()),
            query: Some("test".to_string()),
            page: Some(1),
            per_page: Some(1),
            order: "-name".to_string(),
        };
        list(&client, &filters).unwrap();

        assert_eq!(
            client.calls(),
            vec![
                Call::Index {
                    resource: Resource::People,
                    params: vec![("q", Some("john@example.com".to_string()))],
                },
                Call::Index {
                    resource: Resource::Series,
                    params: vec![
                        ("submitter", Some("1".to_string())),
                        ("q", Some("test".to_string())),
                        ("page", Some("1".to_string())),
                        ("per_page", Some("1".to_string())),
                        ("order", Some("-name".to_string())),
                    ],
                },
            ]
        );
    }

    #[test]
    fn an_ambiguous_submitter_stops_before_the_series_query() {
        let client = ReplayClient::new();
        client.script_index(json!([
            {"id": 1, "name": "John Doe", "email": "john@example.com"},
            {"id": 2, "name": "John Roe", "email": "john@example.org"},
        ]));

        let filters = SeriesFilters {
            submitter: Some("john".to_string()),
            ..default_filters()
        };
        let err = list(&client, &filters).unwrap_err();

        assert!(matches!(err, PwError::AmbiguousFilter { .. }));
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn show_fetches_the_detail_record() {
        let client = ReplayClient::new();
        client.script_detail(series_json(123));

        let series = show(&client, 123).unwrap();

        assert_eq!(series.id, 123);
        assert_eq!(
            client.calls(),
            vec![Call::Detail {
                resource: Resource::Series,
                id: 123,
            }]
        );
    }

    #[test]
    fn download_without_output_saves_the_served_file() {
        let client = ReplayClient::new();
        client.script_detail(series_json(123));
        client.script_download("/tmp/pwcli-abc/series-123.mbox");

        let path = download(&client, 123, None).unwrap();

        assert_eq!(path, PathBuf::from("/tmp/pwcli-abc/series-123.mbox"));
        assert_eq!(
            client.calls(),
            vec![
                Call::Detail {
                    resource: Resource::Series,
                    id: 123,
                },
                Call::Download {
                    url: "https://example.com/api/1.2/series/123/mbox/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn download_with_output_writes_the_literal_text() {
        let dir = tempfile::tempdir().unwrap();
        let outfile = dir.path().join("series.mbox");
        let client = ReplayClient::new();
        client.script_detail(series_json(123));
        client.script_text("From git@z Thu Jan  1 00:00:00 1970\nSubject: hi\n");

        let path = download(&client, 123, Some(&outfile)).unwrap();

        assert_eq!(path, outfile);
        assert_eq!(
            std::fs::read_to_string(&outfile).unwrap(),
            "From git@z Thu Jan  1 00:00:00 1970\nSubject: hi\n"
        );
        assert_eq!(
            client.calls(),
            vec![
                Call::Detail {
                    resource: Resource::Series,
                    id: 123,
                },
                Call::GetText {
                    url: "https://example.com/api/1.2/series/123/mbox/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn apply_downloads_and_hands_off_to_git() {
        let client = ReplayClient::new();
        client.script_detail(series_json(123));
        client.script_download("/tmp/pwcli-abc/series-123.mbox");
        let applier = RecordingApplier::new();

        apply(&client, &applier, 123, &["-3".to_string()]).unwrap();

        assert_eq!(
            client.calls(),
            vec![
                Call::Detail {
                    resource: Resource::Series,
                    id: 123,
                },
                Call::Download {
                    url: "https://example.com/api/1.2/series/123/mbox/".to_string(),
                },
            ]
        );
        assert_eq!(
            *applier.applied.borrow(),
            vec![(
                PathBuf::from("/tmp/pwcli-abc/series-123.mbox"),
                vec!["-3".to_string()],
            )]
        );
    }

    #[test]
    fn apply_without_extra_arguments_passes_none() {
        let client = ReplayClient::new();
        client.script_detail(series_json(123));
        client.script_download("/tmp/pwcli-abc/series-123.mbox");
        let applier = RecordingApplier::new();

        apply(&client, &applier, 123, &[]).unwrap();

        let applied = applier.applied.borrow();
        assert_eq!(applied[0].1, Vec::<String>::new());
    }
}
