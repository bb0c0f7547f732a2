//! Patch operations: list, show, download, apply and update.

use crate::client::{ApiClient, Resource};
use crate::commands::helpers::save_mbox;
use crate::error::Result;
use crate::filters::{resolve_submitter, resolve_user};
use crate::git::PatchApplier;
use crate::model::Patch;
use crate::query;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct PatchFilters {
    /// May be given more than once; each state becomes its own key.
    pub states: Vec<String>,
    pub submitter: Option<String>,
    pub delegate: Option<String>,
    pub hash: Option<String>,
    pub archived: Option<bool>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub order: String,
}

/// Fields a `patch update` may change. The delegate is a free-text
/// fragment and is resolved before the record is patched.
#[derive(Debug, Clone, Default)]
pub struct PatchChanges {
    pub state: Option<String>,
    pub delegate: Option<String>,
    pub archived: Option<bool>,
}

pub fn list<C: ApiClient>(client: &C, filters: &PatchFilters) -> Result<Vec<Patch>> {
    let submitter = match &filters.submitter {
        Some(fragment) => Some(resolve_submitter(client, fragment)?),
        None => None,
    };
    let delegate = match &filters.delegate {
        Some(fragment) => Some(resolve_user(client, "delegate", fragment)?),
        None => None,
    };
    let params = query::patch_list(
        client.version(),
        &filters.states,
        submitter,
        delegate,
        filters.hash.as_deref(),
        filters.archived,
        filters.query.as_deref(),
        filters.page,
        filters.per_page,
        &filters.order,
    );
    client.index(Resource::Patches, &params)
}

pub fn show<C: ApiClient>(client: &C, id: u32) -> Result<Patch> {
    client.detail(Resource::Patches, id)
}

pub fn download<C: ApiClient>(client: &C, id: u32, output: Option<&Path>) -> Result<PathBuf> {
    let patch: Patch = client.detail(Resource::Patches, id)?;
    save_mbox(client, &patch.mbox, output)
}

pub fn apply<C: ApiClient, A: PatchApplier>(
    client: &C,
    applier: &A,
    id: u32,
    args: &[String],
) -> Result<()> {
    let patch: Patch = client.detail(Resource::Patches, id)?;
    let mbox = client.download(&patch.mbox)?;
    applier.apply(&mbox, args)
}

pub fn update<C: ApiClient>(client: &C, id: u32, changes: &PatchChanges) -> Result<Patch> {
    let mut fields = Vec::new();
    if let Some(state) = &changes.state {
        fields.push(("state", Some(state.clone())));
    }
    if let Some(fragment) = &changes.delegate {
        let delegate = resolve_user(client, "delegate", fragment)?;
        fields.push(("delegate", Some(delegate.to_string())));
    }
    if let Some(archived) = changes.archived {
        fields.push(("archived", Some(archived.to_string())));
    }
    client.update(Resource::Patches, id, &fields)
}
