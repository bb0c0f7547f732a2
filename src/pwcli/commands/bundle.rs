//! Bundle operations: list, show, download and apply.

use crate::client::{ApiClient, Resource};
use crate::commands::helpers::save_mbox;
use crate::error::Result;
use crate::filters::resolve_user;
use crate::git::PatchApplier;
use crate::model::Bundle;
use crate::query;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct BundleFilters {
    pub owner: Option<String>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub order: String,
}

pub fn list<C: ApiClient>(client: &C, filters: &BundleFilters) -> Result<Vec<Bundle>> {
    let owner = match &filters.owner {
        Some(fragment) => Some(resolve_user(client, "owner", fragment)?),
        None => None,
    };
    let params = query::bundle_list(
        owner,
        filters.query.as_deref(),
        filters.page,
        filters.per_page,
        &filters.order,
    );
    client.index(Resource::Bundles, &params)
}

pub fn show<C: ApiClient>(client: &C, id: u32) -> Result<Bundle> {
    client.detail(Resource::Bundles, id)
}

pub fn download<C: ApiClient>(client: &C, id: u32, output: Option<&Path>) -> Result<PathBuf> {
    let bundle: Bundle = client.detail(Resource::Bundles, id)?;
    save_mbox(client, &bundle.mbox, output)
}

/// Apply every patch in the bundle to the working tree, in bundle order.
pub fn apply<C: ApiClient, A: PatchApplier>(
    client: &C,
    applier: &A,
    id: u32,
    args: &[String],
) -> Result<()> {
    let bundle: Bundle = client.detail(Resource::Bundles, id)?;
    let mbox = client.download(&bundle.mbox)?;
    applier.apply(&mbox, args)
}
