//! # API client layer
//!
//! This module defines the seam between command logic and the remote
//! Patchwork server. The [`ApiClient`] trait allows commands to run against
//! different backends:
//!
//! - [`http::HttpClient`]: production client speaking blocking HTTP
//! - [`replay::ReplayClient`]: scripted client for tests (records every
//!   call, replays canned responses, never touches the network)
//!
//! Query parameters are an *ordered* sequence of pairs, not a map. The
//! parameter order observed by the server is part of the compatibility
//! contract with existing Patchwork deployments, so builders emit a fixed
//! order and the client must preserve it. Pairs whose value is `None` are
//! placeholders for absent filters and are dropped from the request URL.

use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;

pub mod http;
pub mod replay;

/// One query or form parameter. `None` marks an absent filter that still
/// occupies its slot in the builder output.
pub type Param = (&'static str, Option<String>);

/// Server API version, ordered lexicographically (1.0 < 1.1 < 1.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Extract the API version from a configured server URL.
    ///
    /// Patchwork API roots end in a `/M.N` segment
    /// (`https://patchwork.example.com/api/1.2`). URLs without one talk to
    /// the oldest supported API.
    pub fn from_server_url(url: &str) -> Self {
        let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        if let Some((major, minor)) = last.split_once('.') {
            if let (Ok(major), Ok(minor)) = (major.parse(), minor.parse()) {
                return Self::new(major, minor);
            }
        }
        Self::new(1, 0)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Resources exposed by the Patchwork REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Series,
    Patches,
    Bundles,
    People,
    Users,
}

impl Resource {
    /// URL path segment for the resource collection.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Series => "series",
            Resource::Patches => "patches",
            Resource::Bundles => "bundles",
            Resource::People => "people",
            Resource::Users => "users",
        }
    }

    /// Whether index queries against this resource are scoped to the
    /// configured project. People and users are server-global.
    pub fn project_scoped(self) -> bool {
        matches!(self, Resource::Series | Resource::Patches | Resource::Bundles)
    }

    /// Singular noun for error messages.
    pub fn singular(self) -> &'static str {
        match self {
            Resource::Series => "series",
            Resource::Patches => "patch",
            Resource::Bundles => "bundle",
            Resource::People => "person",
            Resource::Users => "user",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Abstract interface to the remote Patchwork API.
///
/// Commands are generic over this trait; they issue their calls strictly
/// sequentially and treat every failure as terminal.
pub trait ApiClient {
    /// API version of the connected server.
    fn version(&self) -> ApiVersion;

    /// List records of a resource. `params` must be passed through in
    /// order; `None` values are dropped at the wire.
    fn index<T: DeserializeOwned>(&self, resource: Resource, params: &[Param]) -> Result<Vec<T>>;

    /// Fetch a single record by id.
    fn detail<T: DeserializeOwned>(&self, resource: Resource, id: u32) -> Result<T>;

    /// Modify a record, returning its updated form. Only present fields are
    /// sent.
    fn update<T: DeserializeOwned>(&self, resource: Resource, id: u32, fields: &[Param])
        -> Result<T>;

    /// Download the resource at `url` to a file named by the server,
    /// returning the local path.
    fn download(&self, url: &str) -> Result<PathBuf>;

    /// Fetch the literal response body at `url`.
    fn get_text(&self, url: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_parsed_from_the_url_suffix() {
        assert_eq!(
            ApiVersion::from_server_url("https://example.com/api/1.2"),
            ApiVersion::new(1, 2)
        );
        assert_eq!(
            ApiVersion::from_server_url("https://example.com/api/1.1/"),
            ApiVersion::new(1, 1)
        );
    }

    #[test]
    fn version_defaults_to_the_oldest_supported_api() {
        assert_eq!(
            ApiVersion::from_server_url("https://example.com/api"),
            ApiVersion::new(1, 0)
        );
        assert_eq!(
            ApiVersion::from_server_url("https://example.com:8000"),
            ApiVersion::new(1, 0)
        );
    }

    #[test]
    fn versions_order_lexicographically() {
        assert!(ApiVersion::new(1, 0) < ApiVersion::new(1, 1));
        assert!(ApiVersion::new(1, 2) < ApiVersion::new(2, 0));
    }
}
