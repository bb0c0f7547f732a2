//! Resolution of free-text identity filters.
//!
//! Filters such as `--submitter` and `--delegate` accept a name or email
//! fragment. Resolution issues exactly one directory lookup and then maps
//! the candidate count onto a [`Resolution`]: anything other than a single
//! match stops the command before the main query is built.

use crate::client::{ApiClient, Resource};
use crate::error::{PwError, Result};
use crate::model::{Person, User};
use log::warn;
use std::fmt;

/// Shortest fragment length that reliably narrows a directory lookup.
const MIN_FRAGMENT_LEN: usize = 4;

/// One identity that matched a lookup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: u32,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.email) {
            (Some(name), Some(email)) => write!(f, "{} ({})", name, email),
            (Some(name), None) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "id {}", self.id),
        }
    }
}

impl From<Person> for Candidate {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            email: Some(person.email),
        }
    }
}

impl From<User> for Candidate {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: Some(user.username),
            email: user.email,
        }
    }
}

/// Outcome of matching a fragment against a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(u32),
    Ambiguous(Vec<Candidate>),
    NotFound,
}

/// Classify a candidate list by its size.
pub fn classify(candidates: Vec<Candidate>) -> Resolution {
    match candidates.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Resolved(candidates[0].id),
        _ => Resolution::Ambiguous(candidates),
    }
}

/// Resolve a submitter fragment against the people directory.
pub fn resolve_submitter(client: &impl ApiClient, fragment: &str) -> Result<u32> {
    let people: Vec<Person> = lookup(client, Resource::People, "submitter", fragment)?;
    finish(
        "submitter",
        fragment,
        classify(people.into_iter().map(Candidate::from).collect()),
    )
}

/// Resolve a user-account fragment (delegate, bundle owner) against the
/// user directory.
pub fn resolve_user(client: &impl ApiClient, filter: &'static str, fragment: &str) -> Result<u32> {
    let users: Vec<User> = lookup(client, Resource::Users, filter, fragment)?;
    finish(
        filter,
        fragment,
        classify(users.into_iter().map(Candidate::from).collect()),
    )
}

fn lookup<T: serde::de::DeserializeOwned>(
    client: &impl ApiClient,
    resource: Resource,
    filter: &str,
    fragment: &str,
) -> Result<Vec<T>> {
    if fragment.chars().count() < MIN_FRAGMENT_LEN {
        warn!(
            "{} filter '{}' is below {} characters and may match unrelated entries",
            filter, fragment, MIN_FRAGMENT_LEN
        );
    }
    client.index(resource, &[("q", Some(fragment.to_string()))])
}

fn finish(filter: &'static str, fragment: &str, resolution: Resolution) -> Result<u32> {
    match resolution {
        Resolution::Resolved(id) => Ok(id),
        Resolution::Ambiguous(candidates) => Err(PwError::AmbiguousFilter {
            filter,
            fragment: fragment.to_string(),
            candidates,
        }),
        Resolution::NotFound => Err(PwError::NotFound(format!(
            "no {} found matching '{}'",
            filter, fragment
        ))),
    }
}
