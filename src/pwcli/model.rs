use serde::Deserialize;
use std::fmt;

/// A person record from the People resource. Embedded copies appear as the
/// `submitter` of series and patches.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub id: u32,
    pub name: Option<String>,
    pub email: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

/// An account record from the Users resource. Embedded as a patch `delegate`
/// and a bundle `owner`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} ({})", self.username, email),
            None => write!(f, "{}", self.username),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub link_name: Option<String>,
}

/// Servers report series versions as integers, but older instances emitted
/// them as strings. Accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SeriesVersion {
    Number(u64),
    Text(String),
}

impl fmt::Display for SeriesVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesVersion::Number(n) => write!(f, "{}", n),
            SeriesVersion::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Slim reference to a patch, as embedded in series and bundle records.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchRef {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

/// Slim reference to a cover letter, as embedded in series records.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverRef {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRef {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Series {
    pub id: u32,
    #[serde(default)]
    pub url: Option<String>,
    pub date: String,
    pub name: Option<String>,
    pub submitter: Person,
    pub project: Project,
    pub version: SeriesVersion,
    pub total: u32,
    pub received_total: u32,
    pub received_all: bool,
    #[serde(default)]
    pub cover_letter: Option<CoverRef>,
    // Always present on the wire; detail records carry the canonical URL.
    pub mbox: String,
    #[serde(default)]
    pub patches: Vec<PatchRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Patch {
    pub id: u32,
    #[serde(default)]
    pub url: Option<String>,
    pub date: String,
    pub name: String,
    #[serde(default)]
    pub msgid: Option<String>,
    pub submitter: Person,
    pub state: String,
    pub archived: bool,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub delegate: Option<User>,
    pub mbox: String,
    #[serde(default)]
    pub series: Vec<SeriesRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bundle {
    pub id: u32,
    #[serde(default)]
    pub url: Option<String>,
    pub name: String,
    pub owner: User,
    pub public: bool,
    pub mbox: String,
    #[serde(default)]
    pub patches: Vec<PatchRef>,
}
