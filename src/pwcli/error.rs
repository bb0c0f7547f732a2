use crate::filters::Candidate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PwError {
    /// Zero candidates from a resolution lookup, or an unknown resource id.
    #[error("{0}")]
    NotFound(String),

    /// A free-text filter matched more than one record.
    #[error("{}", render_ambiguous(.filter, .fragment, .candidates))]
    AmbiguousFilter {
        filter: &'static str,
        fragment: String,
        candidates: Vec<Candidate>,
    },

    /// Non-2xx API response that is not a plain 404.
    #[error("API error: {0}")]
    Api(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// `git am` exited with the given status code.
    #[error("git am exited with code {0}")]
    GitAm(i32),

    #[error("failed to run git: {0}")]
    Git(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PwError {
    /// Process exit status for this error. `git am` failures propagate
    /// git's own status so wrappers can distinguish conflicts.
    pub fn exit_code(&self) -> i32 {
        match self {
            PwError::GitAm(code) => *code,
            _ => 1,
        }
    }
}

fn render_ambiguous(filter: &str, fragment: &str, candidates: &[Candidate]) -> String {
    let mut out = format!(
        "more than one {} matches '{}'; use a more specific value. Matches:",
        filter, fragment
    );
    for candidate in candidates {
        out.push_str("\n  - ");
        out.push_str(&candidate.to_string());
    }
    out
}

pub type Result<T> = std::result::Result<T, PwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_filter_lists_every_candidate() {
        let err = PwError::AmbiguousFilter {
            filter: "submitter",
            fragment: "john".to_string(),
            candidates: vec![
                Candidate {
                    id: 1,
                    name: Some("John Doe".to_string()),
                    email: Some("john@example.com".to_string()),
                },
                Candidate {
                    id: 2,
                    name: None,
                    email: Some("johnny@example.com".to_string()),
                },
            ],
        };

        let rendered = err.to_string();
        assert!(rendered.contains("more than one submitter matches 'john'"));
        assert!(rendered.contains("John Doe (john@example.com)"));
        assert!(rendered.contains("johnny@example.com"));
    }

    #[test]
    fn git_am_failures_propagate_the_status_code() {
        assert_eq!(PwError::GitAm(128).exit_code(), 128);
        assert_eq!(PwError::NotFound("series not found".into()).exit_code(), 1);
    }
}
