use crate::client::{ApiClient, ApiVersion, Param, Resource};
use crate::error::{PwError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

/// One observed API call, including the exact ordered parameters it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Index {
        resource: Resource,
        params: Vec<Param>,
    },
    Detail {
        resource: Resource,
        id: u32,
    },
    Update {
        resource: Resource,
        id: u32,
        fields: Vec<Param>,
    },
    Download {
        url: String,
    },
    GetText {
        url: String,
    },
}

/// Client that replays scripted responses instead of talking to a server.
///
/// Responses are queued per method and consumed in call order; every call
/// is recorded so tests can assert on the exact request sequence. Running
/// out of scripted responses is reported as an API error rather than a
/// panic, so a handler that issues an unexpected extra request fails the
/// test through the normal error path.
#[derive(Default)]
pub struct ReplayClient {
    version: ApiVersion,
    index_responses: RefCell<VecDeque<Value>>,
    detail_responses: RefCell<VecDeque<Value>>,
    update_responses: RefCell<VecDeque<Value>>,
    downloads: RefCell<VecDeque<PathBuf>>,
    texts: RefCell<VecDeque<String>>,
    calls: RefCell<Vec<Call>>,
}

impl ReplayClient {
    pub fn new() -> Self {
        Self::with_version(ApiVersion::new(1, 2))
    }

    pub fn with_version(version: ApiVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn script_index(&self, response: Value) {
        self.index_responses.borrow_mut().push_back(response);
    }

    pub fn script_detail(&self, response: Value) {
        self.detail_responses.borrow_mut().push_back(response);
    }

    pub fn script_update(&self, response: Value) {
        self.update_responses.borrow_mut().push_back(response);
    }

    pub fn script_download(&self, path: impl Into<PathBuf>) {
        self.downloads.borrow_mut().push_back(path.into());
    }

    pub fn script_text(&self, text: impl Into<String>) {
        self.texts.borrow_mut().push_back(text.into());
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(queue: &RefCell<VecDeque<Value>>, method: &str) -> Result<Value> {
        queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PwError::Api(format!("no scripted response for {}", method)))
    }
}

impl ApiClient for ReplayClient {
    fn version(&self) -> ApiVersion {
        self.version
    }

    fn index<T: DeserializeOwned>(&self, resource: Resource, params: &[Param]) -> Result<Vec<T>> {
        self.record(Call::Index {
            resource,
            params: params.to_vec(),
        });
        let value = Self::next(&self.index_responses, "index")?;
        Ok(serde_json::from_value(value)?)
    }

    fn detail<T: DeserializeOwned>(&self, resource: Resource, id: u32) -> Result<T> {
        self.record(Call::Detail { resource, id });
        let value = Self::next(&self.detail_responses, "detail")?;
        Ok(serde_json::from_value(value)?)
    }

    fn update<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: u32,
        fields: &[Param],
    ) -> Result<T> {
        self.record(Call::Update {
            resource,
            id,
            fields: fields.to_vec(),
        });
        let value = Self::next(&self.update_responses, "update")?;
        Ok(serde_json::from_value(value)?)
    }

    fn download(&self, url: &str) -> Result<PathBuf> {
        self.record(Call::Download {
            url: url.to_string(),
        });
        self.downloads
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PwError::Api("no scripted response for download".to_string()))
    }

    fn get_text(&self, url: &str) -> Result<String> {
        self.record(Call::GetText {
            url: url.to_string(),
        });
        self.texts
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PwError::Api("no scripted response for get_text".to_string()))
    }
}
