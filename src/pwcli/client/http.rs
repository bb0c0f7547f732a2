use crate::client::{ApiClient, ApiVersion, Param, Resource};
use crate::config::Config;
use crate::error::{PwError, Result};
use log::debug;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const USER_AGENT: &str = concat!("pwcli/", env!("CARGO_PKG_VERSION"));

/// Production client speaking blocking HTTP to a Patchwork server.
///
/// One instance per command invocation; requests are issued strictly
/// sequentially and never retried here.
pub struct HttpClient {
    http: reqwest::blocking::Client,
    server: String,
    project: Option<String>,
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
    version: ApiVersion,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        let server = config.server.trim_end_matches('/').to_string();
        let version = ApiVersion::from_server_url(&server);

        Ok(Self {
            http,
            server,
            project: config.project.clone(),
            token: config.token.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            version,
        })
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}/", self.server, resource.path())
    }

    fn record_url(&self, resource: Resource, id: u32) -> String {
        format!("{}/{}/{}/", self.server, resource.path(), id)
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request.header("Authorization", format!("Token {}", token))
        } else if let Some(username) = &self.username {
            request.basic_auth(username, self.password.as_deref())
        } else {
            request
        }
    }

    fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);
        let rsp = self.authenticated(self.http.get(url)).send()?;
        check_status(rsp)
    }
}

impl ApiClient for HttpClient {
    fn version(&self) -> ApiVersion {
        self.version
    }

    fn index<T: DeserializeOwned>(&self, resource: Resource, params: &[Param]) -> Result<Vec<T>> {
        let mut pairs = present_pairs(params);
        if resource.project_scoped() {
            match &self.project {
                Some(project) => pairs.push(("project", project)),
                None => {
                    return Err(PwError::Config(
                        "no project configured; set pw.project, PW_PROJECT or --project"
                            .to_string(),
                    ))
                }
            }
        }

        let url = self.collection_url(resource);
        debug!("GET {} {:?}", url, pairs);
        let rsp = self
            .authenticated(self.http.get(&url).query(&pairs))
            .send()?;
        Ok(check_status(rsp)?.json()?)
    }

    fn detail<T: DeserializeOwned>(&self, resource: Resource, id: u32) -> Result<T> {
        let url = self.record_url(resource, id);
        debug!("GET {}", url);
        let rsp = self.authenticated(self.http.get(&url)).send()?;
        if rsp.status() == StatusCode::NOT_FOUND {
            return Err(PwError::NotFound(format!(
                "{} {} not found",
                resource.singular(),
                id
            )));
        }
        Ok(check_status(rsp)?.json()?)
    }

    fn update<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: u32,
        fields: &[Param],
    ) -> Result<T> {
        let url = self.record_url(resource, id);
        let pairs = present_pairs(fields);
        debug!("PATCH {} {:?}", url, pairs);
        let rsp = self
            .authenticated(self.http.patch(&url).form(&pairs))
            .send()?;
        if rsp.status() == StatusCode::NOT_FOUND {
            return Err(PwError::NotFound(format!(
                "{} {} not found",
                resource.singular(),
                id
            )));
        }
        Ok(check_status(rsp)?.json()?)
    }

    fn download(&self, url: &str) -> Result<PathBuf> {
        let rsp = self.get(url)?;
        let filename = rsp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .ok_or_else(|| {
                PwError::Api("filename missing from content-disposition header".to_string())
            })?;

        let dir = env::temp_dir().join(format!("pwcli-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir)?;
        let output = dir.join(filename);
        debug!("saving to {}", output.display());
        fs::write(&output, rsp.bytes()?)?;
        Ok(output)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url)?.text()?)
    }
}

/// Drop `None` placeholders, keeping the remaining pairs in order.
fn present_pairs(params: &[Param]) -> Vec<(&'static str, &str)> {
    params
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)))
        .collect()
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Map non-2xx responses onto the error taxonomy, preferring the server's
/// own `detail` message when the body carries one.
fn check_status(rsp: Response) -> Result<Response> {
    let status = rsp.status();
    if status.is_success() {
        return Ok(rsp);
    }

    let detail = rsp
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.is_empty());
    if status == StatusCode::NOT_FOUND {
        return Err(PwError::NotFound(
            detail.unwrap_or_else(|| "resource not found".to_string()),
        ));
    }
    Err(PwError::Api(detail.unwrap_or_else(|| {
        format!("unexpected response: {}", status)
    })))
}

/// Pull the output filename out of a Content-Disposition header. The last
/// path component is taken so a hostile header cannot escape the download
/// directory.
fn filename_from_disposition(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("filename=")?;
    let name = rest
        .split(';')
        .next()
        .unwrap_or(rest)
        .trim()
        .trim_matches('"');
    let name = Path::new(name).file_name()?.to_str()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_placeholders_are_dropped_from_the_wire() {
        let params: Vec<Param> = vec![
            ("submitter", Some("1".to_string())),
            ("q", None),
            ("page", None),
            ("per_page", None),
            ("order", Some("-date".to_string())),
        ];

        assert_eq!(
            present_pairs(&params),
            vec![("submitter", "1"), ("order", "-date")]
        );
    }

    #[test]
    fn filename_is_parsed_from_content_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=series-123.mbox").as_deref(),
            Some("series-123.mbox")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=\"quoted.mbox\"; size=12").as_deref(),
            Some("quoted.mbox")
        );
        assert_eq!(filename_from_disposition("attachment"), None);
    }

    #[test]
    fn filenames_cannot_escape_the_download_directory() {
        assert_eq!(
            filename_from_disposition("attachment; filename=../../etc/passwd").as_deref(),
            Some("passwd")
        );
    }
}
