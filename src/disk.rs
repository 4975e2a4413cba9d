// Cloud disk client: creates folders and asks the disk to fetch remote
// URLs into a path ("upload by URL"). No image bytes pass through here.

use crate::config::Config;
use crate::error::DiskError;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Successful outcomes of a folder-create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderState {
    Created,
    AlreadyExists,
}

/// Client for the disk REST API. The credential is attached to every
/// request through a default `Authorization` header.
#[derive(Clone)]
pub struct DiskClient {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
}

impl DiskClient {
    pub fn new(config: &Config, token: &str) -> Result<Self, DiskError> {
        let mut auth = HeaderValue::from_str(&format!("{} {}", config.auth_scheme, token))
            .map_err(DiskError::InvalidToken)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(DiskError::Client)?;
        Ok(DiskClient {
            client,
            base_url: config.disk_api_url.clone(),
            upload_timeout: config.upload_timeout,
        })
    }

    /// PUT /resources. 201 and 409 both mean the folder is there.
    pub fn create_folder(&self, path: &str) -> Result<FolderState, DiskError> {
        let url = format!("{}/resources", self.base_url);
        debug!(%path, "creating folder");
        let res = self
            .client
            .put(&url)
            .query(&[("path", path)])
            .send()
            .map_err(|source| DiskError::Transport {
                path: path.to_string(),
                source,
            })?;
        match res.status() {
            StatusCode::CREATED => Ok(FolderState::Created),
            StatusCode::CONFLICT => Ok(FolderState::AlreadyExists),
            status => Err(DiskError::Rejected {
                path: path.to_string(),
                status,
            }),
        }
    }

    /// Ask the disk to fetch `source_url` into `destination`, overwriting.
    ///
    /// 202 counts as success without waiting for the transfer. A 409 means
    /// the parent folder is missing: it is created and the upload is tried
    /// exactly once more.
    pub fn upload_from_url(&self, source_url: &str, destination: &str) -> Result<(), DiskError> {
        match self.post_upload(source_url, destination)? {
            StatusCode::ACCEPTED => Ok(()),
            StatusCode::CONFLICT => {
                let folder = parent_folder(destination);
                debug!(%folder, "destination folder missing, creating it");
                if let Err(err) = self.create_folder(folder) {
                    warn!(%folder, error = %err, "folder fallback failed");
                    return Err(DiskError::FolderUnavailable {
                        folder: folder.to_string(),
                        source: Box::new(err),
                    });
                }
                match self.post_upload(source_url, destination)? {
                    StatusCode::ACCEPTED => Ok(()),
                    status => Err(DiskError::Rejected {
                        path: destination.to_string(),
                        status,
                    }),
                }
            }
            status => Err(DiskError::Rejected {
                path: destination.to_string(),
                status,
            }),
        }
    }

    fn post_upload(&self, source_url: &str, destination: &str) -> Result<StatusCode, DiskError> {
        let url = format!("{}/resources/upload", self.base_url);
        debug!(%destination, source = %source_url, "POST upload");
        let res = self
            .client
            .post(&url)
            .query(&[
                ("path", destination),
                ("url", source_url),
                ("overwrite", "true"),
            ])
            .timeout(self.upload_timeout)
            .send()
            .map_err(|source| DiskError::Transport {
                path: destination.to_string(),
                source,
            })?;
        Ok(res.status())
    }
}

/// Everything before the last `/`, or `/` when that is empty.
pub fn parent_folder(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some(("", _)) | None => "/",
        Some((parent, _)) => parent,
    }
}
