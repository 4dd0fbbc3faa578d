//! Upload Flow: presign GET, then a multipart POST straight to object storage.

use crate::error::{ClientError, ClientResult};
use crate::{messages, HttpClient};
use reqwest::multipart::{Form, Part};
use s3etl_core::constants::FILE_FIELD;
use s3etl_core::{
    EndpointConfig, Notifier, PresignedPost, SubmitControl, UploadStage, UploadState,
};
use std::path::Path;
use std::sync::Arc;

/// Path prefix browsers put in front of a selected file's name.
const FAKE_PATH_PREFIX: &str = "c:\\fakepath\\";

/// Remove the first `C:\fakepath\` (any case) from `name`.
pub fn strip_fake_path(name: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `name`.
    match name.to_ascii_lowercase().find(FAKE_PATH_PREFIX) {
        Some(idx) => format!("{}{}", &name[..idx], &name[idx + FAKE_PATH_PREFIX.len()..]),
        None => name.to_string(),
    }
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: strip_fake_path(name),
            data,
        }
    }

    /// Read a local file; the upload name is its final path component.
    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::File {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin");

        Ok(Self::new(name, data))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The object store accepted the file.
    Uploaded { file_name: String, target_url: String },
    /// No presign endpoint configured; nothing was sent.
    NotConfigured,
}

/// Drives one upload at a time through [`UploadState`].
///
/// Every attempt that reaches `Succeeded` or `Failed` ends back in `Idle`;
/// the finished state stays readable through [`UploadFlow::last_attempt`].
pub struct UploadFlow {
    http: HttpClient,
    control: Arc<dyn SubmitControl>,
    state: UploadState,
    last_attempt: Option<UploadState>,
}

impl UploadFlow {
    pub fn new(http: HttpClient, control: Arc<dyn SubmitControl>) -> Self {
        Self {
            http,
            control,
            state: UploadState::Idle,
            last_attempt: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Terminal state of the most recent finished attempt.
    pub fn last_attempt(&self) -> Option<&UploadState> {
        self.last_attempt.as_ref()
    }

    fn finish(&mut self) {
        if self.state.is_terminal() {
            self.last_attempt = Some(self.state.clone());
            self.transition(UploadState::Idle);
        }
    }

    /// Presign URL for `file_name` under `presign_endpoint`.
    pub fn credentials_url(presign_endpoint: &str, file_name: &str) -> String {
        format!(
            "{}/{}",
            presign_endpoint.trim_end_matches('/'),
            urlencoding::encode(file_name)
        )
    }

    /// Multipart body: every credential field in order, then the file.
    pub fn build_form(post: &PresignedPost, file: UploadFile) -> Form {
        let form = post
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        form.part(FILE_FIELD, Part::bytes(file.data).file_name(file.name))
    }

    pub async fn submit(
        &mut self,
        file: UploadFile,
        endpoints: &EndpointConfig,
        notifier: &dyn Notifier,
    ) -> ClientResult<UploadOutcome> {
        if !self.state.submit_enabled() {
            return Err(ClientError::Busy);
        }

        if !endpoints.has_presign() {
            notifier.notify(messages::PRESIGN_NOT_CONFIGURED);
            return Ok(UploadOutcome::NotConfigured);
        }

        self.transition(UploadState::RequestingCredentials);
        let result = self.attempt(file, endpoints, notifier).await;
        self.finish();
        result
    }

    async fn attempt(
        &mut self,
        file: UploadFile,
        endpoints: &EndpointConfig,
        notifier: &dyn Notifier,
    ) -> ClientResult<UploadOutcome> {
        let file_name = file.name.clone();
        let credentials_url = Self::credentials_url(&endpoints.presign_url, &file_name);
        tracing::info!(file = %file_name, url = %credentials_url, "Requesting upload credentials");

        let post: PresignedPost = match self.http.get_json(&credentials_url).await {
            Ok(post) => post,
            Err(e) => {
                tracing::error!(file = %file_name, error = %e, "Failed to get pre-signed POST");
                self.transition(UploadState::Failed {
                    stage: UploadStage::Credentials,
                    reason: e.to_string(),
                });
                notifier.notify(messages::PRESIGN_FAILED);
                return Err(ClientError::Presign(Box::new(e)));
            }
        };

        tracing::debug!(url = %post.url, fields = post.fields.len(), "Got pre-signed POST");
        self.transition(UploadState::Uploading);

        let target_url = post.url.clone();
        let form = Self::build_form(&post, file);

        match self.http.post_multipart(&target_url, form).await {
            Ok(()) => {
                tracing::info!(file = %file_name, url = %target_url, "Upload succeeded");
                self.transition(UploadState::Succeeded);
                notifier.notify(messages::UPLOAD_SUCCEEDED);
                Ok(UploadOutcome::Uploaded {
                    file_name,
                    target_url,
                })
            }
            Err(e) => {
                tracing::error!(file = %file_name, error = %e, "Upload failed");
                self.transition(UploadState::Failed {
                    stage: UploadStage::Upload,
                    reason: e.to_string(),
                });
                notifier.notify(messages::UPLOAD_FAILED);
                Err(ClientError::Upload(Box::new(e)))
            }
        }
    }

    /// Move to `next`, toggling the submit control when its enabled-ness changes.
    fn transition(&mut self, next: UploadState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid upload transition {} -> {}",
            self.state,
            next
        );

        let was_enabled = self.state.submit_enabled();
        self.state = next;
        let enabled = self.state.submit_enabled();
        if was_enabled != enabled {
            self.control.set_enabled(enabled);
        }
    }
}
