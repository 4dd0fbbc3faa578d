//! Upload state machine and the submit control it drives.
//!
//! `Idle -> RequestingCredentials -> Uploading -> {Succeeded, Failed} -> Idle`.
//! Submitting is allowed only from a state where [`UploadState::submit_enabled`]
//! holds; the control is disabled for the whole in-flight part of an attempt.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Which network step of an upload failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    /// The presign GET.
    Credentials,
    /// The multipart POST to object storage.
    Upload,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStage::Credentials => write!(f, "credentials"),
            UploadStage::Upload => write!(f, "upload"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    RequestingCredentials,
    Uploading,
    Succeeded,
    Failed { stage: UploadStage, reason: String },
}

impl UploadState {
    /// Whether a new submission may start from this state.
    pub fn submit_enabled(&self) -> bool {
        matches!(
            self,
            UploadState::Idle | UploadState::Succeeded | UploadState::Failed { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadState::Succeeded | UploadState::Failed { .. })
    }

    pub fn can_transition_to(&self, next: &UploadState) -> bool {
        use UploadState::*;
        match (self, next) {
            (Idle | Succeeded | Failed { .. }, RequestingCredentials) => true,
            (Succeeded | Failed { .. }, Idle) => true,
            (RequestingCredentials, Uploading) => true,
            (
                RequestingCredentials,
                Failed {
                    stage: UploadStage::Credentials,
                    ..
                },
            ) => true,
            (Uploading, Succeeded) => true,
            (
                Uploading,
                Failed {
                    stage: UploadStage::Upload,
                    ..
                },
            ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadState::Idle => write!(f, "idle"),
            UploadState::RequestingCredentials => write!(f, "requesting-credentials"),
            UploadState::Uploading => write!(f, "uploading"),
            UploadState::Succeeded => write!(f, "succeeded"),
            UploadState::Failed { stage, reason } => write!(f, "failed ({}): {}", stage, reason),
        }
    }
}

/// The control that starts an upload (a submit button, a prompt).
pub trait SubmitControl: Send + Sync {
    fn set_enabled(&self, enabled: bool);
}

impl<C: SubmitControl + ?Sized> SubmitControl for Arc<C> {
    fn set_enabled(&self, enabled: bool) {
        (**self).set_enabled(enabled)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSubmitControl;

impl SubmitControl for NoopSubmitControl {
    fn set_enabled(&self, _enabled: bool) {}
}

/// Records every enable/disable call.
#[derive(Debug, Default, Clone)]
pub struct RecordingSubmitControl {
    calls: Arc<Mutex<Vec<bool>>>,
}

impl RecordingSubmitControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn enable_count(&self) -> usize {
        self.calls().into_iter().filter(|enabled| *enabled).count()
    }

    /// State after the last call; enabled when never touched.
    pub fn is_enabled(&self) -> bool {
        self.calls().last().copied().unwrap_or(true)
    }
}

impl SubmitControl for RecordingSubmitControl {
    fn set_enabled(&self, enabled: bool) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(enabled);
        }
    }
}
