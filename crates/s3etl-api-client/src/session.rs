//! A client session: the endpoint configuration, its store, and the flows
//! that read it, wired the way the web page wires its forms.

use crate::discovery::EndpointResolver;
use crate::error::ClientResult;
use crate::listing::{ListFlow, RefreshOutcome};
use crate::upload::{UploadFile, UploadFlow, UploadOutcome};
use crate::{messages, HttpClient};
use s3etl_core::{
    ClientConfig, EndpointConfig, FileTables, KeyValueStore, Notifier, SubmitControl, UploadState,
};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Buttons of the configuration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Load,
    Save,
    Clear,
    Unknown(String),
}

impl FromStr for ConfigAction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "load" => ConfigAction::Load,
            "save" => ConfigAction::Save,
            "clear" => ConfigAction::Clear,
            other => ConfigAction::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for ConfigAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigAction::Load => write!(f, "load"),
            ConfigAction::Save => write!(f, "save"),
            ConfigAction::Clear => write!(f, "clear"),
            ConfigAction::Unknown(name) => write!(f, "{}", name),
        }
    }
}

pub struct Session<S: KeyValueStore> {
    endpoints: EndpointConfig,
    store: S,
    notifier: Arc<dyn Notifier>,
    resolver: EndpointResolver,
    uploads: UploadFlow,
    lists: ListFlow,
    tables: FileTables,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(
        config: &ClientConfig,
        store: S,
        notifier: Arc<dyn Notifier>,
        control: Arc<dyn SubmitControl>,
    ) -> ClientResult<Self> {
        let http = HttpClient::new(config.http_timeout)?;
        let resolver = EndpointResolver::from_config(http.clone(), config);
        Ok(Self::with_resolver(http, resolver, store, notifier, control))
    }

    /// Session with a caller-supplied resolver (custom credentials or base URL).
    pub fn with_resolver(
        http: HttpClient,
        resolver: EndpointResolver,
        store: S,
        notifier: Arc<dyn Notifier>,
        control: Arc<dyn SubmitControl>,
    ) -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            store,
            notifier,
            resolver,
            uploads: UploadFlow::new(http.clone(), control),
            lists: ListFlow::new(http),
            tables: FileTables::new(),
        }
    }

    /// What a page load does: restore saved endpoints, optionally discover
    /// fresh ones, then render the list if a list endpoint is known.
    ///
    /// A discovery failure does not stop the list refresh; it is returned
    /// once the refresh has run.
    pub async fn start(&mut self, discover: bool) -> ClientResult<()> {
        self.restore();

        let discovery = if discover { self.load().await } else { Ok(()) };

        if self.endpoints.has_list() {
            if let Err(e) = self.refresh().await {
                if let Err(discovery_error) = &discovery {
                    tracing::warn!(error = %discovery_error, "Endpoint discovery also failed");
                }
                return Err(e);
            }
        }

        discovery
    }

    /// Copy persisted endpoints into the in-memory config.
    pub fn restore(&mut self) {
        self.endpoints.restore(&self.store);
    }

    pub async fn apply(&mut self, action: ConfigAction) -> ClientResult<()> {
        tracing::debug!(%action, "Configuration action");
        match action {
            ConfigAction::Load => self.load().await,
            ConfigAction::Save => self.save(),
            ConfigAction::Clear => self.clear(),
            ConfigAction::Unknown(name) => {
                tracing::warn!(action = %name, "Unknown configuration action");
                self.notifier.notify(messages::UNKNOWN_ACTION);
                Ok(())
            }
        }
    }

    /// Run endpoint discovery.
    pub async fn load(&mut self) -> ClientResult<()> {
        self.resolver
            .resolve(&mut self.endpoints, &mut self.store, self.notifier.as_ref())
            .await
    }

    pub fn save(&mut self) -> ClientResult<()> {
        self.endpoints.save(&mut self.store)?;
        self.notifier.notify(messages::CONFIG_SAVED);
        Ok(())
    }

    pub fn clear(&mut self) -> ClientResult<()> {
        self.endpoints.clear(&mut self.store)?;
        self.notifier.notify(messages::CONFIG_CLEARED);
        Ok(())
    }

    /// Upload `file`, then refresh the list if the upload went through.
    pub async fn upload(&mut self, file: UploadFile) -> ClientResult<UploadOutcome> {
        let outcome = self
            .uploads
            .submit(file, &self.endpoints, self.notifier.as_ref())
            .await?;

        if let UploadOutcome::Uploaded { .. } = outcome {
            self.refresh().await?;
        }

        Ok(outcome)
    }

    pub async fn refresh(&mut self) -> ClientResult<RefreshOutcome> {
        self.lists
            .refresh(&self.endpoints, &mut self.tables, self.notifier.as_ref())
            .await
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    /// Edit the in-memory endpoints; call [`Session::save`] to persist.
    pub fn endpoints_mut(&mut self) -> &mut EndpointConfig {
        &mut self.endpoints
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tables(&self) -> &FileTables {
        &self.tables
    }

    pub fn upload_state(&self) -> &UploadState {
        self.uploads.state()
    }

    /// How the most recent finished upload ended.
    pub fn last_upload(&self) -> Option<&UploadState> {
        self.uploads.last_attempt()
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s3etl_core::constants::{LIST_URL_KEY, PRESIGN_URL_KEY};
    use s3etl_core::{MemoryStore, NoopSubmitControl, RecordingNotifier};

    fn session(store: MemoryStore) -> (Session<MemoryStore>, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let session = Session::new(
            &ClientConfig::default(),
            store,
            Arc::new(notifier.clone()),
            Arc::new(NoopSubmitControl),
        )
        .unwrap();
        (session, notifier)
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!("load".parse::<ConfigAction>().unwrap(), ConfigAction::Load);
        assert_eq!("save".parse::<ConfigAction>().unwrap(), ConfigAction::Save);
        assert_eq!("clear".parse::<ConfigAction>().unwrap(), ConfigAction::Clear);
        assert_eq!(
            "reset".parse::<ConfigAction>().unwrap(),
            ConfigAction::Unknown("reset".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_persists_edits() {
        let (mut session, notifier) = session(MemoryStore::new());
        *session.endpoints_mut() = EndpointConfig::new("http://presign.local", "http://list.local");

        session.apply(ConfigAction::Save).await.unwrap();

        assert_eq!(
            session.store().load(PRESIGN_URL_KEY).as_deref(),
            Some("http://presign.local")
        );
        assert_eq!(
            session.store().load(LIST_URL_KEY).as_deref(),
            Some("http://list.local")
        );
        assert_eq!(notifier.messages(), vec![messages::CONFIG_SAVED]);
    }

    #[tokio::test]
    async fn test_clear_resets_fields_and_store() {
        let mut store = MemoryStore::new();
        EndpointConfig::new("http://presign.local", "http://list.local")
            .save(&mut store)
            .unwrap();
        let (mut session, notifier) = session(store);
        session.restore();
        assert!(session.endpoints().has_list());

        session.apply(ConfigAction::Clear).await.unwrap();

        assert_eq!(session.endpoints(), &EndpointConfig::default());
        assert!(session.store().is_empty());
        assert_eq!(notifier.messages(), vec![messages::CONFIG_CLEARED]);
    }

    #[tokio::test]
    async fn test_unknown_action_only_notifies() {
        let (mut session, notifier) = session(MemoryStore::new());
        session
            .apply(ConfigAction::Unknown("reset".to_string()))
            .await
            .unwrap();
        assert_eq!(notifier.messages(), vec![messages::UNKNOWN_ACTION]);
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_start_without_endpoints_makes_no_requests() {
        let (mut session, notifier) = session(MemoryStore::new());
        session.start(false).await.unwrap();
        assert!(session.tables().is_empty());
        assert_eq!(notifier.count(), 0);
    }
}
