//! List/Render Flow: fetch file records and rebuild the two tables.

use crate::error::{ClientError, ClientResult};
use crate::{messages, HttpClient};
use s3etl_core::{EndpointConfig, FileRecord, FileTables, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered { raw: usize, processed: usize },
    /// No list endpoint configured; nothing was requested.
    NotConfigured,
}

#[derive(Clone, Debug)]
pub struct ListFlow {
    http: HttpClient,
}

impl ListFlow {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Replace the contents of `tables` with the records from the list endpoint.
    ///
    /// `tables` is cleared before the request, so a failed request leaves it empty.
    pub async fn refresh(
        &self,
        endpoints: &EndpointConfig,
        tables: &mut FileTables,
        notifier: &dyn Notifier,
    ) -> ClientResult<RefreshOutcome> {
        if !endpoints.has_list() {
            notifier.notify(messages::LIST_NOT_CONFIGURED);
            return Ok(RefreshOutcome::NotConfigured);
        }

        tables.clear();

        let records: Vec<FileRecord> = match self.http.get_json(&endpoints.list_url).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(url = %endpoints.list_url, error = %e, "Failed to load file list");
                notifier.notify(messages::LIST_FAILED);
                return Err(ClientError::List(Box::new(e)));
            }
        };

        for record in &records {
            tracing::trace!(?record, "File record");
            tables.push_record(record);
        }

        tracing::debug!(
            records = records.len(),
            raw = tables.raw.len(),
            processed = tables.processed.len(),
            "Rendered file list"
        );

        Ok(RefreshOutcome::Rendered {
            raw: tables.raw.len(),
            processed: tables.processed.len(),
        })
    }
}
