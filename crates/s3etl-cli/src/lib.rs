use anyhow::Context;
use clap::ValueEnum;
use s3etl_api_client::{ClientError, Session};
use s3etl_core::{FileRow, FileTables, KeyValueStore, Notifier, SubmitControl};
use serde::Serialize;
use std::fmt::Write;
use std::io;

/// Output format for file tables and configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout carries only output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints notifications on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// A terminal has no button to grey out; the toggles are only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSubmitControl;

impl SubmitControl for ConsoleSubmitControl {
    fn set_enabled(&self, enabled: bool) {
        tracing::debug!(enabled, "Upload submit control");
    }
}

fn render_table(out: &mut String, title: &str, rows: &[FileRow]) {
    let _ = writeln!(out, "\n=== {} ({}) ===\n", title, rows.len());

    if rows.is_empty() {
        let _ = writeln!(out, "No files.");
        return;
    }

    let _ = writeln!(
        out,
        "{:<30} {:>14} {:<32} {}",
        "Name", "Size", "Timestamp", "Download"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<30} {:>14} {:<32} {}",
            truncate_string(&row.name, 30),
            row.size_label,
            truncate_string(&row.timestamp, 32),
            row.url
        );
    }
}

/// Text rendering of both tables.
pub fn render_tables(tables: &FileTables) -> String {
    let mut out = String::new();
    render_table(&mut out, "Raw files", &tables.raw);
    render_table(&mut out, "Processed files", &tables.processed);
    out
}

pub fn write_json(value: &impl Serialize, out: &mut dyn io::Write) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Serialize output")?;
    out.write_all(rendered.as_bytes())
        .and_then(|_| out.write_all(b"\n"))
        .context("Write output")
}

pub fn write_listing(
    tables: &FileTables,
    format: OutputFormat,
    out: &mut dyn io::Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(tables, out),
        OutputFormat::Table => {
            out.write_all(render_tables(tables).as_bytes())
                .context("Write output")?;
            Ok(())
        }
    }
}

/// Run the session start sequence and write the listing.
///
/// The listing is written whenever a list endpoint is configured and the
/// refresh itself succeeded, even if discovery failed; a discovery error is
/// returned after the listing.
pub async fn open_session<S: KeyValueStore>(
    session: &mut Session<S>,
    discover: bool,
    format: OutputFormat,
    out: &mut dyn io::Write,
) -> anyhow::Result<()> {
    let started = session.start(discover).await;

    let refreshed = !matches!(started, Err(ClientError::List(_)));
    if session.endpoints().has_list() && refreshed {
        write_listing(session.tables(), format, out)?;
    }

    started.map_err(anyhow::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use s3etl_core::{
        ClientConfig, EndpointConfig, FileRecord, MemoryStore, NoopSubmitControl,
        RecordingNotifier,
    };
    use std::sync::Arc;
    use std::time::Duration;

    const LIST_BODY: &str = r#"[
        {"Raw": {"Name": "a.jpg", "Original": {"Size": 10, "URL": "u1"}, "Timestamp": "t1"}},
        {"Processed": {"Name": "b.jpg", "Size": 20, "URL": "u2", "Timestamp": "t2"}}
    ]"#;

    fn session_for(server: &mockito::Server) -> Session<MemoryStore> {
        let mut store = MemoryStore::new();
        EndpointConfig::new("", format!("{}/list", server.url()))
            .save(&mut store)
            .unwrap();
        let config = ClientConfig {
            origin: Some(server.url()),
            http_timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        };
        Session::new(
            &config,
            store,
            Arc::new(RecordingNotifier::new()),
            Arc::new(NoopSubmitControl),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn open_session_lists_files_when_discovery_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2021-10-31/functions/presign/urls")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/list")
            .with_status(200)
            .with_body(LIST_BODY)
            .create_async()
            .await;

        let mut session = session_for(&server);
        let mut out = Vec::new();
        let err = open_session(&mut session, true, OutputFormat::Table, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Discovery { .. })
        ));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a.jpg"));
        assert!(text.contains("b.jpg"));
    }

    #[tokio::test]
    async fn open_session_writes_nothing_when_list_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/list")
            .with_status(502)
            .create_async()
            .await;

        let mut session = session_for(&server);
        let mut out = Vec::new();
        let err = open_session(&mut session, false, OutputFormat::Json, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::List(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn write_listing_json() {
        let mut out = Vec::new();
        write_listing(&FileTables::new(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["raw"], serde_json::json!([]));
        assert_eq!(value["processed"], serde_json::json!([]));
    }

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_exact() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_multibyte() {
        assert_eq!(truncate_string("ééééé", 4), "é...");
    }

    #[test]
    fn render_tables_lists_rows_under_their_table() {
        let records: Vec<FileRecord> = serde_json::from_str(
            r#"[
                {"Raw": {"Name": "a.jpg", "Original": {"Size": 10, "URL": "u1"}, "Timestamp": "t1"}},
                {"Processed": {"Name": "b.jpg", "Size": 20, "URL": "u2", "Timestamp": "t2"}}
            ]"#,
        )
        .unwrap();
        let text = render_tables(&FileTables::from_records(&records));

        let raw_at = text.find("=== Raw files (1) ===").unwrap();
        let processed_at = text.find("=== Processed files (1) ===").unwrap();
        let a_at = text.find("a.jpg").unwrap();
        let b_at = text.find("b.jpg").unwrap();

        assert!(raw_at < a_at && a_at < processed_at);
        assert!(processed_at < b_at);
        assert!(text.contains("10 bytes"));
        assert!(text.contains("20 bytes"));
    }

    #[test]
    fn render_tables_empty() {
        let text = render_tables(&FileTables::new());
        assert_eq!(text.matches("No files.").count(), 2);
    }
}
