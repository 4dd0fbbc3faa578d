//! Shared fixtures for flow tests against a mockito server.

#![allow(dead_code)]

use s3etl_api_client::Session;
use s3etl_core::{ClientConfig, MemoryStore, RecordingNotifier, RecordingSubmitControl};
use std::sync::Arc;
use std::time::Duration;

pub const AUTHORIZATION: &str = s3etl_core::constants::PLACEHOLDER_AUTHORIZATION;

pub struct Harness {
    pub session: Session<MemoryStore>,
    pub notifier: RecordingNotifier,
    pub control: RecordingSubmitControl,
}

/// Config whose discovery base is the mock server.
pub fn config_for(server: &mockito::Server) -> ClientConfig {
    ClientConfig {
        origin: Some(server.url()),
        authorization: Some(AUTHORIZATION.to_string()),
        http_timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    }
}

pub fn harness(server: &mockito::Server, store: MemoryStore) -> Harness {
    let notifier = RecordingNotifier::new();
    let control = RecordingSubmitControl::new();
    let session = Session::new(
        &config_for(server),
        store,
        Arc::new(notifier.clone()),
        Arc::new(control.clone()),
    )
    .expect("session");
    Harness {
        session,
        notifier,
        control,
    }
}

pub fn function_urls_body(url: &str) -> String {
    serde_json::json!({
        "FunctionUrlConfigs": [
            {
                "FunctionUrl": url,
                "FunctionArn": "arn:aws:lambda:us-east-1:000000000000:function:x",
                "AuthType": "NONE"
            }
        ]
    })
    .to_string()
}

pub fn presigned_post_body(server: &mockito::Server, key: &str) -> String {
    serde_json::json!({
        "url": format!("{}/raw-bucket", server.url()),
        "fields": {
            "key": key,
            "AWSAccessKeyId": "test",
            "policy": "eyJleHBpcmF0aW9uIjogIjIwMjMtMTAtMDRUMDA6MDA6MDBaIn0=",
            "signature": "c2lnbmF0dXJl"
        }
    })
    .to_string()
}

pub const LIST_BODY: &str = r#"[
    {"Raw": {"Name": "a.jpg", "Original": {"Size": 10, "URL": "u1"}, "Timestamp": "t1"}},
    {"Processed": {"Name": "b.jpg", "Size": 20, "URL": "u2", "Timestamp": "t2"}}
]"#;
