//! Runs the compiled binary with an incomplete environment.
//!
//! All API base URLs point at a mock server, so any request the binary makes
//! before giving up would be recorded there.

use std::process::Command;

use wiremock::MockServer;

const SECRETS: [(&str, &str); 5] = [
    ("GEMINI_API_KEY", "gemini-key"),
    ("GNEWS_API_KEY", "gnews-key"),
    ("PEXELS_API_KEY", "pexels-key"),
    ("FACEBOOK_PAGE_ID", "1234567890"),
    ("FACEBOOK_ACCESS_TOKEN", "page-token"),
];

fn command_without(server: &MockServer, missing: &str) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dailypost"));
    command.env_clear();
    for (name, value) in SECRETS {
        if name != missing {
            command.env(name, value);
        }
    }
    for name in [
        "GNEWS_BASE_URL",
        "PEXELS_BASE_URL",
        "GEMINI_BASE_URL",
        "GRAPH_BASE_URL",
    ] {
        command.env(name, server.uri());
    }
    command
}

#[tokio::test]
async fn test_missing_secret_exits_with_code_1_without_requests() {
    let server = MockServer::start().await;

    for (missing, _) in SECRETS {
        let output = command_without(&server, missing)
            .output()
            .expect("failed to run binary");

        assert_eq!(output.status.code(), Some(1), "missing {}", missing);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains(missing),
            "diagnostic should name {}: {}",
            missing,
            stderr
        );
    }

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "unexpected requests: {:?}", requests);
}

#[tokio::test]
async fn test_invalid_publish_mode_exits_with_code_1() {
    let server = MockServer::start().await;

    let output = command_without(&server, "")
        .env("PUBLISH_MODE", "story")
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_secret_is_reported_with_logging_off() {
    let server = MockServer::start().await;

    let output = command_without(&server, "FACEBOOK_PAGE_ID")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FACEBOOK_PAGE_ID"), "stderr: {}", stderr);
    assert!(server.received_requests().await.unwrap().is_empty());
}
