use melt::{dispatch, Cli, MeltError, Outcome};
use mockito::Matcher;
use serde_json::json;
use std::fs::write;
use tempfile::tempdir;

#[tokio::test]
async fn dispatch_publishes_and_returns_link() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/documents/custom/notes")
        .match_body("standup\n- shipped")
        .with_body(r#"{"key":"notes","ok":true}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let conf = dir.path().join(".melt");
    write(&conf, json!({"MeltHost": server.url()}).to_string()).unwrap();

    let cli = Cli {
        conf: Some(conf),
        key: "notes".to_string(),
        head: "standup".to_string(),
        ..Cli::default()
    };
    let outcome = dispatch(cli, &b"- shipped"[..]).await.expect("dispatch should succeed");

    assert_eq!(outcome, Outcome::Published(format!("{}/notes", server.url())));
}

/// The raw input reaches the room once even though stdin can only be read once.
#[tokio::test]
async fn dispatch_notifies_with_raw_input() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/room/team/notification")
        .match_query(Matcher::UrlEncoded("auth_token".into(), "abc".into()))
        .match_body(Matcher::PartialJson(json!({"message": "disk usage\n/dev/sda1 91%"})))
        .with_body(r#"{"status":"sent"}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let conf = dir.path().join(".melt");
    write(
        &conf,
        json!({"MeltHost": "http://127.0.0.1:1", "HipChatHost": server.url(), "HipChatToken": "abc"})
            .to_string(),
    )
    .unwrap();

    let cli = Cli {
        conf: Some(conf),
        head: "disk usage".to_string(),
        hip: true,
        room: Some("team".to_string()),
        ..Cli::default()
    };
    let outcome = dispatch(cli, &b"/dev/sda1 91%"[..]).await.expect("dispatch should succeed");

    match outcome {
        Outcome::Notified(response) => assert_eq!(response.get("status"), Some(&json!("sent"))),
        other => panic!("Expected a chat response, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn dispatch_requires_room_in_chat_mode() {
    let dir = tempdir().unwrap();
    let cli = Cli {
        conf: Some(dir.path().join(".melt")),
        hip: true,
        room: Some(String::new()),
        ..Cli::default()
    };

    let err = dispatch(cli, &b"unused"[..]).await.unwrap_err();
    assert!(matches!(err, MeltError::MissingRoom));
    assert_eq!(err.to_string(), "HipChat: No room specified");
}

#[tokio::test]
async fn dispatch_surfaces_config_errors() {
    let dir = tempdir().unwrap();
    let conf = dir.path().join(".melt");
    write(&conf, "{ broken").unwrap();

    let cli = Cli {
        conf: Some(conf),
        ..Cli::default()
    };
    let err = dispatch(cli, &b""[..]).await.unwrap_err();
    assert!(matches!(err, MeltError::ConfigParse { .. }), "got: {err}");
}
