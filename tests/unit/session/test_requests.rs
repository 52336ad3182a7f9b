use crate::common::{BASIC_AUTH, create_test_session};
use mockito::Server;
use rcm_nexus::prelude::*;
use tokio_test::block_on;

#[tokio::test]
async fn test_get_returns_body_on_expected_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/service/local/status")
        .match_header("accept", "application/xml")
        .match_header("content-type", "application/xml")
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body("<status><version>2.14.5</version></status>")
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let reply = session.get("/service/local/status").await.unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body(), Some("<status><version>2.14.5</version></status>"));
    assert!(!reply.is_failure());
    assert_eq!(reply.url, format!("{}/service/local/status", server.url()));
    assert!(diagnostics.contents().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_sends_body_and_expects_created() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/service/local/staging/profiles/abc/start")
        .match_body("<promoteRequest/>")
        .with_status(201)
        .with_body("<promoteResponse/>")
        .create_async()
        .await;

    let (session, _) = create_test_session(&server.url());
    let reply = session
        .post("service/local/staging/profiles/abc/start", "<promoteRequest/>")
        .await
        .unwrap();

    assert_eq!(reply.body(), Some("<promoteResponse/>"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_with_200_fails_by_default() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/service/local/repositories")
        .with_status(200)
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let err = session
        .post("/service/local/repositories", "<repository/>")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(&FailureKind::UnexpectedStatus));
    assert!(
        diagnostics
            .contents()
            .contains("POST /service/local/repositories failed: 200")
    );
}

#[tokio::test]
async fn test_put_with_call_headers_overrides_defaults() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/service/rest/v1/script/promote")
        .match_header("content-type", "application/json")
        .match_header("accept", "application/xml")
        .with_status(204)
        .create_async()
        .await;

    let (session, _) = create_test_session(&server.url());
    let options = RequestOptions::put()
        .header("Content-Type", "application/json")
        .unwrap()
        .expect_status(StatusCode::NO_CONTENT);
    let reply = session
        .put_with("/service/rest/v1/script/promote", r#"{"name":"promote"}"#, options)
        .await
        .unwrap();

    assert_eq!(reply.body(), Some(""));
    assert_eq!(session.headers()["content-type"], "application/xml");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_404_ignored_returns_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/service/local/repositories/missing")
        .with_status(404)
        .with_body("<error>missing</error>")
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let reply = session
        .get_with(
            "/service/local/repositories/missing",
            RequestOptions::get().ignore_404(true),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body(), Some("<error>missing</error>"));
    assert!(diagnostics.contents().is_empty());
}

#[tokio::test]
async fn test_404_not_ignored_fails() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/service/local/repositories/missing")
        .with_status(404)
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let err = session
        .get("/service/local/repositories/missing")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(matches!(err, AppError::Request(_)));
    assert!(
        diagnostics
            .contents()
            .contains("GET /service/local/repositories/missing failed: 404")
    );
}

#[tokio::test]
async fn test_non_fatal_failure_returns_reply_without_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/service/local/status")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let reply = session
        .get_with("/service/local/status", RequestOptions::get().fail(false))
        .await
        .unwrap();

    assert!(reply.body().is_none());
    assert!(reply.is_failure());
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(diagnostics.contents().contains("GET /service/local/status failed: 500"));
}

#[tokio::test]
async fn test_401_prints_credential_hint_with_username() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/service/local/status")
        .with_status(401)
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let reply = session
        .get_with("/service/local/status", RequestOptions::get().fail(false))
        .await
        .unwrap();

    let failure = reply.failure.unwrap();
    assert_eq!(
        failure.kind,
        FailureKind::Unauthorized {
            username: Some("deployer".to_string())
        }
    );
    let output = diagnostics.contents();
    assert!(output.contains("GET /service/local/status failed: 401"));
    assert!(output.contains("Incorrect credentials for user deployer"));
}

#[tokio::test]
async fn test_403_prints_permissions_hint() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/service/local/repositories/releases")
        .with_status(403)
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let err = session
        .put("/service/local/repositories/releases", "<repository/>")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(&FailureKind::Forbidden));
    assert!(diagnostics.contents().contains(FORBIDDEN_HINT));
}

#[tokio::test]
async fn test_json_error_messages_are_printed() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/service/rest/v1/staging/move")
        .with_status(400)
        .with_header("content-type", "application/json; charset=UTF-8")
        .with_body(r#"{"errors":[{"id":"*","msg":"Repository not found"},{"id":"*","msg":"Bad tag"}]}"#)
        .create_async()
        .await;

    let (session, diagnostics) = create_test_session(&server.url());
    let err = session
        .post("/service/rest/v1/staging/move", "{}")
        .await
        .unwrap_err();

    match err {
        AppError::Request(failure) => {
            assert_eq!(failure.kind, FailureKind::ServerReportedErrors);
            assert_eq!(failure.server_messages, vec!["Repository not found", "Bad tag"]);
        }
        other => panic!("Unexpected error: {:?}", other),
    }
    let output = diagnostics.contents();
    let summary = output.find("failed: 400").unwrap();
    let first = output.find("Repository not found").unwrap();
    let second = output.find("Bad tag").unwrap();
    assert!(summary < first && first < second);
}

#[tokio::test]
async fn test_anonymous_session_sends_no_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/service/local/status")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .create_async()
        .await;

    let session = Session::new(Config::with_url(server.url()), false).unwrap();
    assert!(session.username().is_none());
    session.get("/service/local/status").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_debug_mode_echoes_request_and_response() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/service/local/staging/bulk/close")
        .with_status(201)
        .with_body("<closed/>")
        .create_async()
        .await;

    let diagnostics = crate::common::SharedBuffer::default();
    let config = crate::common::create_test_config(&server.url());
    let session = Session::new(config, true)
        .unwrap()
        .with_diagnostics(diagnostics.clone());
    session
        .post("/service/local/staging/bulk/close", "<stagingActionRequest/>")
        .await
        .unwrap();

    let output = diagnostics.contents();
    assert!(output.contains("POST "));
    assert!(output.contains("Request body:\n<stagingActionRequest/>"));
    assert!(output.contains("<closed/>"));
}

#[test]
fn test_close_consumes_session() {
    let server = Server::new();
    let (session, _) = create_test_session(&server.url());
    assert!(!session.is_debug());
    session.close();
}

#[test]
fn test_blocking_caller_can_drive_request() {
    let mut server = Server::new();
    server
        .mock("GET", "/service/local/status")
        .with_status(200)
        .with_body("ok")
        .create();

    let (session, _) = create_test_session(&server.url());
    let reply = block_on(session.get("/service/local/status")).unwrap();
    assert_eq!(reply.body(), Some("ok"));
}
