//! MKCOL integration tests.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn mkcol_creates_directory_once() {
    let server = TestServer::new();

    TestRequest::mkcol("/share/notes/sub")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::CREATED);
    assert!(server.path("/notes/sub").is_dir());

    TestRequest::mkcol("/share/notes/sub")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[test_log::test(tokio::test)]
async fn mkcol_with_missing_parent_conflicts() {
    let server = TestServer::new();

    TestRequest::mkcol("/share/notes/x/y")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::CONFLICT);

    assert!(!server.exists("/notes/x"));
}

#[test_log::test(tokio::test)]
async fn mkcol_without_permission_is_forbidden() {
    let server = TestServer::new();

    TestRequest::mkcol("/share/public/dir")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(!server.exists("/public/dir"));
}
