//! PUT integration tests.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn put_creates_then_replaces() {
    let server = TestServer::new();

    TestRequest::put("/share/notes/c.md")
        .basic_auth("alice", "secret")
        .body("first")
        .send(&server.service)
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(server.read("/notes/c.md").as_deref(), Some("first"));

    TestRequest::put("/share/notes/c.md")
        .basic_auth("alice", "secret")
        .body("second")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(server.read("/notes/c.md").as_deref(), Some("second"));
}

#[test_log::test(tokio::test)]
async fn put_without_write_is_forbidden() {
    let server = TestServer::new();

    TestRequest::put("/share/public/new.txt")
        .basic_auth("bob", "hunter2")
        .body("nope")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(!server.exists("/public/new.txt"));
}

#[test_log::test(tokio::test)]
async fn put_does_not_touch_read_only_file() {
    let server = TestServer::new();

    TestRequest::put("/share/public/readme.txt")
        .basic_auth("bob", "hunter2")
        .body("defaced")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(server.read("/public/readme.txt").as_deref(), Some("hello"));
}

#[test_log::test(tokio::test)]
async fn put_into_missing_directory_conflicts() {
    let server = TestServer::new();

    TestRequest::put("/share/notes/missing/c.md")
        .basic_auth("alice", "secret")
        .body("orphan")
        .send(&server.service)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn put_excluded_extension_is_forbidden() {
    let server = TestServer::new();

    TestRequest::put("/share/notes/secret.key")
        .basic_auth("alice", "secret")
        .body("k")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(!server.exists("/notes/secret.key"));
}
