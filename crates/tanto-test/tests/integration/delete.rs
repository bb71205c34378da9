//! DELETE integration tests.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn delete_removes_file() {
    let server = TestServer::new();

    TestRequest::delete("/share/public/todo.md")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(!server.exists("/public/todo.md"));
}

#[test_log::test(tokio::test)]
async fn delete_removes_directory_tree() {
    let server = TestServer::new();

    TestRequest::delete("/share/notes")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(!server.exists("/notes"));
}

#[test_log::test(tokio::test)]
async fn delete_without_permission_is_forbidden() {
    let server = TestServer::new();

    TestRequest::delete("/share/public/readme.txt")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(server.exists("/public/readme.txt"));
}

#[test_log::test(tokio::test)]
async fn delete_missing_file_is_not_found() {
    let server = TestServer::new();

    TestRequest::delete("/share/notes/zzz.md")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
