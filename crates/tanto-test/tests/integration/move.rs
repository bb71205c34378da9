//! MOVE integration tests.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn move_to_new_name_creates() {
    let server = TestServer::new();

    TestRequest::r#move("/share/notes/a.md")
        .basic_auth("alice", "secret")
        .destination("http://127.0.0.1:5800/share/notes/c.md")
        .send(&server.service)
        .await
        .assert_status(StatusCode::CREATED);

    assert!(!server.exists("/notes/a.md"));
    assert_eq!(server.read("/notes/c.md").as_deref(), Some("note a"));
}

#[test_log::test(tokio::test)]
async fn move_over_existing_file_replaces() {
    let server = TestServer::new();

    TestRequest::r#move("/share/notes/a.md")
        .basic_auth("alice", "secret")
        .destination("/share/notes/b.md")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(server.read("/notes/b.md").as_deref(), Some("note a"));
}

#[test_log::test(tokio::test)]
async fn move_without_destination_is_bad_request() {
    let server = TestServer::new();

    TestRequest::r#move("/share/notes/a.md")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(server.exists("/notes/a.md"));
}

#[test_log::test(tokio::test)]
async fn move_to_other_prefix_is_bad_request() {
    let server = TestServer::new();

    TestRequest::r#move("/share/notes/a.md")
        .basic_auth("alice", "secret")
        .destination("/other/notes/a.md")
        .send(&server.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn move_requires_rename_on_destination() {
    let server = TestServer::new();

    TestRequest::r#move("/share/notes/a.md")
        .basic_auth("alice", "secret")
        .destination("/share/public/a.txt")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(server.exists("/notes/a.md"));
    assert!(!server.exists("/public/a.txt"));
}

#[test_log::test(tokio::test)]
async fn move_requires_rename_on_source() {
    let server = TestServer::new();

    TestRequest::r#move("/share/public/readme.txt")
        .basic_auth("alice", "secret")
        .destination("/share/notes/readme.md")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(server.exists("/public/readme.txt"));
}
