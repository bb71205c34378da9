//! Scope evaluation through the HTTP surface.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn extension_rule_reaches_any_directory() {
    let server = TestServer::new();

    // alice's *.md rule applies under /public too
    let response = TestRequest::get("/share/public/todo.md")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.body_string(), "- [ ] ship");

    TestRequest::put("/share/public/todo.md")
        .basic_auth("alice", "secret")
        .body("- [x] ship")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(server.read("/public/todo.md").as_deref(), Some("- [x] ship"));
}

#[test_log::test(tokio::test)]
async fn exclusion_wins_over_inclusion() {
    let server = TestServer::new();

    TestRequest::put("/share/private/diary.md")
        .basic_auth("alice", "secret")
        .body("overwritten")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    assert_eq!(server.read("/private/diary.md").as_deref(), Some("dear diary"));

    TestRequest::get("/share/private/diary.md")
        .basic_auth("carol", "opensesame")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn permission_must_come_from_one_scope() {
    let server = TestServer::new();

    // readme.txt is only reachable through alice's public-read scope
    TestRequest::get("/share/public/readme.txt")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);

    TestRequest::delete("/share/public/readme.txt")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn denied_request_reveals_nothing() {
    let server = TestServer::new();

    // the response is the same whether or not the file exists
    let existing = TestRequest::get("/share/private/diary.md")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    let missing = TestRequest::get("/share/private/nothing.md")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(existing.body, missing.body);
}

#[test_log::test(tokio::test)]
async fn dot_segments_cannot_escape_scope() {
    let server = TestServer::new();

    TestRequest::get("/share/public/../private/diary.md")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn dir_rule_is_a_string_prefix() {
    let server = TestServer::new();
    std::fs::write(server.path("/publicity.txt"), "flyer").expect("seed file");

    // dir:/public also covers siblings that share the prefix
    let response = TestRequest::get("/share/publicity.txt")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.body_string(), "flyer");

    TestRequest::get("/share/pub.txt")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
