//! GET and HEAD integration tests.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn get_serves_file_content() {
    let server = TestServer::new();

    let response = TestRequest::get("/share/public/readme.txt")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "application/octet-stream");

    assert_eq!(response.body_string(), "hello");
}

#[test_log::test(tokio::test)]
async fn get_without_credentials_is_challenged() {
    let server = TestServer::new();

    TestRequest::get("/share/public/readme.txt")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_header("www-authenticate", "Basic realm=\"tanto\"");
}

#[test_log::test(tokio::test)]
async fn get_outside_scope_is_forbidden() {
    let server = TestServer::new();

    TestRequest::get("/share/private/diary.md")
        .basic_auth("alice", "secret")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .assert_body_not_contains("dear diary");
}

#[test_log::test(tokio::test)]
async fn get_missing_file_is_not_found() {
    let server = TestServer::new();

    TestRequest::get("/share/public/missing.txt")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn get_directory_lists_visible_entries() {
    let server = TestServer::new();

    TestRequest::get("/share/")
        .basic_auth("carol", "opensesame")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("content-type", "text/plain")
        .assert_body_contains("public/")
        .assert_body_contains("notes/")
        .assert_body_not_contains("private");
}

#[test_log::test(tokio::test)]
async fn get_listing_hides_files_outside_scope() {
    let server = TestServer::new();

    // bob reads /public, but nothing at the root is in his scope
    let response = TestRequest::get("/share/public")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);

    let body = response.body_string();
    assert!(body.contains("readme.txt"));
    assert!(body.contains("todo.md"));

    TestRequest::get("/share/")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn head_reports_length_without_body() {
    let server = TestServer::new();

    TestRequest::head("/share/public/readme.txt")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("content-length", "5")
        .assert_body_empty();
}

#[test_log::test(tokio::test)]
async fn get_outside_any_library_is_not_found() {
    let server = TestServer::new();

    TestRequest::get("/elsewhere/readme.txt")
        .basic_auth("bob", "hunter2")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
