//! OPTIONS integration tests.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn options_answers_without_credentials() {
    let server = TestServer::new();

    TestRequest::options("/share/public/readme.txt")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("allow", "MKCOL")
        .assert_header_contains("allow", "MOVE")
        .assert_header("dav", "1");
}

#[test_log::test(tokio::test)]
async fn options_does_not_count_as_failure() {
    let server = TestServer::new();

    for _ in 0..10 {
        let _response = TestRequest::options("/share/")
            .from_ip("10.9.0.1")
            .send(&server.service)
            .await
            .assert_status(StatusCode::OK);
    }

    assert_eq!(server.state.gate.guard().tracked_addresses(), 0);

    TestRequest::get("/share/public/readme.txt")
        .basic_auth("bob", "hunter2")
        .from_ip("10.9.0.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
}
