//! Authentication and ban integration tests.
//!
//! The ban policy in [`test_config`] allows five failures per address and
//! per username; the sixth attempt is refused even with valid credentials.

use salvo::http::StatusCode;

use super::helpers::*;

const README: &str = "/share/public/readme.txt";

#[test_log::test(tokio::test)]
async fn wrong_password_then_right_password() {
    let server = TestServer::new();

    TestRequest::get(README)
        .basic_auth("bob", "wrong")
        .from_ip("10.0.0.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_header("www-authenticate", "Basic realm=\"tanto\"");

    TestRequest::get(README)
        .basic_auth("bob", "hunter2")
        .from_ip("10.0.0.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn unknown_user_is_rejected() {
    let server = TestServer::new();

    TestRequest::get(README)
        .basic_auth("mallory", "hunter2")
        .from_ip("10.0.0.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn malformed_authorization_is_rejected() {
    let server = TestServer::new();

    TestRequest::get(README)
        .header("authorization", "Basic !!!not-base64")
        .from_ip("10.0.0.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::get(README)
        .header("authorization", "Bearer abc")
        .from_ip("10.0.0.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn address_is_banned_after_repeated_failures() {
    let server = TestServer::new();

    for n in 1..=5 {
        TestRequest::get(README)
            .basic_auth(&format!("mallory{n}"), "guess")
            .from_ip("10.0.0.7")
            .send(&server.service)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    // valid credentials from the banned address
    TestRequest::get(README)
        .basic_auth("alice", "secret")
        .from_ip("10.0.0.7")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::get(README)
        .basic_auth("alice", "secret")
        .from_ip("10.0.0.8")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn username_is_banned_across_addresses() {
    let server = TestServer::new();

    for n in 1..=5 {
        TestRequest::get(README)
            .basic_auth("bob", "guess")
            .from_ip(&format!("10.0.1.{n}"))
            .send(&server.service)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    TestRequest::get(README)
        .basic_auth("bob", "hunter2")
        .from_ip("10.0.1.6")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // other users from a fresh address are unaffected
    TestRequest::get(README)
        .basic_auth("alice", "secret")
        .from_ip("10.0.1.7")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn success_clears_failure_history() {
    let server = TestServer::new();

    for _ in 0..2 {
        TestRequest::get(README)
            .basic_auth("alice", "wrong")
            .from_ip("10.0.2.1")
            .send(&server.service)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
    assert_eq!(server.state.gate.guard().tracked_addresses(), 1);
    assert_eq!(server.state.gate.guard().tracked_usernames(), 1);

    TestRequest::get(README)
        .basic_auth("alice", "secret")
        .from_ip("10.0.2.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(server.state.gate.guard().tracked_addresses(), 0);
    assert_eq!(server.state.gate.guard().tracked_usernames(), 0);
}

#[test_log::test(tokio::test)]
async fn missing_credentials_only_count_against_address() {
    let server = TestServer::new();

    for _ in 0..5 {
        TestRequest::get(README)
            .from_ip("10.0.3.1")
            .send(&server.service)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
    assert_eq!(server.state.gate.guard().tracked_usernames(), 0);

    TestRequest::get(README)
        .basic_auth("bob", "hunter2")
        .from_ip("10.0.3.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn oversized_credentials_are_rejected() {
    let server = TestServer::new();
    let long = "x".repeat(300);

    TestRequest::get(README)
        .basic_auth(&long, "hunter2")
        .from_ip("10.0.4.1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(server.state.gate.guard().tracked_usernames(), 0);
    assert_eq!(server.state.gate.guard().tracked_addresses(), 1);
}
