// tests/session_login_test.rs

mod common;

use common::*;
use learn_dl::{error::AppError, workflows::fetch_courses};
use mockito::Matcher;

#[tokio::test(flavor = "multi_thread")]
async fn test_login_posts_token_and_keeps_session_cookie() {
    let mut server = mockito::Server::new_async().await;
    let mocks = mock_login(&mut server, "alice", "s3cret").await;
    let context = context_for(&server.url(), false);

    context.session.login("alice", "s3cret").await.expect("login should succeed");

    // the landing page is now served with the session cookie
    let courses = fetch_courses(&context).await.unwrap();
    assert_eq!(courses.keys().collect::<Vec<_>>(), vec!["COSC121", "MATH102"]);
    assert_eq!(courses["COSC121"].id, "1234");
    assert_eq!(courses["MATH102"].name, "MATH102 Calculus");

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_carry_configured_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/ping")
        .match_header("user-agent", "test-agent/1.0")
        .with_header("content-type", HTML)
        .with_body("pong")
        .create_async()
        .await;
    let context = context_for(&server.url(), false);

    assert_eq!(context.session.fetch_text("/ping").await.unwrap(), "pong");
    mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_credentials_are_authentication_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_header("content-type", HTML)
        .with_body(LOGIN_PAGE)
        .create_async()
        .await;
    server
        .mock("POST", "/login/index.php")
        .with_header("content-type", HTML)
        .with_body(REJECTED_PAGE)
        .create_async()
        .await;
    let context = context_for(&server.url(), false);

    let result = context.session.login("alice", "wrong").await;
    assert!(matches!(result, Err(AppError::Authentication(_))), "got {:?}", result);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_login_token_is_authentication_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_header("content-type", HTML)
        .with_body("<html><body>Scheduled maintenance</body></html>")
        .create_async()
        .await;
    let login_post = server
        .mock("POST", "/login/index.php")
        .expect(0)
        .create_async()
        .await;
    let context = context_for(&server.url(), false);

    let result = context.session.login("alice", "s3cret").await;
    assert!(matches!(result, Err(AppError::Authentication(_))), "got {:?}", result);
    login_post.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_text_without_charset_decodes_as_latin1() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/legacy")
        .with_header("content-type", "text/html")
        .with_body(vec![b'c', b'a', b'f', 0xE9])
        .create_async()
        .await;
    let context = context_for(&server.url(), false);

    assert_eq!(context.session.fetch_text("/legacy").await.unwrap(), "café");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_undecodable_page_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/broken")
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(vec![0x66, 0xFF, 0xFE])
        .create_async()
        .await;
    let context = context_for(&server.url(), false);

    match context.session.fetch_text("/broken").await {
        Err(AppError::Decode { url, encoding }) => {
            assert!(url.ends_with("/broken"));
            assert_eq!(encoding, "utf-8");
        }
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_headers_reads_type_and_disposition() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", path("/pluginfile.php/7/"))
        .with_header("content-type", "application/pdf")
        .with_header("content-disposition", r#"inline; filename="Week%203%20Slides.pdf""#)
        .with_body("%PDF-1.4")
        .create_async()
        .await;
    let context = context_for(&server.url(), false);

    let meta = context
        .session
        .fetch_headers("/pluginfile.php/7/Week%203.pdf")
        .await
        .unwrap();
    assert_eq!(meta.media_type.as_deref(), Some("application/pdf"));
    assert_eq!(meta.suggested_name.as_deref(), Some("Week%203%20Slides"));
    assert!(!meta.is_html());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_error_status_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    let context = context_for(&server.url(), false);

    let result = context.session.fetch_text("/course/resources.php?id=1").await;
    assert!(matches!(result, Err(AppError::Network(_))), "got {:?}", result);
}
