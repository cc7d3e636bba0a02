//! Integration tests for single Graph requests

use crate::integration::mock_server::{MockServerFixture, TEST_VERSION};
use graph_sdk_rust::{Error, Method, RequestOptions};

#[tokio::test]
async fn test_get_sends_params_and_token_in_query() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "GET",
            "/v2.5/me",
            vec![("fields", "id,name"), ("access_token", "user_token")],
            200,
            r#"{"id":"4","name":"Mark"}"#,
        )
        .await;

    let fb = fixture.create_facebook(Some("user_token")).unwrap();
    let response = fb
        .get("me", RequestOptions::new().param("fields", "id,name"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.request_url, format!("/{}/me", TEST_VERSION));
    assert_eq!(response.body["name"], "Mark");
}

#[tokio::test]
async fn test_post_sends_form_body() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_form_post(
            "/v2.5/me/feed",
            "user_token",
            vec!["message=hello+world"],
            r#"{"id":"4_1"}"#,
        )
        .await;

    let fb = fixture.create_facebook(Some("user_token")).unwrap();
    let response = fb
        .post("me/feed", RequestOptions::new().param("message", "hello world"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.body["id"], "4_1");
}

#[tokio::test]
async fn test_delete_with_explicit_token() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "DELETE",
            "/v2.5/4_1",
            vec![("access_token", "other_token")],
            200,
            r#"{"success":true}"#,
        )
        .await;

    let fb = fixture.create_facebook(Some("user_token")).unwrap();
    let response = fb
        .delete("4_1", RequestOptions::new().access_token("other_token"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_send_prebuilt_request_with_headers() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("GET", "/v2.5/me")
            .match_query(mockito::Matcher::Any)
            .match_header("x-custom", "yes")
            .with_status(200)
            .with_body(r#"{"id":"4"}"#)
            .create_async()
            .await
    };

    let fb = fixture.create_facebook(Some("user_token")).unwrap();
    let mut request = fb.request(Method::Get, "me");
    request.add_headers([("X-Custom", "no"), ("X-Custom", "yes")]);
    fb.send_facebook_request(&request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_graph_error_envelope() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v2.5/me",
            vec![("access_token", "expired")],
            400,
            r#"{"error":{"message":"Error validating access token","type":"OAuthException","code":190,"error_subcode":463,"fbtrace_id":"AbC"}}"#,
        )
        .await;

    let fb = fixture.create_facebook(Some("expired")).unwrap();
    let err = fb.get("me", RequestOptions::new()).await.unwrap_err();

    match err {
        Error::Remote {
            status,
            code,
            subcode,
            error_type,
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(190));
            assert_eq!(subcode, Some(463));
            assert_eq!(error_type.as_deref(), Some("OAuthException"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}
