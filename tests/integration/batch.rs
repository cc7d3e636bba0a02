//! Integration tests for batch requests

use crate::integration::mock_server::MockServerFixture;
use graph_sdk_rust::{Error, Method};
use serde_json::json;

fn batch_response_body() -> String {
    json!([
        {
            "code": 200,
            "headers": [{"name": "Content-Type", "value": "text/javascript; charset=UTF-8"}],
            "body": "{\"id\":\"4\",\"name\":\"Mark\"}"
        },
        {
            "code": 200,
            "headers": [],
            "body": "{\"data\":[]}"
        }
    ])
    .to_string()
}

#[tokio::test]
async fn test_batch_round_trip_preserves_names() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_form_post(
            "/v2.5/",
            "batch_token",
            vec![
                "batch=%5B",
                "%22name%22%3A%22user%22",
                "%22name%22%3A%22feed%22",
                "include_headers=true",
            ],
            &batch_response_body(),
        )
        .await;

    let fb = fixture.create_facebook(Some("batch_token")).unwrap();
    let mut batch = fb.batch_request();
    batch.add_named(fb.request(Method::Get, "me"), "user").unwrap();
    batch
        .add_named(fb.request(Method::Get, "me/feed"), "feed")
        .unwrap();

    let responses = fb.send_batch(&mut batch).await.unwrap();
    mock.assert_async().await;

    assert_eq!(responses.len(), 2);
    let user = responses.get("user").unwrap();
    assert_eq!(user.status, Some(200));
    assert_eq!(user.body.as_ref().unwrap()["name"], "Mark");
    assert_eq!(
        user.header("Content-Type"),
        Some("text/javascript; charset=UTF-8")
    );
    assert_eq!(
        responses.get("feed").unwrap().body,
        Some(json!({"data": []}))
    );
}

#[tokio::test]
async fn test_send_batch_request_names_sequence_by_position() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_form_post(
            "/v2.5/",
            "batch_token",
            vec!["%22name%22%3A%220%22", "%22name%22%3A%221%22"],
            &batch_response_body(),
        )
        .await;

    let fb = fixture.create_facebook(Some("batch_token")).unwrap();
    let requests = vec![fb.request(Method::Get, "me"), fb.request(Method::Get, "me/feed")];
    let responses = fb.send_batch_request(requests, None, None).await.unwrap();

    mock.assert_async().await;
    let names: Vec<_> = responses.iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec![Some("0".to_string()), Some("1".to_string())]);
}

#[tokio::test]
async fn test_empty_batch_is_rejected_before_sending() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await
    };

    let fb = fixture.create_facebook(Some("batch_token")).unwrap();
    let mut batch = fb.batch_request();
    let err = fb.send_batch(&mut batch).await.unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_oversized_batch_is_rejected_before_sending() {
    let fixture = MockServerFixture::new().await;
    let fb = fixture.create_facebook(Some("batch_token")).unwrap();
    let requests: Vec<_> = (0..51)
        .map(|i| fb.request(Method::Get, format!("{}", i)))
        .collect();

    let err = fb
        .send_batch_request(requests, None, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("limit of requests in batch is 50"));
}
