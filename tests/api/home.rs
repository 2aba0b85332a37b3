use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use hello_server::routes::GREETING;

use crate::helpers::App;

#[tokio::test]
async fn home_responds_with_hello_world() {
    let app = App::new().await;

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), GREETING);
}

#[tokio::test]
async fn home_body_is_plain_text_without_trailing_newline() {
    let app = App::new().await;

    let response = app.get("/").await;

    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(response.content_length(), Some(GREETING.len() as u64));
    assert_eq!(&response.bytes().await.unwrap()[..], GREETING.as_bytes());
}

#[tokio::test]
async fn home_is_idempotent() {
    let app = App::new().await;

    for _ in 0..5 {
        let response = app.get("/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), GREETING);
    }
}
