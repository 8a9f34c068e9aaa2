use inference_ui::client::{InferenceTransport, ServiceClient};
use inference_ui::error::{CallError, ErrorKind};
use inference_ui::http::{read_request, HttpRequest, ReadOutcome};
use inference_ui::models::CallOutcome;
use serde_json::json;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one connection with a canned response and hands back the
/// request it received.
async fn one_shot_upstream(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<HttpRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/classify", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        if let Ok(ReadOutcome::Complete(bytes)) = read_request(&mut stream).await {
            let _ = tx.send(HttpRequest::parse(&bytes).unwrap());
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
    });

    (url, rx)
}

#[tokio::test]
async fn test_success_returns_body_and_sends_json() {
    let (url, received) = one_shot_upstream("200 OK", r#"{"intent":"book_flight","entities":{"date":"mañana"}}"#).await;
    let client = ServiceClient::new().unwrap();
    let payload = json!({"user_input": "Hola", "intents": {"a": ""}, "entities": {}});

    let outcome = client.call(&url, &payload, Duration::from_secs(5)).await;
    assert_eq!(
        outcome,
        CallOutcome::Success(json!({"intent": "book_flight", "entities": {"date": "mañana"}}))
    );

    let request = received.await.unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/classify");
    assert_eq!(request.headers.get("content-type").unwrap(), "application/json");
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(sent, payload);
}

#[tokio::test]
async fn test_error_status_is_unexpected() {
    let (url, _received) = one_shot_upstream("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    let client = ServiceClient::new().unwrap();

    match client.call(&url, &json!({}), Duration::from_secs(5)).await {
        CallOutcome::Failure(err) => {
            assert_eq!(err.kind(), ErrorKind::Unexpected);
            let message = err.to_string();
            assert!(message.starts_with("Error inesperado: "));
            assert!(message.contains("500"), "message was {}", message);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_unexpected() {
    let (url, _received) = one_shot_upstream("200 OK", "<html>not json</html>").await;
    let client = ServiceClient::new().unwrap();

    match client.call(&url, &json!({}), Duration::from_secs(5)).await {
        CallOutcome::Failure(CallError::Unexpected(_)) => {}
        other => panic!("expected unexpected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/query", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let client = ServiceClient::new().unwrap();
    let outcome = client.call(&url, &json!({}), Duration::from_millis(200)).await;

    assert_eq!(outcome, CallOutcome::Failure(CallError::Timeout));
    if let CallOutcome::Failure(err) = outcome {
        assert_eq!(err.to_string(), "⏳ Tiempo de espera agotado, intenta de nuevo.");
    }
}

#[tokio::test]
async fn test_refused_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ServiceClient::new().unwrap();
    let outcome = client
        .call(&format!("http://{}/classify", addr), &json!({}), Duration::from_secs(5))
        .await;

    assert_eq!(outcome, CallOutcome::Failure(CallError::Connection));
}
