//! `ApiClient` against a one-shot HTTP server on a local socket.
//!
//! Each test serves a canned raw response and inspects the request the
//! client sent.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use incidents_tui::api::{
    ApiClient, ApiError, IncidentApi, IncidentId, ListQuery, NewIncident, Status,
};

/// Raw HTTP/1.1 response with a content length and `Connection: close`.
fn response(status_line: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        content_type,
        body.len(),
        body
    )
}

fn json(status_line: &str, body: &str) -> String {
    response(status_line, "application/json", body)
}

/// Accept one connection, answer it with `raw`, and hand back the request.
async fn serve_once(raw: String) -> (ApiClient, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(raw.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    let client = ApiClient::new(
        &format!("http://{}/api/incidents/", addr),
        Duration::from_secs(5),
    )
    .unwrap();
    (client, server)
}

/// Read the request head and as much body as `content-length` announces.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let body_len = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn request_line(request: &str) -> &str {
    request.lines().next().unwrap_or_default()
}

// ========== List ==========

#[tokio::test]
async fn list_sends_filter_page_and_size() {
    let body = r#"{"count":7,"next":null,"previous":"http://h/?page=1","results":[
        {"id":6,"title":"Gas leak","location":"Elm St","status":"open"}]}"#;
    let (client, server) = serve_once(json("200 OK", body)).await;

    let page = client
        .list(&ListQuery {
            status: Some(Status::Open),
            page: 2,
            page_size: Some(5),
        })
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(
        request_line(&request),
        "GET /api/incidents/?status=open&page=2&page_size=5 HTTP/1.1"
    );
    assert_eq!(page.count, 7);
    assert_eq!(page.items[0].id, IncidentId::Number(6));
    assert!(page.previous.is_some());
}

#[tokio::test]
async fn list_accepts_bare_array() {
    let body = r#"[{"id":"inc-1","title":"a","location":"b","status":"resolved"}]"#;
    let (client, server) = serve_once(json("200 OK", body)).await;

    let page = client
        .list(&ListQuery {
            status: None,
            page: 1,
            page_size: None,
        })
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(request_line(&request), "GET /api/incidents/?page=1 HTTP/1.1");
    assert_eq!(page.count, 1);
    assert_eq!(page.next, None);
}

// ========== Error bodies ==========

#[tokio::test]
async fn html_error_page_becomes_empty_body() {
    let raw = response(
        "500 Internal Server Error",
        "text/html",
        "<html><body>Server Error</body></html>",
    );
    let (client, server) = serve_once(raw).await;

    let err = client.delete(&IncidentId::Number(3)).await.unwrap_err();
    let request = server.await.unwrap();

    assert_eq!(request_line(&request), "DELETE /api/incidents/3/ HTTP/1.1");
    match err {
        ApiError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, serde_json::json!({}));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn json_error_body_is_kept() {
    let body = r#"{"title":["This field may not be blank."]}"#;
    let (client, _server) = serve_once(json("400 Bad Request", body)).await;

    let err = client
        .create(&NewIncident {
            title: " ".to_string(),
            location: "Dock 4".to_string(),
            status: Status::Open,
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body["title"][0], "This field may not be blank.");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

// ========== PATCH bodies ==========

#[tokio::test]
async fn patch_sends_status_and_reads_echo() {
    let body = r#"{"id":7,"status":"in_progress"}"#;
    let (client, server) = serve_once(json("200 OK", body)).await;

    let echo = client
        .update_status(&IncidentId::Number(7), Status::InProgress)
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("PATCH /api/incidents/7/ HTTP/1.1"));
    assert!(request.ends_with(r#"{"status":"in_progress"}"#));
    assert_eq!(echo.and_then(|p| p.status), Some(Status::InProgress));
}

#[tokio::test]
async fn patch_no_content_has_no_echo() {
    let raw = "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string();
    let (client, _server) = serve_once(raw).await;

    let echo = client
        .update_status(&IncidentId::Number(7), Status::Resolved)
        .await
        .unwrap();
    assert_eq!(echo, None);
}

#[tokio::test]
async fn patch_whitespace_body_has_no_echo() {
    let (client, _server) = serve_once(json("200 OK", "  \n")).await;

    let echo = client
        .update_status(&IncidentId::Number(7), Status::Resolved)
        .await
        .unwrap();
    assert_eq!(echo, None);
}

#[tokio::test]
async fn patch_unparseable_body_has_no_echo() {
    let (client, _server) = serve_once(response("200 OK", "text/plain", "updated")).await;

    let echo = client
        .update_status(&IncidentId::Number(7), Status::Resolved)
        .await
        .unwrap();
    assert_eq!(echo, None);
}

// ========== Transport ==========

#[tokio::test]
async fn closed_port_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(
        &format!("http://{}/api/incidents/", addr),
        Duration::from_secs(5),
    )
    .unwrap();
    let err = client.delete(&IncidentId::Number(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
