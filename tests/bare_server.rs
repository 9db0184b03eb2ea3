use secure_app::bare::BareServer;
use secure_app::domain::GREETING;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

mod common;
use common::TestServer;

/// Write `raw` on a fresh connection and read until the server closes it.
async fn exchange(addr: SocketAddr, raw: &[u8]) -> String {
    // ---
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

#[tokio::test]
async fn get_root_returns_greeting_over_http() {
    // ---
    let server = TestServer::bare().await;

    let response = server.client.get(server.url("/")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(response.text().await.unwrap(), GREETING);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn every_response_closes_the_connection() {
    // ---
    let server = TestServer::bare().await;

    let text = exchange(server.addr, b"GET / HTTP/1.1\r\nHost: test\r\n\r\n").await;

    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"), "{text}");
    assert!(text.contains("Connection: close\r\n"));
    assert!(text.ends_with(GREETING));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn routing_is_explicit() {
    // ---
    let server = TestServer::bare().await;

    let not_found = exchange(server.addr, b"GET /metrics HTTP/1.1\r\n\r\n").await;
    assert!(not_found.starts_with("HTTP/1.1 404 Not Found\r\n"), "{not_found}");

    let not_allowed = exchange(server.addr, b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n").await;
    assert!(not_allowed.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"), "{not_allowed}");
    assert!(not_allowed.contains("Allow: GET, HEAD\r\n"));

    let head = exchange(server.addr, b"HEAD / HTTP/1.1\r\n\r\n").await;
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.ends_with("\r\n\r\n"));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn absolute_form_target_is_routed_by_path() {
    // ---
    let server = TestServer::bare().await;

    let root = exchange(server.addr, b"GET http://localhost:8080/?x=1 HTTP/1.1\r\n\r\n").await;
    assert!(root.starts_with("HTTP/1.1 200 OK\r\n"), "{root}");
    assert!(root.ends_with(GREETING));

    let other = exchange(server.addr, b"GET http://localhost:8080/metrics HTTP/1.1\r\n\r\n").await;
    assert!(other.starts_with("HTTP/1.1 404 Not Found\r\n"), "{other}");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn garbage_gets_bad_request() {
    // ---
    let server = TestServer::bare().await;

    let text = exchange(server.addr, b"hello there\r\n\r\n").await;
    assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{text}");

    let text = exchange(server.addr, b"GET / HTTP/2.0\r\n\r\n").await;
    assert!(text.starts_with("HTTP/1.1 505 "), "{text}");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn closed_connection_does_not_stop_the_loop() {
    // ---
    let server = TestServer::bare().await;

    // Connect and hang up without sending anything.
    drop(TcpStream::connect(server.addr).await.unwrap());

    let text = exchange(server.addr, b"GET / HTTP/1.1\r\n\r\n").await;
    assert!(text.ends_with(GREETING));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn silent_client_times_out() {
    // ---
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = BareServer::from_listener(listener).with_read_timeout(Duration::from_millis(100));
    let addr = server.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let task = tokio::spawn(server.run(async move {
        let _ = rx.await;
    }));

    // Holds the only worker slot without sending a byte.
    let _silent = TcpStream::connect(addr).await.unwrap();

    let text = tokio::time::timeout(
        Duration::from_secs(5),
        exchange(addr, b"GET / HTTP/1.1\r\n\r\n"),
    )
    .await
    .expect("sequential loop stayed blocked on the silent client");
    assert!(text.ends_with(GREETING));

    let _ = tx.send(());
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn bare_server_stops_on_shutdown_signal() {
    // ---
    let server = TestServer::bare().await;
    let addr = server.addr;

    tokio::time::timeout(Duration::from_secs(5), server.stop())
        .await
        .expect("server did not stop in time")
        .unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
