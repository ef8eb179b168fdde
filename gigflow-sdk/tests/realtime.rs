//! Realtime channel tests against a loopback listener.

use std::time::Duration;

use gigflow_sdk::Notification;
use gigflow_sdk::realtime::RealtimeClient;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

async fn listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    (listener, addr)
}

/// Accept one connection and consume the registration frame.
async fn accept_and_read_register(listener: &TcpListener) -> (BufReader<TcpStream>, String) {
    let (stream, _) = timeout(Duration::from_secs(1), listener.accept())
        .await
        .expect("no connection arrived")
        .unwrap();
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    timeout(Duration::from_secs(1), reader.read_line(&mut line))
        .await
        .expect("no registration frame")
        .unwrap();
    (reader, line.trim_end().to_string())
}

#[tokio::test]
async fn activate_twice_opens_exactly_one_transport() {
    let (listener, addr) = listener().await;
    let (mut client, _rx) = RealtimeClient::new(addr);

    client.activate("u1").await.unwrap();
    client.activate("u1").await.unwrap();

    assert!(client.is_connected());
    assert_eq!(client.registered_user_id(), Some("u1"));

    let (_conn, frame) = accept_and_read_register(&listener).await;
    assert_eq!(frame, r#"{"type":"register","userId":"u1"}"#);

    // The second activate must not have opened another connection.
    let second = timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(second.is_err(), "idempotent activate opened a second transport");
}

#[tokio::test]
async fn deactivate_before_activate_is_a_silent_noop() {
    let (mut client, _rx) = RealtimeClient::new("127.0.0.1:1");
    client.deactivate().await;
    assert!(!client.is_connected());
    assert_eq!(client.registered_user_id(), None);
}

#[tokio::test]
async fn activation_failure_is_reported_not_fatal() {
    // Nothing listens on port 1; activate must fail with a transport error
    // and leave the client reusable.
    let (mut client, _rx) = RealtimeClient::new("127.0.0.1:1");
    let err = client.activate("u1").await.unwrap_err();
    assert!(matches!(err, gigflow_sdk::Error::Transport(_)));
    assert!(!client.is_connected());
}

#[tokio::test]
async fn notifications_are_delivered_and_disconnect_is_surfaced() {
    let (listener, addr) = listener().await;
    let (mut client, mut rx) = RealtimeClient::new(addr);
    client.activate("u7").await.unwrap();

    let (mut conn, frame) = accept_and_read_register(&listener).await;
    assert!(frame.contains("\"u7\""));

    conn.get_mut()
        .write_all(b"{\"type\":\"new_bid\",\"gigId\":\"g1\",\"bidId\":\"b1\"}\n")
        .await
        .unwrap();
    // An unknown frame type in between must be skipped, not kill the reader.
    conn.get_mut().write_all(b"{\"type\":\"promo\"}\n").await.unwrap();
    conn.get_mut()
        .write_all(b"{\"type\":\"gig_closed\",\"gigId\":\"g1\"}\n")
        .await
        .unwrap();

    let first = timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    assert_eq!(
        first,
        Notification::NewBid {
            gig_id: "g1".into(),
            bid_id: "b1".into()
        }
    );
    let second = timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    assert_eq!(second, Notification::GigClosed { gig_id: "g1".into() });

    // Server drops the connection; the reader reports it and stops.
    drop(conn);
    let last = timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    assert!(matches!(last, Notification::Disconnected { .. }));
}

#[tokio::test]
async fn deactivate_closes_the_transport() {
    let (listener, addr) = listener().await;
    let (mut client, _rx) = RealtimeClient::new(addr);
    client.activate("u1").await.unwrap();

    let (mut conn, _frame) = accept_and_read_register(&listener).await;

    client.deactivate().await;
    assert!(!client.is_connected());

    // The server side observes EOF once the client shuts the socket down.
    let mut line = String::new();
    let n = timeout(Duration::from_secs(1), conn.read_line(&mut line))
        .await
        .expect("no EOF observed")
        .unwrap();
    assert_eq!(n, 0);

    // And a fresh activate opens a new transport.
    client.activate("u1").await.unwrap();
    assert!(client.is_connected());
    let reconnected = timeout(Duration::from_secs(1), listener.accept()).await;
    assert!(reconnected.is_ok());
}
