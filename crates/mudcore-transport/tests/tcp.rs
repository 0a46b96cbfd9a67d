//! Integration tests for the TCP line transport, driven by raw
//! `tokio::net::TcpStream` clients.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use mudcore_transport::{Connection, TcpLineTransport, Transport};

async fn bind() -> (TcpLineTransport, String) {
    let transport = TcpLineTransport::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = transport.local_addr().expect("should have addr").to_string();
    (transport, addr)
}

#[tokio::test]
async fn test_recv_line_returns_client_line_without_terminator() {
    let (mut transport, addr) = bind().await;

    let client = tokio::spawn(async move {
        let mut stream = TcpStream::connect(addr).await.expect("connect");
        stream.write_all(b"hello world\n").await.expect("write");
        stream
    });

    let conn = transport.accept().await.expect("accept");
    let line = conn.recv_line().await.expect("recv");
    assert_eq!(line.as_deref(), Some("hello world"));

    drop(client.await.expect("client"));
}

#[tokio::test]
async fn test_recv_line_strips_telnet_crlf() {
    let (mut transport, addr) = bind().await;

    let client = tokio::spawn(async move {
        let mut stream = TcpStream::connect(addr).await.expect("connect");
        stream.write_all(b"/quit\r\n").await.expect("write");
        stream
    });

    let conn = transport.accept().await.expect("accept");
    let line = conn.recv_line().await.expect("recv");
    assert_eq!(line.as_deref(), Some("/quit"));

    drop(client.await.expect("client"));
}

#[tokio::test]
async fn test_recv_line_returns_none_on_clean_close() {
    let (mut transport, addr) = bind().await;

    tokio::spawn(async move {
        let stream = TcpStream::connect(addr).await.expect("connect");
        drop(stream);
    });

    let conn = transport.accept().await.expect("accept");
    assert!(conn.recv_line().await.expect("recv").is_none());
}

#[tokio::test]
async fn test_send_line_appends_newline() {
    let (mut transport, addr) = bind().await;

    let client = tokio::spawn(async move {
        let stream = TcpStream::connect(addr).await.expect("connect");
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).await.expect("read");
        line
    });

    let conn = transport.accept().await.expect("accept");
    conn.send_line("You say \"hi\".").await.expect("send");

    assert_eq!(client.await.expect("client"), "You say \"hi\".\n");
}

#[tokio::test]
async fn test_connections_get_distinct_ids() {
    let (mut transport, addr) = bind().await;

    let addr2 = addr.clone();
    let c1 = tokio::spawn(async move { TcpStream::connect(addr).await.expect("connect") });
    let conn1 = transport.accept().await.expect("accept");
    let c2 = tokio::spawn(async move { TcpStream::connect(addr2).await.expect("connect") });
    let conn2 = transport.accept().await.expect("accept");

    assert_ne!(conn1.id(), conn2.id());

    drop(c1.await.expect("c1"));
    drop(c2.await.expect("c2"));
}
