use http::{HeaderValue, StatusCode, header};
use micro_writer::connection::{ConnectionWriter, WriterConfig};
use micro_writer::protocol::{WriteError, WriteState};
use micro_writer::sink::close_channel;
use micro_writer::writer::ResponseWriter;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};

fn config() -> WriterConfig {
    WriterConfig { date_header: false, ..WriterConfig::default() }
}

async fn read_until_blank_line(client: &mut DuplexStream) -> String {
    let mut received = Vec::new();
    let mut buf = [0u8; 256];
    while !received.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = client.read(&mut buf).await.unwrap();
        assert_ne!(n, 0, "connection closed before the head arrived");
        received.extend_from_slice(&buf[..n]);
    }
    String::from_utf8(received).unwrap()
}

#[tokio::test]
async fn writes_chunked_response_over_stream() {
    let (mut client, server) = duplex(1024);
    let mut writer = ResponseWriter::new(ConnectionWriter::with_config(server, config()));

    writer.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    writer.set_status(StatusCode::CREATED);
    assert!(!writer.has_written());

    writer.write(b"hello").await.unwrap();
    writer.write_text(" world").await.unwrap();
    writer.set_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(writer.status(), StatusCode::CREATED);
    assert_eq!(writer.write_state(), WriteState::Committed(11));

    let server = writer.into_inner().finish().await.unwrap();
    drop(server);

    let mut received = String::new();
    client.read_to_string(&mut received).await.unwrap();
    assert_eq!(
        received,
        "HTTP/1.1 201 Created\r\ncontent-type: text/plain\r\ntransfer-encoding: chunked\r\n\r\n5\r\nhello\r\n6\r\n world\r\n0\r\n\r\n"
    );
}

#[tokio::test]
async fn flush_sends_head_before_body() {
    let (mut client, server) = duplex(1024);
    let mut writer = ResponseWriter::new(ConnectionWriter::with_config(server, config()));
    writer.headers_mut().insert(header::CONTENT_LENGTH, HeaderValue::from_static("2"));

    writer.flush().await.unwrap();
    assert_eq!(writer.bytes_written(), Some(0));

    let head = read_until_blank_line(&mut client).await;
    assert_eq!(head, "HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\n");

    writer.write(b"ok").await.unwrap();
    let result = writer.write(b"!").await;
    assert!(matches!(result, Err(WriteError::ContentLengthExceeded { declared: 2 })));
    assert_eq!(writer.bytes_written(), Some(2));
}

#[tokio::test]
async fn hijack_hands_over_the_stream() {
    let (mut client, server) = duplex(1024);
    let mut writer = ResponseWriter::new(ConnectionWriter::with_config(server, config()));
    writer.headers_mut().insert(header::UPGRADE, HeaderValue::from_static("echo"));
    writer.set_status(StatusCode::SWITCHING_PROTOCOLS);
    writer.commit_headers_if_needed().unwrap();

    let mut hijacked = writer.hijack().unwrap();
    assert!(writer.has_written());
    assert!(matches!(writer.write(b"late").await, Err(WriteError::Hijacked)));

    let pending = hijacked.pending().to_vec();
    hijacked.io_mut().write_all(&pending).await.unwrap();
    hijacked.io_mut().write_all(b"raw bytes").await.unwrap();
    drop(hijacked);

    let mut received = String::new();
    client.read_to_string(&mut received).await.unwrap();
    assert_eq!(received, "HTTP/1.1 101 Switching Protocols\r\nupgrade: echo\r\n\r\nraw bytes");
}

#[tokio::test]
async fn hijack_before_any_write() {
    let (_client, server) = duplex(64);
    let mut writer = ResponseWriter::new(ConnectionWriter::with_config(server, config()));

    let hijacked = writer.hijack().unwrap();

    assert!(hijacked.pending().is_empty());
    assert!(writer.has_written());
    assert_eq!(writer.bytes_written(), Some(0));
}

#[tokio::test]
async fn close_notify_fires_when_client_leaves() {
    let (client, server) = duplex(64);
    let (read_half, write_half) = tokio::io::split(server);
    let (notifier, close_notify) = close_channel();

    let watcher = tokio::spawn(async move {
        let mut read_half = read_half;
        let mut buf = [0u8; 64];
        while read_half.read(&mut buf).await.map(|n| n > 0).unwrap_or(false) {}
        notifier.notify();
    });

    let mut writer = ResponseWriter::new(ConnectionWriter::with_config(write_half, config()).with_close_notify(close_notify));
    let mut close_notify = writer.close_notify().unwrap();
    assert!(!close_notify.is_closed());

    drop(client);
    close_notify.closed().await;
    assert!(close_notify.is_closed());
    watcher.await.unwrap();
}

#[tokio::test]
async fn reset_reuses_the_writer() {
    let mut writer = ResponseWriter::new(ConnectionWriter::with_config(Vec::new(), config()));
    writer.set_status(StatusCode::NOT_FOUND);
    writer.write_text("missing").await.unwrap();

    let previous = writer.reset(ConnectionWriter::with_config(Vec::new(), config()));
    let first = previous.finish().await.unwrap();
    assert!(first.starts_with(b"HTTP/1.1 404 Not Found\r\n"));

    assert_eq!(writer.status(), StatusCode::OK);
    assert_eq!(writer.bytes_written(), None);

    writer.commit_headers_if_needed().unwrap();
    let second = writer.into_inner().finish().await.unwrap();
    assert_eq!(second, b"HTTP/1.1 200 OK\r\ntransfer-encoding: chunked\r\n\r\n0\r\n\r\n");
}
