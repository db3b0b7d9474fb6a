use http::{HeaderValue, StatusCode, header};
use micro_writer::connection::ConnectionWriter;
use micro_writer::protocol::WriteError;
use micro_writer::sink::{ResponseSink, close_channel};
use micro_writer::writer::ResponseWriter;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(port = 8080, "start listening");
    let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        tokio::spawn(async move {
            let (reader, writer) = tcp_stream.into_split();
            let mut reader = BufReader::new(reader);

            // only the request line matters for this demo
            let mut request_line = String::new();
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line).await {
                    Ok(0) => return,
                    Ok(_) if line == "\r\n" => break,
                    Ok(_) if request_line.is_empty() => request_line = line,
                    Ok(_) => {}
                    Err(e) => {
                        warn!(cause = %e, "failed to read request");
                        return;
                    }
                }
            }

            let (notifier, close_notify) = close_channel();
            tokio::spawn(async move {
                let mut rest = String::new();
                while reader.read_line(&mut rest).await.map(|n| n > 0).unwrap_or(false) {
                    rest.clear();
                }
                notifier.notify();
            });

            let mut response = ResponseWriter::new(ConnectionWriter::new(writer).with_close_notify(close_notify));
            if let Err(e) = handle(request_line.trim_end(), &mut response).await {
                error!(cause = %e, "handle request error");
            }

            // access log, the way a middleware inspects the response after the handler
            info!(%remote_addr, request = request_line.trim_end(), status = response.status().as_u16(), bytes = ?response.bytes_written(), "request finished");

            if let Err(e) = response.into_inner().finish().await {
                error!(cause = %e, "finish response error");
            }
        });
    }
}

async fn handle<W: ResponseSink>(request_line: &str, response: &mut ResponseWriter<W>) -> Result<(), WriteError> {
    response.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));

    match request_line.split_whitespace().nth(1) {
        Some("/") => {
            response.write_text("Hello World!\r\n").await?;
        }
        Some("/stream") => {
            let mut close_notify = response.close_notify()?;
            for i in 0..5 {
                if close_notify.is_closed() {
                    info!("client went away");
                    break;
                }
                response.write_text(&format!("tick {i}\r\n")).await?;
                response.flush().await?;
                tokio::select! {
                    () = tokio::time::sleep(std::time::Duration::from_millis(500)) => {}
                    () = close_notify.closed() => {}
                }
            }
        }
        _ => {
            response.set_status(StatusCode::NOT_FOUND);
        }
    }

    if !response.has_written() {
        response.write_text("nothing here\r\n").await?;
    }
    Ok(())
}
