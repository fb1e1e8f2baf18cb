//! Log output tests: webhook credentials must never reach the logs.
//!
//! Google Chat webhook URLs carry `key` and `token` query parameters, and a
//! space may be a literal URL, so these tests capture the crate's tracing
//! output and check that no credential appears in it.

use std::io;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use google_chat_notify::endpoint::{apply_threading, LITERAL_SPACE_LABEL};
use google_chat_notify::{AnonymousNotifiable, GoogleChatChannel, GoogleChatConfig, GoogleChatMessage, SendError};

const SECRET: &str = "S3CR3T-TOKEN";

/// In-memory sink for the fmt subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's `google_chat_notify` events into a buffer.
fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("google_chat_notify=trace"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    (buffer, tracing::subscriber::set_default(subscriber))
}

fn secret_url(base: &str) -> String {
    format!("{base}/v1/spaces/X/messages?key=k&token={SECRET}")
}

#[tokio::test]
async fn sending_to_literal_url_does_not_log_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (logs, _guard) = capture_logs();

    let channel = GoogleChatChannel::new(
        GoogleChatConfig::new().with_default_space(secret_url(&server.uri())),
    );
    let message = GoogleChatMessage::new().text("hello").threaded();

    channel
        .send_message(&AnonymousNotifiable::new(), &message)
        .await
        .unwrap();

    let output = logs.contents();
    assert!(output.contains("Sending notification"), "{output}");
    assert!(output.contains(LITERAL_SPACE_LABEL), "{output}");
    assert!(!output.contains(SECRET), "{output}");
}

#[test]
fn threading_warning_does_not_log_endpoint() {
    let (logs, _guard) = capture_logs();

    let endpoint = apply_threading(
        format!("https://chat.googleapis.com/v1/spaces/X/messages/{SECRET}"),
        true,
    );
    assert!(endpoint.contains(SECRET));

    let output = logs.contents();
    assert!(output.contains("no query string"), "{output}");
    assert!(!output.contains(SECRET), "{output}");
}

#[tokio::test]
async fn client_error_does_not_log_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&server)
        .await;

    let (logs, _guard) = capture_logs();

    let channel = GoogleChatChannel::new(GoogleChatConfig::new());
    let message = GoogleChatMessage::new()
        .text("hello")
        .to(secret_url(&server.uri()));

    let err = channel
        .send_message(&AnonymousNotifiable::new(), &message)
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(!err.to_string().contains(SECRET));

    let output = logs.contents();
    assert!(output.contains("rejected the message"), "{output}");
    assert!(!output.contains(SECRET), "{output}");
}

#[tokio::test]
async fn server_error_does_not_expose_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (logs, _guard) = capture_logs();

    let channel = GoogleChatChannel::new(
        GoogleChatConfig::new().with_default_space(secret_url(&server.uri())),
    );

    let err = channel
        .send_message(&AnonymousNotifiable::new(), &GoogleChatMessage::new().text("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, SendError::UnexpectedException(_)));
    assert!(!err.to_string().contains(SECRET), "{err}");

    let output = logs.contents();
    assert!(output.contains("request failed"), "{output}");
    assert!(!output.contains(SECRET), "{output}");
}

#[tokio::test]
async fn transport_error_does_not_expose_credentials() {
    // Nothing listens on port 1.
    let channel = GoogleChatChannel::new(
        GoogleChatConfig::new().with_default_space(secret_url("http://127.0.0.1:1")),
    );

    let err = channel
        .send_message(&AnonymousNotifiable::new(), &GoogleChatMessage::new().text("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, SendError::UnexpectedException(_)));
    assert!(!err.to_string().contains(SECRET), "{err}");
    assert!(!format!("{err:?}").contains(SECRET), "{err:?}");
}

/// Serve one request with a 400 whose body is cut short.
async fn truncated_client_error_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..n]);
            if request_complete(&request) {
                break;
            }
        }

        socket
            .write_all(b"HTTP/1.1 400 Bad Request\r\ncontent-length: 100\r\n\r\nshort")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();

        // Drain until the client hangs up.
        let mut rest = Vec::new();
        let _ = socket.read_to_end(&mut rest).await;
    });

    format!("http://{addr}")
}

/// True once the headers and `content-length` body bytes have arrived.
fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };

    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    request.len() >= header_end + 4 + content_length
}

#[tokio::test]
async fn unreadable_error_body_is_logged() {
    let base = truncated_client_error_server().await;

    let (logs, _guard) = capture_logs();

    let channel = GoogleChatChannel::new(GoogleChatConfig::new());
    let message = GoogleChatMessage::new().text("hello").to(secret_url(&base));

    let err = channel
        .send_message(&AnonymousNotifiable::new(), &message)
        .await
        .unwrap_err();

    match err {
        SendError::ClientError { status, body } => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert!(body.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let output = logs.contents();
    assert!(output.contains("read_error=Some("), "{output}");
    assert!(!output.contains(SECRET), "{output}");
}
