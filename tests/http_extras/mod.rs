use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as received by [`serve_once`].
pub(crate) struct RecordedRequest {
    pub head: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_owned())
        })
    }

    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }
}

/// Answers exactly one HTTP request with the given status line and body,
/// returning the server's base URL and a handle yielding the request.
pub(crate) async fn serve_once(
    status: &'static str,
    content_type: &'static str,
    body: &str,
) -> (String, JoinHandle<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Expected a free local port.");
    let address = listener.local_addr().expect("Expected a bound address.");
    let response_body = body.to_owned();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("Expected a connection.");
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 4096];

        let head_end = loop {
            let read = stream.read(&mut chunk).await.expect("Expected to read.");
            if read == 0 {
                break buffer.len();
            }
            buffer.extend_from_slice(&chunk[..read]);
            if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                break position + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                if key.trim().eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);

        while buffer.len() < head_end + content_length {
            let read = stream.read(&mut chunk).await.expect("Expected to read.");
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
            response_body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("Expected to write.");
        stream.shutdown().await.ok();

        RecordedRequest {
            head,
            body: String::from_utf8_lossy(&buffer[head_end..]).into_owned(),
        }
    });

    (format!("http://{address}"), handle)
}

/// Base URL of a local port nothing listens on.
pub(crate) async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Expected a free local port.");
    let address = listener.local_addr().expect("Expected a bound address.");
    drop(listener);
    format!("http://{address}")
}
