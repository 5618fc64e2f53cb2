use std::time::Duration;

use reqwest::{Client, Url};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use nowplaying::poller::{poll_once, HttpSource, PollError, PollErrorKind, PollState};

/// Answer exactly one request on a loopback port with a canned response.
async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 2048];
        let _ = stream.read(&mut request).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    });

    Url::parse(&format!("http://{}/now-playing", addr)).unwrap()
}

fn source(endpoint: Url) -> HttpSource {
    let client = Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    HttpSource::with_client(client, endpoint)
}

#[tokio::test]
async fn test_playing_over_http() {
    let url = serve_once(
        "200 OK",
        r#"{"title":"Song","artist":"Artist","songUrl":"https://s","albumImageUrl":"https://a"}"#,
    )
    .await;

    match poll_once(&source(url)).await {
        PollState::Playing(track) => {
            assert_eq!(track.title, "Song");
            assert_eq!(track.artist, "Artist");
            assert_eq!(track.song_url, "https://s");
            assert_eq!(track.album_art_url.as_deref(), Some("https://a"));
        }
        other => panic!("expected playing, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_over_http() {
    let url = serve_once("500 Internal Server Error", r#"{"error":"spotify token expired"}"#).await;
    assert_eq!(
        poll_once(&source(url)).await,
        PollState::Error(PollError::Status(500))
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{}/now-playing", addr)).unwrap();
    match poll_once(&source(url)).await {
        PollState::Error(err) => assert_eq!(err.kind(), PollErrorKind::TransportError),
        other => panic!("expected transport error, got {:?}", other),
    }
}
