use std::time::Duration;

use pmocovers::NormalizedFrame;
use pmodisplay::{DisplayEndpoints, MatrixDisplay};
use pmosync::DisplaySink;

fn matrix_for(server: &mockito::ServerGuard) -> MatrixDisplay {
    let endpoints = DisplayEndpoints::for_address(&server.host_with_port());
    MatrixDisplay::new(endpoints, Duration::from_secs(2))
}

fn frame() -> NormalizedFrame {
    NormalizedFrame::new(2, vec![7u8; 12]).unwrap()
}

#[test]
fn test_send_frame_posts_raw_bytes() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/image")
        .match_header("content-type", "application/octet-stream")
        .with_status(200)
        .create();

    let matrix = matrix_for(&server);
    assert!(matrix.send_frame(&frame()));
    mock.assert();
}

#[test]
fn test_send_frame_rejected_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/image")
        .with_status(500)
        .with_body("panel busy")
        .create();

    let matrix = matrix_for(&server);
    assert!(!matrix.send_frame(&frame()));
    mock.assert();
}

#[test]
fn test_send_screensaver() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/screensaver")
        .with_status(200)
        .expect(1)
        .create();

    let matrix = matrix_for(&server);
    assert!(matrix.send_screensaver());
    mock.assert();
}

#[test]
fn test_screensaver_not_found() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("POST", "/screensaver").with_status(404).create();

    let matrix = matrix_for(&server);
    assert!(!matrix.send_screensaver());
}

#[test]
fn test_unreachable_matrix_returns_false() {
    // Port 9 (discard) : connexion refusée
    let matrix = MatrixDisplay::new(
        DisplayEndpoints::for_address("127.0.0.1:9"),
        Duration::from_millis(500),
    );

    assert!(!matrix.send_frame(&frame()));
    assert!(!matrix.send_screensaver());
}

#[test]
fn test_display_sink_delegates_to_http() {
    let mut server = mockito::Server::new();
    let image = server.mock("POST", "/image").with_status(200).create();
    let screensaver = server.mock("POST", "/screensaver").with_status(200).create();

    let matrix = matrix_for(&server);
    let sink: &dyn DisplaySink = &matrix;
    assert!(sink.send_frame(&frame()));
    assert!(sink.send_screensaver());

    image.assert();
    screensaver.assert();
}
