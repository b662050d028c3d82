//! HttpGateway tests against a one-shot local HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use stowage::remote::wire::PackRequest;
use stowage::{
    ContainerInput, GatewayConfig, HttpGateway, ItemInput, PackContext, Packer, PackerBackend,
    PackingError, PackingGateway,
};

struct Captured {
    request_line: String,
    content_type: Option<String>,
    body: String,
}

/// Serves exactly one request with the given status and body.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    serve_once_bytes(status, body.as_bytes())
}

/// Serves exactly one request with a raw byte body.
fn serve_once_bytes(status: u16, body: &'static [u8]) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0;
        let mut content_type = None;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                match name.to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.trim().parse().unwrap(),
                    "content-type" => content_type = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        let mut buf = vec![0; content_length];
        reader.read_exact(&mut buf).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .unwrap();
        stream.write_all(body).unwrap();
        stream.flush().unwrap();

        Captured {
            request_line: request_line.trim_end().to_string(),
            content_type,
            body: String::from_utf8(buf).unwrap(),
        }
    });

    (base_url, handle)
}

fn request() -> PackRequest {
    PackRequest::new(
        &ContainerInput::new("C1", 100.0, 100.0, 100.0, 10.0),
        &[ItemInput::new("A", "Item A", 10.0, 20.0, 30.0, 1.0).with_quantity(2)],
    )
}

#[test]
fn test_successful_round_trip() {
    let (base_url, server) = serve_once(
        200,
        r#"{"success":true,"data":{"units":"mm","placements":[
            {"item_id":"A","label":"Item A","pos_x":0,"pos_y":0,"pos_z":0,"rotation":0,"step_number":1},
            {"item_id":"A","label":"Item A","pos_x":10,"pos_y":0,"pos_z":0,"rotation":1,"step_number":2}
        ],"unfitted":[],"stats":{"fitted_count":2,"unfitted_count":0,"total_time_ms":3.0}}}"#,
    );
    let gateway = HttpGateway::new(&GatewayConfig::new(base_url)).unwrap();

    let data = gateway
        .submit(&request(), Some(Duration::from_secs(5)))
        .unwrap();
    let captured = server.join().unwrap();

    assert_eq!(captured.request_line, "POST /pack HTTP/1.1");
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent["units"], "mm");
    assert_eq!(sent["items"][0]["quantity"], 2);
    assert_eq!(sent["options"]["put_type"], 1);

    assert_eq!(data.placements.len(), 2);
    assert_eq!(data.placements[1].rotation, 1);
}

#[test]
fn test_server_error_is_transport_error() {
    let (base_url, server) = serve_once(
        503,
        r#"{"success":false,"error":{"code":"BUSY","message":"queue full"}}"#,
    );
    let gateway = HttpGateway::new(&GatewayConfig::new(base_url)).unwrap();

    let err = gateway.submit(&request(), None).unwrap_err();
    server.join().unwrap();

    match &err {
        PackingError::Transport { status, message } => {
            assert_eq!(*status, Some(503));
            assert_eq!(message, "queue full");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(err.is_retryable());
}

#[test]
fn test_service_failure_is_service_error() {
    let (base_url, server) = serve_once(
        200,
        r#"{"success":false,"error":{"code":"INVALID","message":"bad container"}}"#,
    );
    let gateway = HttpGateway::new(&GatewayConfig::new(base_url)).unwrap();

    let err = gateway.submit(&request(), None).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, PackingError::Service { ref code, .. } if code == "INVALID"));
}

#[test]
fn test_binary_success_body_is_decoding_error() {
    let (base_url, server) = serve_once_bytes(200, &[0x7b, 0xff, 0xfe, 0x7d]);
    let gateway = HttpGateway::new(&GatewayConfig::new(base_url)).unwrap();

    let err = gateway.submit(&request(), None).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, PackingError::Decoding { status: 200, .. }));
    assert!(!err.is_retryable());
}

#[test]
fn test_unreachable_service() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let gateway = HttpGateway::new(&GatewayConfig::new(base_url).with_timeout_ms(2_000)).unwrap();
    let err = gateway.submit(&request(), None).unwrap_err();

    assert!(matches!(err, PackingError::Transport { status: None, .. }));
}

#[test]
fn test_backend_over_http() {
    let (base_url, server) = serve_once(
        200,
        r#"{"success":true,"data":{"placements":[
            {"item_id":"A","pos_x":0,"pos_y":0,"pos_z":0,"rotation":0,"step_number":1}
        ],"unfitted":[{"item_id":"A","label":"Item A","count":1}]}}"#,
    );
    let config = stowage::EngineConfig::new()
        .with_backend(stowage::BackendKind::Remote)
        .with_gateway(GatewayConfig::new(base_url).with_endpoint("/v1/pack"));
    let packer = PackerBackend::from_config(&config).unwrap();

    let items = [ItemInput::new("A", "Item A", 10.0, 20.0, 30.0, 1.0).with_quantity(2)];
    let result = packer
        .pack(
            &PackContext::new(),
            &ContainerInput::new("C1", 100.0, 100.0, 100.0, 10.0),
            &items,
        )
        .unwrap();
    let captured = server.join().unwrap();

    assert_eq!(captured.request_line, "POST /v1/pack HTTP/1.1");
    assert_eq!(result.packed_count_for("A"), 1);
    assert_eq!(result.unfit_count_for("A"), 1);
    assert_eq!(result.packed_items[0].label, "Item A");
}
