//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use knapsack_offchain::abi::encode_page;
use knapsack_offchain_types::encoding::word_to_u64;
use knapsack_transport::{CallTransport, TransportError};

pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Page response for `items[page * size .. (page + 1) * size]`.
pub fn page_result(items: &[(u64, u64)], calldata: &[u8]) -> String {
    let page = word_to_u64(&calldata[4..36]).unwrap() as usize;
    let size = word_to_u64(&calldata[36..68]).unwrap() as usize;
    let start = (page * size).min(items.len());
    let end = (start + size).min(items.len());
    let (values, weights): (Vec<u64>, Vec<u64>) = items[start..end].iter().copied().unzip();
    format!("0x{}", hex::encode(encode_page(&values, &weights)))
}

/// In-memory contract serving the paged accessor.
pub struct InMemoryContract {
    pub items: Vec<(u64, u64)>,
    pub fail_on_page: Option<u64>,
    pub requests: RefCell<Vec<u64>>,
}

impl InMemoryContract {
    pub fn new(items: Vec<(u64, u64)>) -> Self {
        Self {
            items,
            fail_on_page: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, page: u64) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl CallTransport for InMemoryContract {
    fn call(&self, _to: &str, data: &[u8]) -> Result<String, TransportError> {
        let page = word_to_u64(&data[4..36]).unwrap();
        self.requests.borrow_mut().push(page);
        if self.fail_on_page == Some(page) {
            return Err(TransportError::Rpc {
                code: -32603,
                message: "internal error".to_string(),
            });
        }
        Ok(page_result(&self.items, data))
    }
}

/// Minimal JSON-RPC node on localhost.
///
/// Answers `connections` requests (one per connection) from `items`, then
/// exits. Returns the base URL and the server thread handle.
pub fn spawn_rpc_server(items: Vec<(u64, u64)>, connections: usize) -> (String, JoinHandle<()>) {
    serve(connections, move |request| {
        let data_hex = request["params"][0]["data"].as_str().unwrap();
        let calldata = hex::decode(data_hex.trim_start_matches("0x")).unwrap();
        let response = serde_json::json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "result": page_result(&items, &calldata),
        });
        (200, response.to_string())
    })
}

/// One-shot node that answers the first request with a fixed status and body.
pub fn spawn_rpc_server_with(status: u16, body: &str) -> (String, JoinHandle<()>) {
    let body = body.to_string();
    serve(1, move |_| (status, body.clone()))
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    }
}

/// Accept `connections` HTTP requests, reply to each with `respond(json_body)`.
fn serve<F>(connections: usize, respond: F) -> (String, JoinHandle<()>)
where
    F: Fn(&serde_json::Value) -> (u16, String) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        for _ in 0..connections {
            let (stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 {
                    break;
                }
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();

            let request: serde_json::Value = serde_json::from_slice(&body).unwrap();
            let (status, response) = respond(&request);

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                response.len(),
                response
            )
            .unwrap();
            stream.flush().unwrap();
        }
    });

    (url, handle)
}
