#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Minimal canned-response HTTP server for exercising the real binary.
///
/// Routes are matched on "METHOD /path" with the query string stripped;
/// every request actually received is recorded (with its query string)
/// so tests can assert on what the binary sent. Unmatched requests get
/// a 404. The accept thread lives for the duration of the test
/// process.
pub struct StubServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start(routes: Vec<(&str, u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().unwrap();
        let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
            routes
                .into_iter()
                .map(|(route, status, body)| (route.to_string(), (status, body)))
                .collect(),
        );
        let hits = Arc::new(Mutex::new(Vec::new()));

        let thread_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&thread_hits);
                thread::spawn(move || {
                    let _ = handle(stream, &routes, &hits);
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    /// Requests received so far, as "METHOD /path?query" strings.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn handle(
    stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    hits: &Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    loop {
        let mut request_line = String::new();
        if reader.read_line(&mut request_line)? == 0 {
            return Ok(()); // connection closed
        }
        let mut parts = request_line.split_whitespace();
        let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
            return Ok(());
        };
        let method = method.to_string();
        let target = target.to_string();

        // Drain headers, honoring Content-Length for any request body.
        let mut content_length = 0usize;
        loop {
            let mut header = String::new();
            if reader.read_line(&mut header)? == 0 {
                return Ok(());
            }
            let header = header.trim();
            if header.is_empty() {
                break;
            }
            if let Some(value) = header.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        if content_length > 0 {
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body)?;
        }

        hits.lock().unwrap().push(format!("{method} {target}"));

        let path = target.split('?').next().unwrap_or(&target);
        let (status, body) = routes
            .get(&format!("{method} {path}"))
            .cloned()
            .unwrap_or((404, String::from("not found")));

        let mut stream = reader.get_ref();
        write!(
            stream,
            "HTTP/1.1 {status} Stub\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\r\n{body}",
            body.len(),
        )?;
        stream.flush()?;
    }
}

/// JSON array of `n` well-formed certificates named cert-00, cert-01...
pub fn certificates_json(n: usize) -> String {
    let records: Vec<String> = (0..n).map(|i| certificate_json(&format!("cert-{i:02}"))).collect();
    format!("[{}]", records.join(","))
}

/// One well-formed certificate record.
pub fn certificate_json(common_name: &str) -> String {
    format!(
        r#"{{
            "commonName": "{common_name}",
            "issuer": "CN=Stub CA",
            "validFrom": "2026-01-01T00:00:00Z",
            "validTo": "2027-01-01T00:00:00Z",
            "version": 3,
            "serialNumber": "serial-{common_name}",
            "signatureAlgorithm": "SHA256withRSA",
            "publicKey": "-----BEGIN PUBLIC KEY-----\nMIIBstub\n-----END PUBLIC KEY-----"
        }}"#
    )
}
