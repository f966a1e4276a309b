#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex, time::Duration};

use ephem_traj::{
    jpl_request::horizons_query::{AngleFormat, QueryWindow},
    EphemerisPayload, EphemerisSource,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

/// Horizons-like `result` text wrapping the given rows between the table markers.
pub fn observer_result(rows: &[&str]) -> String {
    let mut text = String::from(
        "*******************************************************************************\n\
         Target body name: (2014 PL51)                     {source: JPL#12}\n\
         *******************************************************************************\n\
         \x20Date__(UT)__HR:MN     R.A._____(ICRF)_____DEC\n\
         *******************************************************************************\n\
         $$SOE\n",
    );
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text.push_str(
        "$$EOE\n\
         *******************************************************************************\n",
    );
    text
}

/// In-memory ephemeris source: designators without a payload fail.
#[derive(Default)]
pub struct MockSource {
    payloads: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, AngleFormat)>>,
}

impl MockSource {
    pub fn with_payload(mut self, designator: &str, result: String) -> Self {
        self.payloads.insert(designator.to_string(), result);
        self
    }

    pub fn with_delay(mut self, designator: &str, delay: Duration) -> Self {
        self.delays.insert(designator.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, AngleFormat)> {
        self.calls.lock().unwrap().clone()
    }
}

impl EphemerisSource for MockSource {
    async fn fetch(
        &self,
        query: &QueryWindow,
        angle_format: AngleFormat,
    ) -> Option<EphemerisPayload> {
        self.calls
            .lock()
            .unwrap()
            .push((query.designator.clone(), angle_format));

        if let Some(delay) = self.delays.get(&query.designator) {
            tokio::time::sleep(*delay).await;
        }

        self.payloads
            .get(&query.designator)
            .map(|result| EphemerisPayload::new(result.clone()))
    }
}

/// Serve exactly one HTTP response on a random local port.
///
/// Returns the URL to query and a handle resolving to the raw request head.
pub async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{addr}/api/horizons"), handle)
}
