//! `reqwest`-backed transport for the content API.

use super::{RawResponse, Transport, TransportError};
use std::time::Duration;
use url::Url;

/// HTTP transport sharing one connection pool across all fetches.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the client. `timeout` bounds each request end to end.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(describe)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(describe)?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn describe(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError("timed out".to_string())
    } else if err.is_connect() {
        TransportError(format!("connection failed: {err}"))
    } else {
        TransportError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tiny_http::{Header, Response, Server};

    /// Serve `requests` canned responses on an ephemeral port.
    fn upstream(requests: usize) -> (String, thread::JoinHandle<()>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            for request in server.incoming_requests().take(requests) {
                let response = match request.url() {
                    "/dh/classes" => {
                        let header = Header::from_bytes("Content-Type", "application/json").unwrap();
                        Response::from_string(r#"[{"name":"Bard"}]"#).with_header(header)
                    }
                    _ => Response::from_string("missing").with_status_code(404),
                };
                request.respond(response).ok();
            }
        });
        (format!("http://{addr}/dh/"), handle)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_http_transport_against_local_upstream() {
        let (base, handle) = upstream(2);
        let transport = HttpTransport::new(Some(Duration::from_secs(5))).unwrap();

        let ok = transport.get(&Url::parse(&format!("{base}classes")).unwrap()).await.unwrap();
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body, br#"[{"name":"Bard"}]"#);

        let missing = transport.get(&Url::parse(&format!("{base}loot")).unwrap()).await.unwrap();
        assert_eq!(missing.status, 404);
        assert!(!missing.is_success());

        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let transport = HttpTransport::new(Some(Duration::from_secs(2))).unwrap();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/classes")).unwrap();
        assert!(transport.get(&url).await.is_err());
    }
}
