//! Static preview server for the built output directory.

mod lifecycle;
mod path;
mod response;

use crate::{config::SiteConfig, core::is_shutdown, debug, log};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Number of request worker threads.
const WORKERS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    root: PathBuf,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &SiteConfig) -> Result<BoundServer> {
    let root = config.output_dir().to_path_buf();
    if !root.join("index.html").is_file() {
        anyhow::bail!(
            "nothing to serve in {}, run `daggerdex build` first",
            root.display()
        );
    }

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    Ok(BoundServer { server, root })
}

impl BoundServer {
    /// Start the request loop (blocking until shutdown).
    pub fn run(self) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(WORKERS)
            .build()
            .context("Failed to create request thread pool")?;
        let root = Arc::new(self.root);

        for request in self.server.incoming_requests() {
            let root = Arc::clone(&root);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &root) {
                    log!("serve"; "request error: {e}");
                }
            });
        }
        Ok(())
    }
}

/// Serve the output directory until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    bind_server(config)?.run()
}

/// Handle a single HTTP request
fn handle_request(request: Request, root: &Path) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    debug!("serve"; "{} {}", request.method(), request.url());
    match path::resolve_path(request.url(), root) {
        Some(path) => response::respond_file(request, &path),
        None => response::respond_not_found(request, root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::{IpAddr, Ipv4Addr, TcpStream};
    use tempfile::TempDir;

    /// Answer exactly one request on a throwaway server.
    fn roundtrip(root: &Path, raw_request: &str) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let root = root.to_path_buf();
        let handle = std::thread::spawn(move || {
            let request = server.recv().unwrap();
            handle_request(request, &root).unwrap();
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(raw_request.as_bytes()).unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        handle.join().unwrap();
        response
    }

    fn get(path: &str) -> String {
        format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
    }

    fn output() -> TempDir {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("loot/Gem");
        fs::create_dir_all(&page).unwrap();
        fs::write(page.join("index.html"), "<p>gem</p>").unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::write(dir.path().join("404.html"), "<h1>Not Found</h1>").unwrap();
        dir
    }

    #[test]
    fn test_serves_built_page() {
        let dir = output();
        let response = roundtrip(dir.path(), &get("/loot/Gem"));
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("<p>gem</p>"));
    }

    #[test]
    fn test_miss_uses_404_page() {
        let dir = output();
        let response = roundtrip(dir.path(), &get("/loot/Nope"));
        assert!(response.starts_with("HTTP/1.1 404"));
        assert!(response.contains("<h1>Not Found</h1>"));
    }

    #[test]
    fn test_post_not_allowed() {
        let dir = output();
        let request =
            "POST / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: 0\r\n\r\n";
        let response = roundtrip(dir.path(), request);
        assert!(response.starts_with("HTTP/1.1 405"));
    }

    #[test]
    fn test_bind_requires_built_output() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_path_buf();
        config.serve.interface = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.serve.port = 0;
        assert!(bind_server(&config).is_err());
    }
}
