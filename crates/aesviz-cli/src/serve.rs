//! Static file server for the visualization page.

use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::{bail, Context, Result};

/// Server settings resolved at startup.
#[derive(Clone, Debug)]
pub struct ServeConfig {
    pub port: u16,
    /// Absolute, existing directory to serve from.
    pub root: PathBuf,
}

impl ServeConfig {
    /// Resolves `dir` to an absolute path and checks that it is a directory.
    pub fn new(port: u16, dir: &Path) -> Result<Self> {
        let root = fs::canonicalize(dir)
            .with_context(|| format!("resolve static directory {}", dir.display()))?;
        if !root.is_dir() {
            bail!("{} is not a directory", root.display());
        }
        Ok(Self { port, root })
    }
}

/// Binds the port and serves until the process is killed.
pub fn run(config: ServeConfig) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .with_context(|| format!("bind port {}", config.port))?;

    log::info!("serving {} on HTTP port {}", config.root.display(), config.port);
    log::info!("open http://localhost:{} in your browser", config.port);

    let config = Arc::new(config);
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let config = Arc::clone(&config);
                thread::spawn(move || handle_client(stream, &config.root));
            }
            Err(e) => log::warn!("accept failed: {e}"),
        }
    }
    Ok(())
}

/// A fully buffered HTTP response.
#[derive(Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    fn error(status: u16, reason: &'static str) -> Self {
        Self {
            status,
            reason,
            content_type: "text/plain; charset=utf-8",
            body: format!("{status} {reason}\n").into_bytes(),
        }
    }

    fn write_to(&self, stream: &mut impl Write) -> std::io::Result<()> {
        write!(
            stream,
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason,
            self.content_type,
            self.body.len()
        )?;
        stream.write_all(&self.body)?;
        stream.flush()
    }
}

fn handle_client(mut stream: TcpStream, root: &Path) {
    let mut buffer = [0u8; 4096];
    let read = match stream.read(&mut buffer) {
        Ok(n) => n,
        Err(e) => {
            log::warn!("read failed: {e}");
            return;
        }
    };
    let request = String::from_utf8_lossy(&buffer[..read]);
    let request_line = request.lines().next().unwrap_or("");

    let response = respond(root, request_line);
    log::info!("{request_line} -> {}", response.status);
    if let Err(e) = response.write_to(&mut stream) {
        log::warn!("write failed: {e}");
    }
}

/// Builds the response for an HTTP request line such as `GET /app.wasm HTTP/1.1`.
pub fn respond(root: &Path, request_line: &str) -> Response {
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Response::error(400, "Bad Request");
    };
    if method != "GET" {
        return Response::error(405, "Method Not Allowed");
    }

    let Some(relative) = request_path(target) else {
        return Response::error(403, "Forbidden");
    };
    let mut path = root.join(relative);
    if path.is_dir() {
        path.push("index.html");
    }

    match fs::read(&path) {
        Ok(body) => Response {
            status: 200,
            reason: "OK",
            content_type: content_type(&path),
            body,
        },
        Err(_) => Response::error(404, "Not Found"),
    }
}

/// Maps a request target to a path relative to the served root. Returns `None`
/// for targets that would escape it.
fn request_path(target: &str) -> Option<PathBuf> {
    let path = target.split(['?', '#']).next().unwrap_or("");
    let mut relative = PathBuf::new();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(relative)
}

/// Content type by extension. WebAssembly modules must be served as
/// `application/wasm` for streaming compilation to accept them.
pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("wasm") => "application/wasm",
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
