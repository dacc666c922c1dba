use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::err;
use crate::error::LibrisResult;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpService};

/* # Why tiny_http with a single accept loop?

The catalog has no blocking I/O inside handlers, so one thread that reads a
request, dispatches it and responds before accepting the next one gives the
serialized execution model the service relies on: no two handlers ever observe
the shared store concurrently. recv_timeout lets the loop poll the shutdown
flag between requests.
*/

/// Poll interval for the shutdown flag while waiting for requests.
const RECV_TIMEOUT: Duration = Duration::from_millis(100);

/// Handle to a running HTTP server.
///
/// Carries the bound port and a shutdown flag. Signalling shutdown (or
/// dropping the handle) makes the accept loop exit after the current
/// request completes.
#[derive(Debug, Clone)]
pub struct HttpServerHandle {
    port: u16,
    shutdown: Arc<AtomicBool>,
}

impl HttpServerHandle {
    fn new(port: u16) -> Self {
        Self {
            port,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Signal the server to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Check if the server has been signaled to shut down.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

impl Drop for HttpServerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start an HTTP server on a background thread.
///
/// Binds immediately and returns a handle carrying the actual bound port
/// (useful with an OS-assigned port). The server stops accepting requests
/// once the handle signals shutdown.
pub fn start_http_server(
    service: Box<dyn HttpService>,
    config: HttpServerConfig,
) -> LibrisResult<HttpServerHandle> {
    let server = bind(&config)?;
    let handle = HttpServerHandle::new(bound_port(&server)?);
    let shutdown = handle.shutdown.clone();

    let _ = std::thread::Builder::new()
        .name("libris-http".to_string())
        .spawn(move || serve_loop(&server, &*service, &shutdown))
        .map_err(|e| err!("failed to spawn HTTP server thread: {}", e))?;

    info!(port = handle.port(), "HTTP server started");
    Ok(handle)
}

/// Run an HTTP server on the current thread.
///
/// Blocks for the lifetime of the process. This is the entry point used by
/// the CLI, where the server is the only activity.
pub fn run_http_server(
    service: Box<dyn HttpService>,
    config: HttpServerConfig,
) -> LibrisResult<()> {
    let server = bind(&config)?;
    info!(port = bound_port(&server)?, "HTTP server listening");
    let shutdown = AtomicBool::new(false);
    serve_loop(&server, &*service, &shutdown);
    Ok(())
}

fn bind(config: &HttpServerConfig) -> LibrisResult<tiny_http::Server> {
    let address = config.address();
    debug!(address = %address, "binding HTTP server");
    tiny_http::Server::http(&address)
        .map_err(|e| err!("failed to bind HTTP server on {}: {}", address, e))
}

fn bound_port(server: &tiny_http::Server) -> LibrisResult<u16> {
    server
        .server_addr()
        .to_ip()
        .map(|addr| addr.port())
        .ok_or_else(|| err!("HTTP server has no IP listen address"))
}

fn serve_loop(server: &tiny_http::Server, service: &dyn HttpService, shutdown: &AtomicBool) {
    while !shutdown.load(Ordering::SeqCst) {
        match server.recv_timeout(RECV_TIMEOUT) {
            Ok(Some(request)) => handle_connection(service, request),
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "failed to read incoming request");
            }
        }
    }
    debug!("HTTP server shut down");
}

/// Read one tiny_http request, dispatch it to the service and send the
/// response. Service-level errors become HTTP 500 with a JSON message body.
fn handle_connection(service: &dyn HttpService, mut request: tiny_http::Request) {
    let method_str = request.method().to_string();
    let path = request.url().to_string();

    let response = match HttpMethod::parse(&method_str) {
        Some(method) => {
            let http_request = read_request(method, &path, &mut request);
            match service.handle_request(http_request) {
                Ok(response) => response,
                Err(e) => {
                    warn!(method = %method_str, path = %path, error = %e, "service error");
                    error_response(&e.to_string())
                }
            }
        }
        None => {
            debug!(method = %method_str, path = %path, "unsupported HTTP method");
            HttpResponse::new(crate::http::HttpStatusCode::MethodNotAllowed)
        }
    };

    debug!(method = %method_str, path = %path, status = response.status().as_u16(), "handled request");
    send_response(request, response);
}

fn read_request(method: HttpMethod, path: &str, request: &mut tiny_http::Request) -> HttpRequest {
    let mut http_request = HttpRequest::new(method, path);

    for header in request.headers() {
        http_request = http_request.with_header(
            header.field.as_str().as_str().to_string(),
            header.value.as_str().to_string(),
        );
    }

    let mut body = Vec::new();
    if let Err(e) = request.as_reader().read_to_end(&mut body) {
        // A truncated body is handled downstream as an empty/invalid body
        warn!(error = %e, "failed to read request body");
    }
    http_request.with_body(body)
}

fn send_response(request: tiny_http::Request, response: HttpResponse) {
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let mut tiny_response =
        tiny_http::Response::from_data(response.into_body().into_bytes()).with_status_code(status);

    for (key, value) in headers.all() {
        match tiny_http::Header::from_bytes(key.as_bytes(), value.as_bytes()) {
            Ok(header) => tiny_response = tiny_response.with_header(header),
            Err(()) => warn!(key = %key, "dropping malformed response header"),
        }
    }

    if let Err(e) = request.respond(tiny_response) {
        warn!(error = %e, "failed to send response");
    }
}

fn error_response(message: &str) -> HttpResponse {
    let body = serde_json::json!({ "message": message }).to_string();
    HttpResponse::internal_error()
        .with_content_type("application/json")
        .with_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpStatusCode;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    #[derive(Debug)]
    struct PingService;

    impl HttpService for PingService {
        fn handle_request(&self, request: HttpRequest) -> LibrisResult<HttpResponse> {
            if request.path() == "/ping" {
                Ok(HttpResponse::ok()
                    .with_content_type("text/plain")
                    .with_body("pong"))
            } else {
                Ok(HttpResponse::not_found())
            }
        }
    }

    #[derive(Debug)]
    struct FailingService;

    impl HttpService for FailingService {
        fn handle_request(&self, _request: HttpRequest) -> LibrisResult<HttpResponse> {
            Err(err!("boom"))
        }
    }

    fn raw_request(port: u16, request: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).expect("connect");
        stream.write_all(request.as_bytes()).expect("write");
        let mut response = String::new();
        stream.read_to_string(&mut response).expect("read");
        response
    }

    #[test]
    fn test_server_round_trip() {
        let handle = start_http_server(Box::new(PingService), HttpServerConfig::default())
            .expect("server should start");

        let response = raw_request(
            handle.port(),
            "GET /ping HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n",
        );

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("pong"));

        handle.shutdown();
    }

    #[test]
    fn test_server_maps_service_error_to_500() {
        let handle = start_http_server(Box::new(FailingService), HttpServerConfig::default())
            .expect("server should start");

        let response = raw_request(
            handle.port(),
            "GET /anything HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n",
        );

        assert!(response.starts_with("HTTP/1.1 500"));
        assert!(response.contains(r#"{"message":"boom"}"#));

        handle.shutdown();
    }

    #[test]
    fn test_handle_shutdown_flag() {
        let handle = start_http_server(Box::new(PingService), HttpServerConfig::default())
            .expect("server should start");
        let clone = handle.clone();

        assert!(!handle.is_shutdown());
        clone.shutdown();
        assert!(handle.is_shutdown());
    }

    #[test]
    fn test_bind_failure_is_reported() {
        let first = start_http_server(Box::new(PingService), HttpServerConfig::default())
            .expect("server should start");

        // The port is already taken, so a second bind must fail
        let second = start_http_server(
            Box::new(PingService),
            HttpServerConfig::new("127.0.0.1").with_port(first.port()),
        );
        assert!(second.is_err());
        assert!(second.unwrap_err().to_string().contains("failed to bind"));

        first.shutdown();
    }

    #[test]
    fn test_status_codes_over_the_wire() {
        #[derive(Debug)]
        struct StatusService;
        impl HttpService for StatusService {
            fn handle_request(&self, request: HttpRequest) -> LibrisResult<HttpResponse> {
                match request.path() {
                    "/created" => Ok(HttpResponse::new(HttpStatusCode::Created)),
                    "/empty" => Ok(HttpResponse::no_content()),
                    _ => Ok(HttpResponse::not_found()),
                }
            }
        }

        let handle = start_http_server(Box::new(StatusService), HttpServerConfig::default())
            .expect("server should start");

        let response = raw_request(
            handle.port(),
            "POST /created HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 201"));

        let response = raw_request(
            handle.port(),
            "DELETE /empty HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 204"));

        handle.shutdown();
    }
}
