/* # Why have libris_base as a foundation crate?
libris_base provides the error handling, tracing setup and HTTP plumbing used
across all crates. This ensures consistency in error handling and prevents
circular dependencies between crates.
*/

pub mod error;
pub mod http;
pub mod server;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{LibrisError, LibrisResult, ResultExt};
pub use http::{
    HttpBody, HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpService,
    HttpStatusCode,
};
pub use server::{HttpServerHandle, run_http_server, start_http_server};
