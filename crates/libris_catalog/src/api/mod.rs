/* # Why an API module in libris_catalog?

The api module provides the HTTP service that exposes the catalog via REST
endpoints. The service implements the HttpService trait from libris_base, so
it can be driven by the real tiny_http server or directly by tests with
constructed requests.
*/

mod service;

pub use service::CatalogService;
