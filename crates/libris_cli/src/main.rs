/* # Why is the CLI minimal and hardcoded?

The CLI takes no arguments. The only knob is the listening port, read from the
PORT environment variable, so running the service is just `libris`. The store
starts with the two seed records and lives for the lifetime of the process;
there is no persistence across restarts.

Exit codes:
- 0: never reached in normal operation (the server runs until terminated)
- 1: startup error (bad configuration or failure to bind the port)
*/

use std::process;

use libris_base::http::HttpServerConfig;
use libris_base::server::run_http_server;
use libris_base::tracing::init_tracing;
use libris_catalog::store::{InMemoryStore, StoreHandle};
use libris_catalog::{CatalogService, Config};
use tracing::info;

fn main() {
    init_tracing().unwrap();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to read configuration: {}", e);
            process::exit(1);
        }
    };

    let store = StoreHandle::new(InMemoryStore::seeded());
    let service = CatalogService::new(store);

    let server_config = HttpServerConfig::default().with_port(config.port);
    info!(port = config.port, "starting catalog service");
    println!("Server is running on http://{}", server_config.address());

    if let Err(e) = run_http_server(Box::new(service), server_config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
