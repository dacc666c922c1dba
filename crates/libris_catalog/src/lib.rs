pub mod api;
pub mod book;
pub mod config;
pub mod store;

pub use api::CatalogService;
pub use book::{Book, BookDraft, BookId};
pub use config::Config;
pub use store::{BookStore, InMemoryStore, StoreHandle};
