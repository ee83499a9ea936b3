//! # HTTP Server Module
//!
//! Combines the book API and the health check into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/createBook`, `/fetchBooks`, `/deleteBook`, `/updateBook`, `/getBook` - Book API

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
