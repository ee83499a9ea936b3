//! bookshelf - a small REST service for books and their authors
//!
//! Books reference an author record. Authors are found by name or
//! created on the fly when a book is added, and removed together with
//! their last book.

pub mod cli;
pub mod http_server;
pub mod model;
pub mod rest_api;
pub mod store;
pub mod validation;
