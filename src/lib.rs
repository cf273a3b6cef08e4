//! staticd - HTTP/1.0 and HTTP/1.1 static file server
//!
//! Core library for request parsing, filesystem access checks, and the
//! chunked transfer scheduler.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
pub mod transfer;
