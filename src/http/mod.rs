//! HTTP protocol implementation.
//!
//! This module implements an HTTP/1.0 and HTTP/1.1 server limited to the
//! GET, HEAD and OPTIONS methods, with persistent-connection support.
//!
//! # Architecture
//!
//! - **`connection`**: the connection lifecycle manager driving the
//!   serving loop and the keep-alive decision
//! - **`parser`**: request-line validation against the accepted grammar
//! - **`request`**: method, version and request representations
//! - **`response`**: status vocabulary and response head construction
//! - **`writer`**: serializes single-shot responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a request line + blank line
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Validate, guard, build response
//!        └──────┬───────────┘
//!               │
//!               ├─ HEAD / OPTIONS / error → single-shot write
//!               └─ GET → transfer scheduler (chunked, round-robin)
//!               │ Response fully sent
//!               ▼
//!        ┌──────────────────┐
//!        │   Persistence    │
//!        └──────┬───────────┘
//!               ├─ HTTP/1.1 → Reading (adaptive keep-alive wait)
//!               └─ otherwise → Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
