//! Networking modules for the REST boundary.
//!
//! DESIGN
//! ======
//! `types` holds the wire DTOs shared with the backend; `api` is the HTTP
//! client and the collaborator traits the flows depend on, so tests can
//! swap the transport for in-process fakes.

pub mod api;
pub mod types;
