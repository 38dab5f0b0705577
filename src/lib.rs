//! # eventify
//!
//! Client core for the student event discovery and registration app.
//!
//! This crate holds the data model shared with the backend, the REST client,
//! persisted client state, and the three coordinated flows the UI layers sit
//! on: the debounced Search Coordinator, the multi-page Registration Session,
//! and the Auth Session Cache. Rendering is left to whichever front end drives
//! these types (the `cli` package is one).

pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod net;
pub mod routes;
pub mod state;
pub mod storage;
pub mod toast;
pub mod util;
