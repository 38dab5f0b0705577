//! Coordinated client-side flows.
//!
//! DESIGN
//! ======
//! State is split by flow (`auth`, `search`, `registration`) so each front
//! end page depends on one small model. Every flow takes its collaborators
//! as constructor arguments; nothing here reaches for globals.

pub mod auth;
pub mod registration;
pub mod search;
