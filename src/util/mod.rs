//! Small shared helpers for route guards and background tasks.

pub mod auth;
pub mod task;
