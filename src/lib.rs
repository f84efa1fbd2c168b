//! shopdesk — command-line admin for the catalog backend
//!
//! Shared between the binary and the integration tests.

pub mod commands;
pub mod format;
