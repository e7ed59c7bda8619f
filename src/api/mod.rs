//! API module containing route handlers and initialization logic
//!
//! This module is responsible for:
//! - Composing documented sub-routers under prefixes and tags
//! - Initializing the application router and its middleware
//! - Providing API documentation through the index and docs endpoints

/// Sub-routers and the API router that mounts them
pub mod endpoints;

/// Route handlers for service endpoints
pub mod handlers;

/// API documentation and index endpoint
pub mod index;

/// Router initialization and configuration
pub mod init;

/// Prefix and tag composition of documented routers
pub mod router;

// Re-export the app initialization function for easier access
pub use init::{initialize_app, App};
