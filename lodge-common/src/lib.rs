//! # Lodge Common Library
//!
//! Shared code for the lodge services including:
//! - Error and result types
//! - Bootstrap configuration loading
//! - Database initialization and declarative table schemas
//! - Event types (LodgeEvent enum) and the EventBus
//! - SSE helpers

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod sse;

pub use error::{Error, Result};
