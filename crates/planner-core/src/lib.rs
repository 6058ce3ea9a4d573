//! Core types and trait definitions for the planner backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod event;
pub mod journal;
pub mod patch;
pub mod recurrence;
pub mod store;
pub mod task;
pub mod time;

pub use error::{Error, Result};
