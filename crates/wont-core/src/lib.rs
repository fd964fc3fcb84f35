//! Core types and trait definitions for the Wont habit tracker.
//!
//! This crate is deliberately free of database dependencies. The storage
//! backend (`wont-store-sqlite`) and the CLI depend on it; it depends on
//! nothing heavier than `chrono` and `serde`.

pub mod error;
pub mod event;
pub mod habit;
pub mod store;
pub mod streak;
pub mod track;

pub use error::{Error, Result};
