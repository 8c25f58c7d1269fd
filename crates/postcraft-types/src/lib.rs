//! Shared domain types for Postcraft.
//!
//! This crate contains the data shapes used across the Postcraft workspace:
//! the platform catalog, the campaign input record, generated and saved
//! outputs, the parsed display record, the generation payload, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod parsed;
pub mod payload;
pub mod platform;
pub mod structured;
