//! Infrastructure layer for Postcraft.
//!
//! Contains implementations of the ports defined in `postcraft-core`: the
//! Gemini content generator and SQLite storage for saved outputs, plus
//! config loading, data directory and API key resolution, and reading
//! image files as data URLs.

pub mod config;
pub mod filesystem;
pub mod gemini;
pub mod image;
pub mod secret;
pub mod sqlite;
