//! Business logic and port definitions for Postcraft.
//!
//! Payload building, output parsing, plain-text derivation, response
//! normalization and input editing are pure functions here. The generator
//! and saved-output ports are traits that postcraft-infra implements; this
//! crate depends only on `postcraft-types`, never on `postcraft-infra` or
//! any network/database crate.

pub mod generator;
pub mod input;
pub mod normalize;
pub mod parse;
pub mod payload;
pub mod plain;
pub mod repository;
pub mod service;
