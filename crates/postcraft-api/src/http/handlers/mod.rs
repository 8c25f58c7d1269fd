//! HTTP request handlers for the REST API.

pub mod generate;
pub mod platforms;
pub mod saved;
pub mod stats;
pub mod text;
