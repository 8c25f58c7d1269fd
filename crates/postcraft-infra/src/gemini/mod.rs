//! Gemini generation backend.

pub mod client;
pub mod types;

pub use client::GeminiGenerator;
