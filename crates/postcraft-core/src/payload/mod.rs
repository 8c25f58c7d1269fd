//! Payload construction: instruction block, serialized input and inline
//! image parts.

pub mod builder;
pub mod data_url;
pub mod instructions;

pub use builder::{PayloadBuilder, PromptInput};
