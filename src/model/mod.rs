//! Core data model types: raw message buffers, header maps and normalized posts.

pub mod headers;
pub mod message;
