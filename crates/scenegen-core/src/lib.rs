//! Core types for the scenegen compiler.
//!
//! This crate provides the input side shared by the compiler and the CLI:
//! - the visual node arena and its facets
//! - JSON design documents
//! - the asynchronous host query interface
//! - error types

pub mod document;
pub mod errors;
pub mod host;
pub mod scene;

pub use document::*;
pub use errors::*;
pub use host::*;
pub use scene::*;
