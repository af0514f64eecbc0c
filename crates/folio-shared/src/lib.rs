//! # Folio Shared
//!
//! Wire types shared between the server and any Rust client.
//! Kept free of server dependencies so it can compile for WASM.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
