//! # Blog Shared
//!
//! Wire types shared between the server and anything that talks to it.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
