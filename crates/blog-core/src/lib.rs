//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains the post request handler and the ports it talks through,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod handler;
pub mod ports;

pub use error::DomainError;
pub use handler::{PostHandler, RequestMethod};
