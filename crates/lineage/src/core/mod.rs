//! Core abstractions shared by the layout engine and its front-ends
//!
//! Configuration, error types, logging, the layout trait and the output
//! types a renderer consumes.

mod config;
mod error;
mod layout;
pub mod logging;
mod types;

pub use config::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use types::*;
