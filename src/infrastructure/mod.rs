//! Infrastructure layer providing external service integrations.
//!
//! Configuration files, log output and the share targets that receive
//! finished orders.

pub mod config;
pub mod logging;
pub mod share;

pub use config::*;
pub use share::*;
