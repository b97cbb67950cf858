//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the order state holder, the screen flow over it, and the session state
//! the UI renders.

pub mod order;
pub mod flow;
pub mod state;

pub use order::*;
pub use flow::*;
pub use state::*;
