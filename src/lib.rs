//! Cupcake - terminal cupcake ordering
//!
//! A small ordering wizard: pick a quantity, a flavor and a pickup date,
//! review the price and send the order on.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
