//! Nelo checkout integration.
//!
//! Opens hosted checkout sessions with Nelo, charges the order (auth then
//! capture) when the provider redirects the buyer back, and moves the
//! payment transaction to its final state exactly once.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
