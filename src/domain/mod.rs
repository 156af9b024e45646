//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `payment` - Checkout token claims, payment transactions and their lifecycle

pub mod foundation;
pub mod payment;
