//! RateHub Common Types
//!
//! This crate contains shared types used across RateHub, including
//! currencies, monetary amounts, exchange rates and the currency registry.

pub mod monetary;
pub mod rate;
pub mod registry;

pub use monetary::*;
pub use rate::*;
pub use registry::*;
