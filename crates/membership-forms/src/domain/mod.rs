//! Domain module
//!
//! Field registry aggregate and the pure services that operate on it.

pub mod aggregates;
pub mod events;
pub mod services;
pub mod value_objects;

pub use aggregates::*;
pub use events::*;
pub use value_objects::*;
