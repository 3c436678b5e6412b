//! Ports module (Hexagonal Architecture)
//!
//! Interfaces to the external persistence and intake collaborators.

pub mod outbound;

pub use outbound::*;
