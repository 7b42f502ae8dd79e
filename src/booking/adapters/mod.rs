//! Adapter implementations for booking ports.

pub mod email;
pub mod memory;
pub mod postgres;
