//! Step definitions for allocation booking BDD scenarios.

pub mod then;
pub mod when;
pub mod world;
