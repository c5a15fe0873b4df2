//! # Model Module
//!
//! Immutable, caller-supplied UML model graph consumed by the generator.
//!
//! The graph is an arena of [`Element`] records addressed by [`ElementId`],
//! plus typed edge tables for generalization, interface realization and
//! association. Elements are created once (normally by [`load_model`]) and
//! never mutated during a generation run; the generator only derives text
//! from them.

mod load;
mod types;

pub use load::{load_model, load_model_str, load_model_value};
pub use types::*;
