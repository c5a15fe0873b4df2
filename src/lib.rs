//! # phpgen
//!
//! **phpgen** generates PHP source files from a UML model: packages become
//! directories, classes, interfaces, enumerations and annotation types
//! become one `.php` file each.
//!
//! ## Overview
//!
//! The model arrives as an immutable [`model::ModelGraph`], an element
//! arena plus typed edge tables for generalization, interface realization
//! and association, normally loaded from a JSON model document with
//! [`model::load_model`]. The [`generator`] walks the graph depth-first,
//! synthesizing constructors, member variables, method stubs and
//! de-duplicated inherited overrides, and emits each unit through the
//! [`writer::CodeWriter`] line buffer.
//!
//! ## Modules
//!
//! - **[`model`]** - model graph types, relationship queries and the JSON
//!   document loader
//! - **[`generator`]** - the walker, per-kind emitters, member synthesis,
//!   namespace resolution and generation options
//! - **[`writer`]** - indentation-aware line buffer with named deferred
//!   insertion sections
//! - **[`cli`]** - clap-based command line used by the `phpgen` binary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use phpgen::generator::{generate, GenOptions};
//! use phpgen::model::load_model;
//!
//! # fn main() -> anyhow::Result<()> {
//! let graph = load_model("model.json".as_ref())?;
//! generate(&graph, graph.root(), "out".as_ref(), &GenOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! A run fully materializes the output: every package directory must not
//! exist yet, every unit file is overwritten, and the first failure aborts
//! the run.

pub mod cli;
pub mod generator;
pub mod model;
pub mod writer;

pub use generator::{emit_unit, generate, GenOptions};
pub use model::{load_model, ModelGraph};
pub use writer::CodeWriter;
