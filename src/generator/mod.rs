//! # Generator Module
//!
//! Turns a [`crate::model::ModelGraph`] into a tree of PHP source files.
//!
//! ## Architecture
//!
//! ```text
//! Model Graph → Walker → Per-kind Emitters → Member Synthesis → CodeWriter
//! ```
//!
//! 1. **Walker** ([`generate`]) - creates one directory per package and
//!    dispatches each classifier to its emitter, persisting one file per
//!    unit in model order.
//! 2. **Emitters** ([`emit_unit`]) - build the `<?php` header, namespace
//!    declaration and kind-specific body (class / interface / enumeration /
//!    annotation type) in an in-memory [`crate::writer::CodeWriter`].
//! 3. **Member synthesis** ([`members`]) - derives constructors, member
//!    variables (attributes and navigable association ends), method stubs
//!    and de-duplicated overrides inherited from a superclass and realized
//!    interfaces.
//! 4. **Name resolution** ([`names`]) - computes package namespaces and
//!    renders type references relative or absolute.
//!
//! A run is single-threaded and depth-first: each package directory exists
//! before its descendants are emitted, each unit is fully built in memory
//! before it is written, and the first failure aborts the run.

pub mod emit;
pub mod generate;
pub mod members;
pub mod names;
pub mod options;

pub use emit::emit_unit;
pub use generate::{generate, unit_file_path};
pub use options::GenOptions;
