//! Cross-target declaration commonizer.
//!
//! Given the same API surface compiled separately for N targets, computes
//! one common declaration tree that soundly abstracts all N. Every
//! declaration either gets a common projection or stays platform-specific.
//!
//! # Layers
//!
//! - [`core`]: incremental, associative and batch commonizer shapes and the
//!   adapters between them
//! - [`lattice`] and [`annotations`]: visibility, modality, deprecation and
//!   marker annotations
//! - [`types`]: structural type unification with alias substitution,
//!   platform-width integers and optimistic numeric widening
//! - [`members`] and [`supertypes`]: declaration assembly
//! - [`tree`]: merge-by-signature arena and the top-down driver
//!
//! # Errors
//!
//! A mismatch between targets is never an error; it is `Ok(None)` or an
//! absent node. [`CommonizerError`] is reserved for contract violations and
//! aborts the run.
//!
//! # Usage
//!
//! Build a [`CommonizerInput`] with one [`TargetInput`] per target and call
//! [`commonize`]. The library logs through `tracing` and never installs a
//! subscriber.

pub mod annotations;
mod api;
mod context;
pub mod core;
mod error;
pub mod lattice;
pub mod members;
mod settings;
mod stack;
pub mod supertypes;
pub mod tree;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::{commonize, CommonizerInput, TargetInput};
pub use context::CommonizerContext;
pub use error::{CommonizeResult, CommonizerError};
pub use settings::CommonizerSettings;
pub use tree::{CirNode, CommonizedTree, MergedTree, NodeId, NodeKey};
pub use types::{CommonType, TypeCommonizer, TypeCommonizerOptions};
