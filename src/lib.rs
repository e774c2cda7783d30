//! Blockfall (workspace facade crate).
//!
//! Re-exports the `blockfall::{core,engine,input,term,types}` API from the
//! dedicated crates under `crates/`, and hosts the action log [`runtime`] used
//! by the terminal binary.

pub mod runtime;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
