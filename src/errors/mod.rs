//! Error types and diagnostic collection.
//!
//! `errors` holds the error catalog: every diagnostic the front end can
//! produce, with its stable key, level and human suggestion. `diagnostics`
//! holds the engine that counts reported errors and decides when a
//! compilation has to stop.

pub mod diagnostics;
pub mod errors;
