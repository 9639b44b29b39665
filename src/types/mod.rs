//! The canonical type system.
//!
//! Every type is owned by a [`interner::TypeInterner`] and referred to by a
//! small [`types::TypeId`] handle. Structurally equal types always get the
//! same handle, so comparing types is comparing handles.

pub mod interner;
pub mod types;
