//! Source file registry.
//!
//! Every buffer the compiler reads (files, standard input, in-memory test
//! sources) is registered here and addressed by a `FileId`. Positions are
//! byte offsets into those buffers; this module translates them back into
//! file names, lines and columns for diagnostics.

pub mod source_map;
