//! Byte-level PDF writing primitives: the token writer and the cross-reference table.
//!
//! Object lifecycle, offset recording, and document assembly live in
//! [`crate::registry`] and [`crate::document`]; this module only knows how to
//! count bytes and format xref lines.

mod sink;
mod xref;

pub use sink::TokenSink;
pub use xref::{XrefEntry, XrefTable};
