//! Binding files: the raw per-control records and their parser.

mod document;
mod parser;

pub use document::{DocumentNode, XmlElement};
pub use parser::{
    InputRef, RawBinding, UNBOUND_SENTINEL, bindings_from_document, parse_bindings,
    parse_bindings_str,
};
