//! edbv-core - UI-agnostic binding model, control mapping and table projection.

pub mod bindings;
pub mod error;
pub mod library;
pub mod mapping;
pub mod storage;
pub mod view;
pub mod viewer;

pub use bindings::{InputRef, RawBinding, UNBOUND_SENTINEL, parse_bindings, parse_bindings_str};
pub use error::{Result, ViewerError};
pub use library::{BindingFile, BindingLibrary};
pub use mapping::{MappingEntry, MappingTable, load_mappings};
pub use view::{DisplayRow, ViewState, project};
pub use viewer::Viewer;
