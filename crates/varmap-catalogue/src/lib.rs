#![deny(unsafe_code)]

pub mod catalogue;
pub mod error;
pub mod query;
mod seed;
pub mod tree;

pub use catalogue::Catalogue;
pub use error::{CatalogueError, Result};
pub use query::{
    ALL_SYSTEMS, DEFAULT_CATEGORY, add_manual_row, apply_organ_system_filter, apply_search,
    delete_rows, filter_by_sources, label_for, to_export_row,
};
pub use tree::{GroupNode, OrganSystemNode, build_tree};
