//! Catalog and document parsers.

mod catalog;
mod options;
mod outline;
mod reconstruct;

pub use catalog::{extract_index_text, split_title, CatalogParser};
pub use options::{CatalogOptions, ErrorMode, ReconstructOptions};
pub use outline::{Frame, SectionStack, Step};
pub use reconstruct::{indent_width, SectionReconstructor};
