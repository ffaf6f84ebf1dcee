//! Data model for catalog records and reconstructed text units.
//!
//! Both record types are plain values: the catalog parser produces
//! [`CatalogRecord`]s, the section-tree reconstructor produces [`TextUnit`]s
//! that refer back to their document through a [`DocumentRef`].

mod catalog;
mod record;
mod unit;

pub use catalog::{Catalog, RejectedEntry};
pub use record::CatalogRecord;
pub use unit::{DocumentRef, Heading, SectionPath, TextUnit, UnitKind, SENTENCE_TERMINATORS};
