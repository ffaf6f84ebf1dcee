//! Post-processing and output rendering for reconstructed units.

mod annotate;
mod cleanup;
mod json;
mod merge;
mod result;
mod text;

pub use annotate::about_unit;
pub use cleanup::{
    collapse_whitespace, space_ratio, special_ratio, strip_leading_number, CleanupOptions,
    CleanupPipeline,
};
pub use json::{from_json_lines, to_json, to_json_lines, JsonFormat};
pub use merge::{is_continuation, merge_paragraphs};
pub use result::{ReconstructStats, Reconstruction};
pub use text::{to_lines, to_text, write_text};
