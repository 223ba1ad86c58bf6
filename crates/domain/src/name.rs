//! Domain-name labels: the shared-suffix label arena used for compressed
//! writing, the pointer-following reader and the single-pass matcher.

mod label;
mod matcher;
mod reader;

pub use label::{InstanceRecords, LabelArena, LabelId, LabelKind, NameLabel};
pub use matcher::NameMatcher;
pub use reader::NameReader;
