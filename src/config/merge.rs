//! Merge rules applied before any source is layered on.

mod merge_policy;

pub use merge_policy::builder_with_defaults;
