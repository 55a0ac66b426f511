//! Conversion between the JSON content document and the relational
//! page/block rows.

pub mod plan;
pub mod rebuild;
pub mod service;

pub use plan::{flatten_tree, plan_pages};
pub use rebuild::build_document;
pub use service::{RelationalSync, SyncSummary};
