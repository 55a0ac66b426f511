//! Block-tree content model shared by the resolver and the relational sync.
//!
//! Page content is a recursive tree of typed blocks (`{id, type, data, children}`).
//! Stored documents are untrusted JSON, so everything here reads them
//! leniently: absent or malformed sections degrade to empty values.

pub mod access;
pub mod block;
pub mod walk;

pub use block::Block;
