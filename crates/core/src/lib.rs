//! Site content resolution and storage.
//!
//! - [`resolver`] turns a template, a site's saved content and optional
//!   draft edits into the payload a page renderer needs.
//! - [`relational`] converts between the JSON content document and the
//!   normalized page/block rows.
//! - [`store`] is the persistence seam both build on.

pub mod error;
pub mod events;
pub mod model;
pub mod pages;
pub mod relational;
pub mod render;
pub mod resolver;
pub mod store;

pub use error::{StoreError, StoreResult, SyncError};
pub use render::SiteRenderService;
