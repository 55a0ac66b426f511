pub mod rows;
pub mod seo;
pub mod site;
pub mod template;
pub mod validate;

pub use rows::{BlockPlan, PagePlan, SiteBlockRow, SitePageRow};
pub use seo::SeoMeta;
pub use site::Site;
pub use template::{Template, TemplatePage};

/// Slug of the home page. Always present and always active.
pub const INDEX_SLUG: &str = "index";
