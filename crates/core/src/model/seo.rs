use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use site_composer_blocks::access;

/// Per-page SEO metadata. Every field is independently optional; empty
/// strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeoMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
}

impl SeoMeta {
    /// Read from a stored `pages_meta[slug].seo` object. Unknown keys and
    /// non-string values are ignored.
    pub fn from_value(value: Option<&Value>) -> Self {
        let seo = access::map_or_empty(value);
        let field = |key: &str| access::non_empty_str(seo.get(key)).map(str::to_string);
        Self {
            meta_title: field("meta_title"),
            meta_description: field("meta_description"),
            og_title: field("og_title"),
            og_description: field("og_description"),
            og_image: field("og_image"),
            twitter_card: field("twitter_card"),
            twitter_title: field("twitter_title"),
            twitter_description: field("twitter_description"),
            twitter_image: field("twitter_image"),
            robots: field("robots"),
        }
    }

    fn fields(&self) -> [(&'static str, &Option<String>); 10] {
        [
            ("meta_title", &self.meta_title),
            ("meta_description", &self.meta_description),
            ("og_title", &self.og_title),
            ("og_description", &self.og_description),
            ("og_image", &self.og_image),
            ("twitter_card", &self.twitter_card),
            ("twitter_title", &self.twitter_title),
            ("twitter_description", &self.twitter_description),
            ("twitter_image", &self.twitter_image),
            ("robots", &self.robots),
        ]
    }

    /// Object holding only the non-empty fields.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self.fields() {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                map.insert(key.to_string(), Value::String(value.to_string()));
            }
        }
        Value::Object(map)
    }
}
