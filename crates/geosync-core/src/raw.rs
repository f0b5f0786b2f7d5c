// crates/geosync-core/src/raw.rs
use serde::{Deserialize, Serialize};

/// One node of the gazetteer tree as it comes from the source JSON:
///
/// ```json
/// { "id": "1", "name": "Москва", "parent_id": null, "areas": [] }
/// ```
///
/// Upstream dumps use `areas` for the child list; `children` is accepted too.
/// Numeric ids are accepted and kept as their decimal text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaRaw {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "children")]
    pub areas: Vec<AreaRaw>,
}

impl AreaRaw {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            areas: Vec::new(),
        }
    }

    /// Builder-style helper used by tests and demos.
    pub fn with_children(mut self, children: Vec<AreaRaw>) -> Self {
        self.areas = children;
        self
    }
}

fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}
