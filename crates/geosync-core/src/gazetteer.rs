// crates/geosync-core/src/gazetteer.rs
use crate::raw::AreaRaw;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A flattened gazetteer entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRecord {
    pub id: String,
    pub display_name: String,
    /// Display name of the immediate ancestor; empty for roots.
    pub parent_name: String,
}

impl AreaRecord {
    pub fn name(&self) -> &str {
        &self.display_name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parent display name, `None` for root areas.
    pub fn parent(&self) -> Option<&str> {
        if self.parent_name.is_empty() {
            None
        } else {
            Some(&self.parent_name)
        }
    }
}

/// Flat `display_name -> AreaRecord` index built from the hierarchical tree.
///
/// Entries are kept in tree-walk order. When two nodes share a display name
/// the name keeps the position of its first occurrence while the record is
/// replaced by the later node, so iteration order is fully determined by the
/// source tree and never by hashing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Gazetteer {
    records: Vec<AreaRecord>,
    index: HashMap<String, usize>,
}

impl Gazetteer {
    /// Depth-first flattening of the area tree.
    pub fn from_tree(roots: &[AreaRaw]) -> Self {
        let mut gz = Gazetteer::default();
        gz.walk(roots, "");
        gz
    }

    fn walk(&mut self, nodes: &[AreaRaw], parent_name: &str) {
        for node in nodes {
            self.insert(AreaRecord {
                id: node.id.clone(),
                display_name: node.name.clone(),
                parent_name: parent_name.to_string(),
            });
            if !node.areas.is_empty() {
                self.walk(&node.areas, &node.name);
            }
        }
    }

    fn insert(&mut self, record: AreaRecord) {
        match self.index.get(&record.display_name) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index
                    .insert(record.display_name.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact lookup by display name.
    pub fn get(&self, name: &str) -> Option<&AreaRecord> {
        self.index.get(name).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All records in tree-walk order.
    pub fn iter(&self) -> std::slice::Iter<'_, AreaRecord> {
        self.records.iter()
    }

    /// All display names in tree-walk order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.display_name.as_str())
    }
}

impl<'a> IntoIterator for &'a Gazetteer {
    type Item = &'a AreaRecord;
    type IntoIter = std::slice::Iter<'a, AreaRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
