// crates/geosync-core/src/search.rs
use crate::gazetteer::{AreaRecord, Gazetteer};
use crate::score::weighted_ratio;
use crate::text::{base_name, fold_key};
use crate::traits::GazetteerSearch;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A gazetteer name proposed for an input, with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub score: f64,
}

impl Candidate {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Stable descending sort: equal scores keep index order.
fn rank(mut out: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    out.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    out.truncate(limit);
    out
}

impl GazetteerSearch for Gazetteer {
    fn word_candidates(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let Some(first) = query.split_whitespace().next() else {
            return Vec::new();
        };
        let first = first.to_lowercase();
        let query = query.to_lowercase();

        let out = self
            .names()
            .filter(|name| name.to_lowercase().contains(&first))
            .map(|name| Candidate::new(name, weighted_ratio(&query, name)))
            .collect();
        rank(out, limit)
    }

    fn top_candidates(&self, query: &str, k: usize) -> Vec<Candidate> {
        if k == 0 || query.trim().is_empty() {
            return Vec::new();
        }
        let out = self
            .names()
            .map(|name| Candidate::new(name, weighted_ratio(query, name)))
            .collect();
        rank(out, k)
    }

    fn exact_base_matches(&self, city: &str) -> Vec<&AreaRecord> {
        let q = fold_key(city);
        if q.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|r| base_name(&r.display_name).to_lowercase() == q)
            .collect()
    }
}
