// crates/geosync-core/src/batch.rs
use crate::config::MatchConfig;
use crate::error::{GeoSyncError, Result};
use crate::gazetteer::{AreaRecord, Gazetteer};
use crate::resolver::{MatchResult, Resolver};
use crate::search::Candidate;
use crate::text::fold_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::{info, warn};

/// Classification of one output row. Duplicate tags win over match quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Empty,
    Exact,
    Approximate,
    NotFound,
    DuplicateOfInput,
    DuplicateOfTarget,
}

impl StatusTag {
    /// Match-quality tag for a raw similarity score.
    pub fn for_score(score: f64, exact_score: f64) -> Self {
        if score >= exact_score {
            StatusTag::Exact
        } else {
            StatusTag::Approximate
        }
    }

    pub fn is_duplicate(self) -> bool {
        matches!(self, StatusTag::DuplicateOfInput | StatusTag::DuplicateOfTarget)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusTag::Empty => "empty",
            StatusTag::Exact => "exact",
            StatusTag::Approximate => "approximate",
            StatusTag::NotFound => "not_found",
            StatusTag::DuplicateOfInput => "duplicate_of_input",
            StatusTag::DuplicateOfTarget => "duplicate_of_target",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row per input element, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Input position; the join key for manual overrides.
    pub row_id: usize,
    pub original: String,
    pub resolved_name: Option<String>,
    pub resolved_id: Option<String>,
    /// Parent area of the resolved entry.
    pub region: Option<String>,
    /// Similarity of the match rounded to one decimal, 0 without a match.
    pub score: f64,
    pub changed: bool,
    pub status: StatusTag,
}

impl ResultRow {
    fn unresolved(row_id: usize, original: String, status: StatusTag) -> Self {
        Self {
            row_id,
            original,
            resolved_name: None,
            resolved_id: None,
            region: None,
            score: 0.0,
            changed: false,
            status,
        }
    }

    /// Fills the geo fields from a gazetteer record and recomputes `changed`.
    pub(crate) fn set_target(&mut self, record: &AreaRecord, score: f64) {
        self.resolved_name = Some(record.display_name.clone());
        self.resolved_id = Some(record.id.clone());
        self.region = record.parent().map(str::to_string);
        self.score = round1(score);
        self.changed = is_changed(&self.original, Some(&record.display_name));
    }

    pub(crate) fn clear_target(&mut self) {
        self.resolved_name = None;
        self.resolved_id = None;
        self.region = None;
        self.score = 0.0;
        self.changed = false;
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_name.is_some()
    }
}

/// Mechanical change flag: a match exists and the trimmed strings differ.
pub fn is_changed(original: &str, resolved: Option<&str>) -> bool {
    resolved.is_some_and(|r| original.trim() != r.trim())
}

fn round1(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Progress of the resolution phase of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Distinct inputs resolved so far.
    pub done: usize,
    /// Distinct non-blank inputs in the batch.
    pub total: usize,
}

/// Result of one batch run: the rows plus what a reviewer needs afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    pub(crate) rows: Vec<ResultRow>,
    pub(crate) candidates: BTreeMap<usize, Vec<Candidate>>,
    pub(crate) overrides: BTreeMap<usize, crate::review::OverrideChoice>,
    pub(crate) config: MatchConfig,
}

impl Reconciliation {
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn row(&self, row_id: usize) -> Option<&ResultRow> {
        self.rows.get(row_id)
    }

    /// Ranked word-prefix candidates used for a row, for manual override.
    pub fn candidates(&self, row_id: usize) -> &[Candidate] {
        self.candidates
            .get(&row_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }
}

/// Drives the resolver over a batch and classifies duplicates.
#[derive(Debug, Clone)]
pub struct Reconciler<'g> {
    gazetteer: &'g Gazetteer,
    config: MatchConfig,
}

impl<'g> Reconciler<'g> {
    /// Fails with [`GeoSyncError::EmptyGazetteer`] on an empty index.
    pub fn new(gazetteer: &'g Gazetteer, config: MatchConfig) -> Result<Self> {
        if gazetteer.is_empty() {
            return Err(GeoSyncError::EmptyGazetteer);
        }
        Ok(Self { gazetteer, config })
    }

    pub fn gazetteer(&self) -> &'g Gazetteer {
        self.gazetteer
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn resolver(&self) -> Resolver<'g, Gazetteer> {
        Resolver::new(self.gazetteer, self.config.clone())
    }

    /// Resolves a single input without any batch bookkeeping.
    pub fn resolve(&self, input: &str) -> MatchResult {
        self.resolver().resolve(input)
    }

    pub fn reconcile<I, S>(&self, inputs: I) -> Reconciliation
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        self.reconcile_with_progress(inputs, &|_| {})
    }

    /// Runs a batch, reporting progress after every resolved distinct input.
    ///
    /// Each distinct trimmed-lowercased input is resolved once (on the rayon
    /// pool with the `parallel` feature); duplicates are then classified in a
    /// single sequential pass in input order, first occurrence wins.
    pub fn reconcile_with_progress<I, S>(
        &self,
        inputs: I,
        progress: &(dyn Fn(Progress) + Sync),
    ) -> Reconciliation
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let inputs: Vec<Option<String>> = inputs
            .into_iter()
            .map(|raw| raw.map(|s| s.as_ref().to_string()))
            .collect();

        let mut distinct: Vec<&str> = Vec::new();
        let mut slot: HashMap<String, usize> = HashMap::new();
        for text in inputs.iter().flatten() {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            slot.entry(fold_key(trimmed)).or_insert_with(|| {
                distinct.push(trimmed);
                distinct.len() - 1
            });
        }

        info!(rows = inputs.len(), distinct = distinct.len(), threshold = %self.config.threshold, "reconciling batch");
        let resolved = self.resolve_distinct(&distinct, progress);

        let mut out = Reconciliation {
            rows: Vec::with_capacity(inputs.len()),
            candidates: BTreeMap::new(),
            overrides: BTreeMap::new(),
            config: self.config.clone(),
        };
        let mut seen_by_input: HashMap<String, usize> = HashMap::new();
        let mut seen_by_target: HashSet<String> = HashSet::new();

        for (row_id, raw) in inputs.iter().enumerate() {
            let text = raw.as_deref().map(str::trim).unwrap_or("");
            if text.is_empty() {
                let original = raw.clone().unwrap_or_default();
                out.rows.push(ResultRow::unresolved(row_id, original, StatusTag::Empty));
                continue;
            }
            let key = fold_key(text);

            if let Some(&prior) = seen_by_input.get(&key) {
                let first = &out.rows[prior];
                let row = ResultRow {
                    row_id,
                    original: text.to_string(),
                    resolved_name: first.resolved_name.clone(),
                    resolved_id: first.resolved_id.clone(),
                    region: first.region.clone(),
                    score: first.score,
                    changed: is_changed(text, first.resolved_name.as_deref()),
                    status: StatusTag::DuplicateOfInput,
                };
                let candidates = out.candidates.get(&prior).cloned().unwrap_or_default();
                out.candidates.insert(row_id, candidates);
                out.rows.push(row);
                continue;
            }

            let Some(result) = slot.get(&key).and_then(|&i| resolved.get(i)) else {
                out.rows.push(ResultRow::unresolved(row_id, text.to_string(), StatusTag::NotFound));
                continue;
            };
            out.candidates.insert(row_id, result.candidates.clone());

            let record = result
                .matched_name
                .as_deref()
                .and_then(|name| self.gazetteer.get(name));
            let Some(record) = record else {
                if let Some(name) = &result.matched_name {
                    warn!(row_id, name = %name, "matched name missing from gazetteer");
                }
                out.rows.push(ResultRow::unresolved(row_id, text.to_string(), StatusTag::NotFound));
                continue;
            };

            let mut row = ResultRow::unresolved(row_id, text.to_string(), StatusTag::NotFound);
            row.set_target(record, result.score);
            row.status = if seen_by_target.insert(fold_key(&record.display_name)) {
                StatusTag::for_score(result.score, self.config.exact_score)
            } else {
                StatusTag::DuplicateOfTarget
            };
            seen_by_input.insert(key, row_id);
            out.rows.push(row);
        }

        let summary = out.summary();
        info!(
            total = summary.total,
            exact = summary.exact,
            approximate = summary.approximate,
            duplicates = summary.duplicates(),
            not_found = summary.not_found,
            "batch reconciled"
        );
        out
    }

    #[cfg(not(feature = "parallel"))]
    fn resolve_distinct(
        &self,
        distinct: &[&str],
        progress: &(dyn Fn(Progress) + Sync),
    ) -> Vec<MatchResult> {
        let resolver = self.resolver();
        let total = distinct.len();
        distinct
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let result = resolver.resolve(input);
                progress(Progress { done: i + 1, total });
                result
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn resolve_distinct(
        &self,
        distinct: &[&str],
        progress: &(dyn Fn(Progress) + Sync),
    ) -> Vec<MatchResult> {
        use rayon::prelude::*;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let resolver = self.resolver();
        let total = distinct.len();
        let done = AtomicUsize::new(0);
        distinct
            .par_iter()
            .map(|input| {
                let result = resolver.resolve(input);
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                progress(Progress { done: n, total });
                result
            })
            .collect()
    }
}
