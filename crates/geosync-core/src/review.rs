// crates/geosync-core/src/review.rs

//! Manual review on top of a finished [`Reconciliation`]: the review queue,
//! the override protocol and the batch summary.

use crate::batch::{Reconciliation, ResultRow, StatusTag};
use crate::error::{GeoSyncError, Result};
use crate::gazetteer::Gazetteer;
use crate::score::weighted_ratio;
use crate::search::Candidate;
use crate::text::fold_key;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A reviewer's decision for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideChoice {
    /// The "no match" sentinel: clear the row.
    NoMatch,
    /// Replace the match with this gazetteer entry.
    Pick(String),
}

impl OverrideChoice {
    /// Parses the textual form used in override files: empty or `-` is the
    /// no-match sentinel, anything else a gazetteer name.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "" | "-" => OverrideChoice::NoMatch,
            name => OverrideChoice::Pick(name.to_string()),
        }
    }
}

/// Counts shown after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub exact: usize,
    pub approximate: usize,
    pub duplicate_of_input: usize,
    pub duplicate_of_target: usize,
    pub not_found: usize,
    pub empty: usize,
    /// Resolved rows that are not duplicates.
    pub exportable: usize,
}

impl BatchSummary {
    pub fn duplicates(&self) -> usize {
        self.duplicate_of_input + self.duplicate_of_target
    }
}

impl Reconciliation {
    /// Applies a reviewer's choice to a row and returns the updated row.
    ///
    /// Picking an entry recomputes id, region, score and `changed` from the
    /// gazetteer. The row keeps a duplicate tag; otherwise its status follows
    /// the score (the reviewer's choice is accepted whatever the threshold),
    /// unless another non-duplicate row already holds the picked target, in
    /// which case the row becomes `DuplicateOfTarget`. The sentinel clears
    /// the row to `NotFound`.
    pub fn apply_override(
        &mut self,
        gazetteer: &Gazetteer,
        row_id: usize,
        choice: OverrideChoice,
    ) -> Result<&ResultRow> {
        let exact_score = self.config.exact_score;
        let current = self
            .rows
            .get(row_id)
            .ok_or(GeoSyncError::UnknownRow(row_id))?;
        if current.status == StatusTag::Empty {
            return Err(GeoSyncError::BlankRow(row_id));
        }

        match &choice {
            OverrideChoice::NoMatch => {
                let row = &mut self.rows[row_id];
                row.clear_target();
                row.status = StatusTag::NotFound;
            }
            OverrideChoice::Pick(name) => {
                let record = gazetteer
                    .get(name)
                    .ok_or_else(|| GeoSyncError::UnknownArea(name.clone()))?;
                let claimed = self.target_holder(&record.display_name, row_id).is_some();

                let row = &mut self.rows[row_id];
                let score = weighted_ratio(&row.original, &record.display_name);
                row.set_target(record, score);
                if !row.status.is_duplicate() {
                    row.status = if claimed {
                        StatusTag::DuplicateOfTarget
                    } else {
                        StatusTag::for_score(score, exact_score)
                    };
                }
            }
        }
        debug!(row_id, ?choice, status = %self.rows[row_id].status, "override applied");
        self.overrides.insert(row_id, choice);
        Ok(&self.rows[row_id])
    }

    /// The non-duplicate row other than `except` resolved to `target`.
    fn target_holder(&self, target: &str, except: usize) -> Option<usize> {
        let key = fold_key(target);
        self.rows
            .iter()
            .filter(|r| r.row_id != except && !r.status.is_duplicate())
            .find(|r| r.resolved_name.as_deref().is_some_and(|n| fold_key(n) == key))
            .map(|r| r.row_id)
    }

    /// Overrides applied so far, by row id.
    pub fn overrides(&self) -> impl Iterator<Item = (usize, &OverrideChoice)> + '_ {
        self.overrides.iter().map(|(&id, choice)| (id, choice))
    }

    /// Non-blank rows scoring at or below the review cutoff, with their
    /// candidate lists.
    pub fn review_queue(&self) -> Vec<(&ResultRow, &[Candidate])> {
        self.rows
            .iter()
            .filter(|r| r.status != StatusTag::Empty && r.score <= self.config.review_max_score)
            .map(|r| (r, self.candidates(r.row_id)))
            .collect()
    }

    /// Rows that carry a resolution and are not duplicates.
    pub fn exportable(&self) -> impl Iterator<Item = &ResultRow> + '_ {
        self.rows
            .iter()
            .filter(|r| r.is_resolved() && !r.status.is_duplicate())
    }

    pub fn summary(&self) -> BatchSummary {
        let mut s = BatchSummary {
            total: self.rows.len(),
            ..BatchSummary::default()
        };
        for row in &self.rows {
            match row.status {
                StatusTag::Empty => s.empty += 1,
                StatusTag::Exact => s.exact += 1,
                StatusTag::Approximate => s.approximate += 1,
                StatusTag::NotFound => s.not_found += 1,
                StatusTag::DuplicateOfInput => s.duplicate_of_input += 1,
                StatusTag::DuplicateOfTarget => s.duplicate_of_target += 1,
            }
            if row.is_resolved() && !row.status.is_duplicate() {
                s.exportable += 1;
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_override_text() {
        assert_eq!(OverrideChoice::parse(""), OverrideChoice::NoMatch);
        assert_eq!(OverrideChoice::parse(" - "), OverrideChoice::NoMatch);
        assert_eq!(
            OverrideChoice::parse(" Москва "),
            OverrideChoice::Pick("Москва".into())
        );
    }
}
