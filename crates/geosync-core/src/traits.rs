// crates/geosync-core/src/traits.rs
use crate::gazetteer::AreaRecord;
use crate::search::Candidate;

/// Candidate generation over a name index.
///
/// Implemented for [`crate::Gazetteer`]; the resolver only talks to this
/// trait, so alternative indexes (a filtered subset, a pre-scored cache) can
/// be plugged in without touching the tiering logic.
pub trait GazetteerSearch {
    /// Names containing the first word of `query`, scored against the whole
    /// query, best first, at most `limit` entries.
    ///
    /// Administrative divisions of a city share its first word, so this
    /// narrows a large index to the plausible same-city entries cheaply.
    ///
    /// # Example
    ///
    /// ```
    /// use geosync_core::{AreaRaw, Gazetteer, GazetteerSearch};
    ///
    /// let gz = Gazetteer::from_tree(&[
    ///     AreaRaw::new("1", "Кировск (Ленинградская область)"),
    ///     AreaRaw::new("2", "Кировск (Мурманская область)"),
    ///     AreaRaw::new("3", "Москва"),
    /// ]);
    /// let found = gz.word_candidates("Кировск Мурманская", 20);
    /// assert_eq!(found.len(), 2);
    /// assert_eq!(found[0].name, "Кировск (Мурманская область)");
    /// ```
    fn word_candidates(&self, query: &str, limit: usize) -> Vec<Candidate>;

    /// The `k` best scoring names of the whole index, best first.
    fn top_candidates(&self, query: &str, k: usize) -> Vec<Candidate>;

    /// Records whose base name (before any parenthetical qualifier) equals
    /// `city` case-insensitively, in index order.
    fn exact_base_matches(&self, city: &str) -> Vec<&AreaRecord>;
}
