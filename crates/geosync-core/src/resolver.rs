// crates/geosync-core/src/resolver.rs
use crate::config::MatchConfig;
use crate::rank::{rerank, RankContext};
use crate::score::weighted_ratio;
use crate::search::Candidate;
use crate::text::{normalize_region, qualifier};
use crate::tokenize::split_place;
use crate::traits::GazetteerSearch;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which tier of the resolver produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    /// Best word-prefix candidate cleared the threshold.
    WordPrefix,
    /// Exact base name whose qualifier matches the requested region.
    ExactBaseRegion,
    /// Exact base name, first in index order.
    ExactBase,
    /// Single global fuzzy candidate above the threshold.
    Fuzzy,
    /// Several global fuzzy candidates, winner picked by re-ranking.
    Reranked,
}

/// Outcome of resolving one input string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_name: Option<String>,
    /// Raw similarity of the match (0 when there is none).
    pub score: f64,
    pub tier: Option<MatchTier>,
    /// Word-prefix candidates, always; these are what a reviewer picks from.
    pub candidates: Vec<Candidate>,
}

impl MatchResult {
    fn none(candidates: Vec<Candidate>) -> Self {
        Self {
            matched_name: None,
            score: 0.0,
            tier: None,
            candidates,
        }
    }

    fn matched(name: &str, score: f64, tier: MatchTier, candidates: Vec<Candidate>) -> Self {
        Self {
            matched_name: Some(name.to_string()),
            score,
            tier: Some(tier),
            candidates,
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched_name.is_some()
    }
}

/// Picks one best gazetteer entry for a free-text place name.
///
/// Tiers, first hit wins:
/// 1. best word-prefix candidate at or above the threshold;
/// 2. exact base-name match, preferring one whose qualifier names the region
///    given in the input;
/// 3. global top-K fuzzy candidates above the threshold, re-ranked when more
///    than one survives.
#[derive(Debug, Clone)]
pub struct Resolver<'g, S: GazetteerSearch + ?Sized> {
    index: &'g S,
    config: MatchConfig,
}

impl<'g, S: GazetteerSearch + ?Sized> Resolver<'g, S> {
    pub fn new(index: &'g S, config: MatchConfig) -> Self {
        Self { index, config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn index(&self) -> &'g S {
        self.index
    }

    pub fn resolve(&self, input: &str) -> MatchResult {
        let input = input.trim();
        if input.is_empty() {
            return MatchResult::none(Vec::new());
        }
        let threshold = self.config.threshold;

        let parts = split_place(input);
        let city = parts.city.to_lowercase();

        let candidates = self.index.word_candidates(input, self.config.word_limit);
        if let Some(top) = candidates.first() {
            if threshold.accepts(top.score) {
                debug!(input, name = %top.name, score = top.score, "word-prefix match");
                let (name, score) = (top.name.clone(), top.score);
                return MatchResult::matched(&name, score, MatchTier::WordPrefix, candidates);
            }
        }

        let exact = self.index.exact_base_matches(&city);
        if !exact.is_empty() {
            let region = parts.region.as_deref().map(normalize_region);
            let preferred = region.as_ref().and_then(|region| {
                exact.iter().find(|r| {
                    qualifier(&r.display_name)
                        .is_some_and(|q| normalize_region(q).contains(region.as_str()))
                })
            });
            let (record, tier) = match preferred {
                Some(r) => (*r, MatchTier::ExactBaseRegion),
                None => (exact[0], MatchTier::ExactBase),
            };
            let score = weighted_ratio(input, &record.display_name);
            debug!(input, name = %record.display_name, score, ?tier, "exact base-name match");
            return MatchResult::matched(&record.display_name, score, tier, candidates);
        }

        let survivors: Vec<Candidate> = self
            .index
            .top_candidates(input, self.config.top_k)
            .into_iter()
            .filter(|c| threshold.accepts(c.score))
            .collect();

        let (winner, tier) = match survivors.as_slice() {
            [] => {
                debug!(input, "no candidate above threshold");
                return MatchResult::none(candidates);
            }
            [only] => (only, MatchTier::Fuzzy),
            [first, rest @ ..] => {
                let ctx = RankContext::new(input, &city, parts.region.as_deref());
                (rerank(&ctx, first, rest), MatchTier::Reranked)
            }
        };
        debug!(input, name = %winner.name, score = winner.score, ?tier, "fuzzy match");
        MatchResult::matched(&winner.name, winner.score, tier, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::Gazetteer;
    use crate::raw::AreaRaw;

    fn gz() -> Gazetteer {
        Gazetteer::from_tree(&[AreaRaw::new("113", "Россия").with_children(vec![
            AreaRaw::new("1", "Москва"),
            AreaRaw::new("2", "Санкт-Петербург"),
            AreaRaw::new("1061", "Мурманская область").with_children(vec![AreaRaw::new(
                "1067",
                "Кировск (Мурманская область)",
            )]),
            AreaRaw::new("145", "Ленинградская область").with_children(vec![AreaRaw::new(
                "1020",
                "Кировск (Ленинградская область)",
            )]),
        ])])
    }

    #[test]
    fn blank_input_resolves_to_nothing() {
        let g = gz();
        let r = Resolver::new(&g, MatchConfig::default()).resolve("   ");
        assert!(!r.is_match());
        assert!(r.candidates.is_empty());
    }

    #[test]
    fn word_prefix_tier_wins_first() {
        let g = gz();
        let r = Resolver::new(&g, MatchConfig::default()).resolve("Москва");
        assert_eq!(r.matched_name.as_deref(), Some("Москва"));
        assert_eq!(r.tier, Some(MatchTier::WordPrefix));
        assert_eq!(r.score, 100.0);
    }

    #[test]
    fn exact_tier_prefers_requested_region() {
        let g = gz();
        // Word-prefix scores stay below 100 here, so the exact tier decides.
        let r = Resolver::new(&g, MatchConfig::with_threshold(100).unwrap())
            .resolve("Кировск Ленинградская обл");
        assert_eq!(r.matched_name.as_deref(), Some("Кировск (Ленинградская область)"));
        assert_eq!(r.tier, Some(MatchTier::ExactBaseRegion));
        assert_eq!(r.candidates.len(), 2);
    }

    #[test]
    fn exact_tier_without_region_takes_first_in_index_order() {
        let g = gz();
        let r = Resolver::new(&g, MatchConfig::with_threshold(100).unwrap()).resolve("кировск");
        assert_eq!(r.matched_name.as_deref(), Some("Кировск (Мурманская область)"));
        assert_eq!(r.tier, Some(MatchTier::ExactBase));
    }

    #[test]
    fn fuzzy_tier_catches_typos() {
        let g = gz();
        let r = Resolver::new(&g, MatchConfig::with_threshold(80).unwrap()).resolve("Санкт-Питербург");
        assert_eq!(r.matched_name.as_deref(), Some("Санкт-Петербург"));
        assert_eq!(r.tier, Some(MatchTier::Fuzzy));
        assert!(r.candidates.is_empty());
    }

    fn novosibirsk() -> Gazetteer {
        Gazetteer::from_tree(&[
            AreaRaw::new("1202", "Новосибирская область"),
            AreaRaw::new("4", "Новосибирск"),
        ])
    }

    #[test]
    fn several_survivors_are_reranked() {
        let g = novosibirsk();
        // No word-prefix hit and no exact base name: both names clear 80.
        let r = Resolver::new(&g, MatchConfig::with_threshold(80).unwrap()).resolve("Навосибирск");
        assert!(r.candidates.is_empty());
        assert_eq!(r.matched_name.as_deref(), Some("Новосибирск"));
        assert_eq!(r.tier, Some(MatchTier::Reranked));
        assert!(r.score > 90.0 && r.score < 91.0, "score {}", r.score);
    }

    #[test]
    fn single_survivor_is_a_plain_fuzzy_match() {
        let g = novosibirsk();
        // At 90 the qualified region name (about 82) drops out.
        let r = Resolver::new(&g, MatchConfig::with_threshold(90).unwrap()).resolve("Навосибирск");
        assert_eq!(r.matched_name.as_deref(), Some("Новосибирск"));
        assert_eq!(r.tier, Some(MatchTier::Fuzzy));
    }

    #[test]
    fn nothing_plausible_is_no_match() {
        let g = gz();
        let r = Resolver::new(&g, MatchConfig::default()).resolve("Zzzxyz");
        assert!(!r.is_match());
        assert_eq!(r.score, 0.0);
        assert_eq!(r.tier, None);
    }
}
