// crates/geosync-core/src/rank.rs

//! Re-ranking of global fuzzy candidates.
//!
//! When several candidates clear the threshold, each one gets the additive
//! [`Adjustment`]s of the ordered [`RULES`] on top of its similarity score and
//! the highest adjusted score wins.

use crate::search::Candidate;
use crate::text::{base_name, char_len, has_admin_keyword, normalize_region, qualifier};
use serde::Serialize;
use std::fmt;

/// What the re-ranking rules know about the input.
#[derive(Debug, Clone)]
pub struct RankContext<'a> {
    /// Full trimmed input.
    pub input: &'a str,
    /// Lowercased city part.
    pub city: String,
    /// Normalized region part, when the input had one.
    pub region: Option<String>,
    pub input_has_keyword: bool,
}

impl<'a> RankContext<'a> {
    pub fn new(input: &'a str, city: &str, region: Option<&str>) -> Self {
        Self {
            input,
            city: city.trim().to_lowercase(),
            region: region.map(normalize_region),
            input_has_keyword: has_admin_keyword(input),
        }
    }
}

/// One named score adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Adjustment {
    /// City part equals the candidate's base name.
    ExactBase,
    /// City part is contained in the candidate's base name.
    CityInBase,
    /// Candidate's base name is contained in the city part.
    BaseInCity,
    /// Neither name contains the other.
    BaseMismatch,
    /// Normalized region part found in the normalized candidate.
    RegionMatch,
    /// A region was given, did not match, and the candidate is qualified.
    RegionMismatch,
    /// Base name and city part differ in length by more than 3 chars.
    LengthDrift,
    /// Base name is more than 4 chars longer than the city part.
    LongerBase,
    /// Input and candidate are both longer than 15 chars.
    LongNames,
    /// Input and candidate both name an administrative unit.
    KeywordShared,
    /// Input names an administrative unit, the candidate does not.
    KeywordMissing,
}

impl Adjustment {
    pub fn delta(self) -> i32 {
        match self {
            Adjustment::ExactBase => 50,
            Adjustment::CityInBase => 30,
            Adjustment::BaseInCity => 20,
            Adjustment::BaseMismatch => -30,
            Adjustment::RegionMatch => 40,
            Adjustment::RegionMismatch => -25,
            Adjustment::LengthDrift => -20,
            Adjustment::LongerBase => -25,
            Adjustment::LongNames => 5,
            Adjustment::KeywordShared => 15,
            Adjustment::KeywordMissing => -15,
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:+})", self, self.delta())
    }
}

pub type Rule = fn(&RankContext<'_>, &str) -> Option<Adjustment>;

/// Rules in evaluation order. Each contributes at most one adjustment.
pub const RULES: &[Rule] = &[
    base_name_rule,
    region_rule,
    length_drift_rule,
    longer_base_rule,
    long_names_rule,
    keyword_rule,
];

pub fn base_name_rule(ctx: &RankContext<'_>, candidate: &str) -> Option<Adjustment> {
    let base = base_name(candidate).to_lowercase();
    Some(if base == ctx.city {
        Adjustment::ExactBase
    } else if base.contains(&ctx.city) {
        Adjustment::CityInBase
    } else if ctx.city.contains(&base) {
        Adjustment::BaseInCity
    } else {
        Adjustment::BaseMismatch
    })
}

pub fn region_rule(ctx: &RankContext<'_>, candidate: &str) -> Option<Adjustment> {
    let region = ctx.region.as_ref()?;
    if normalize_region(candidate).contains(region.as_str()) {
        Some(Adjustment::RegionMatch)
    } else if qualifier(candidate).is_some() {
        Some(Adjustment::RegionMismatch)
    } else {
        None
    }
}

fn base_len(candidate: &str) -> usize {
    char_len(base_name(candidate))
}

pub fn length_drift_rule(ctx: &RankContext<'_>, candidate: &str) -> Option<Adjustment> {
    let (base, city) = (base_len(candidate), char_len(&ctx.city));
    (base.abs_diff(city) > 3).then_some(Adjustment::LengthDrift)
}

pub fn longer_base_rule(ctx: &RankContext<'_>, candidate: &str) -> Option<Adjustment> {
    (base_len(candidate) > char_len(&ctx.city) + 4).then_some(Adjustment::LongerBase)
}

pub fn long_names_rule(ctx: &RankContext<'_>, candidate: &str) -> Option<Adjustment> {
    (char_len(candidate) > 15 && char_len(ctx.input) > 15).then_some(Adjustment::LongNames)
}

pub fn keyword_rule(ctx: &RankContext<'_>, candidate: &str) -> Option<Adjustment> {
    if !ctx.input_has_keyword {
        return None;
    }
    Some(if has_admin_keyword(candidate) {
        Adjustment::KeywordShared
    } else {
        Adjustment::KeywordMissing
    })
}

/// All adjustments that apply to `candidate`, in rule order.
pub fn adjustments(ctx: &RankContext<'_>, candidate: &str) -> Vec<Adjustment> {
    RULES.iter().filter_map(|rule| rule(ctx, candidate)).collect()
}

/// Similarity score plus every applicable adjustment.
pub fn adjusted_score(ctx: &RankContext<'_>, candidate: &Candidate) -> f64 {
    let delta: i32 = adjustments(ctx, &candidate.name)
        .into_iter()
        .map(Adjustment::delta)
        .sum();
    candidate.score + f64::from(delta)
}

/// Picks the candidate with the highest adjusted score; the first one wins
/// ties. Falls back to `first` (the best raw score) when no adjusted score is
/// positive. The list is passed as head and tail, so it is never empty.
pub fn rerank<'c>(
    ctx: &RankContext<'_>,
    first: &'c Candidate,
    rest: &'c [Candidate],
) -> &'c Candidate {
    let score = |candidate: &Candidate| {
        let adjusted = adjusted_score(ctx, candidate);
        tracing::trace!(name = %candidate.name, raw = candidate.score, adjusted, "rerank");
        adjusted
    };
    let mut best = (first, score(first));
    for candidate in rest {
        let adjusted = score(candidate);
        if adjusted > best.1 {
            best = (candidate, adjusted);
        }
    }
    match best {
        (winner, top) if top > 0.0 => winner,
        _ => first,
    }
}
