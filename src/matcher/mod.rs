//! Affinity matching of local mods against registry search hits
//!
//! The match is a heuristic: every candidate gets a weighted score built from
//! name, license and author similarity, and the highest score wins. The score
//! and a confidence level travel with the result so callers can see (and
//! reject) weak matches.

pub mod sequence;

use std::collections::HashSet;

use crate::config::{MatchingConfig, SEQ_MATCH_WEIGHT, SUBSTRING_BASE, TOK_OVERLAP_WEIGHT};
use crate::local::LocalMod;
use crate::registry::SearchHit;

/// How much a chosen identity can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Score at or above the uncertainty threshold
    Confident,
    /// Best score found, but below the uncertainty threshold
    Uncertain,
    /// Slug supplied by the user, no search involved
    Override,
}

/// A local mod bound to a registry project
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedMod {
    pub local: LocalMod,
    pub slug: String,
    pub title: String,
    /// Affinity of the chosen hit; `None` for overrides
    pub score: Option<f64>,
    pub confidence: Confidence,
}

impl IdentifiedMod {
    /// Binds `local` to a user-supplied slug.
    pub fn from_override(local: LocalMod, slug: &str) -> Self {
        let title = local.name.clone();
        Self {
            local,
            slug: slug.to_string(),
            title,
            score: None,
            confidence: Confidence::Override,
        }
    }
}

/// Best-scoring hit for a local mod
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHit {
    pub hit: SearchHit,
    pub score: f64,
    pub confidence: Confidence,
}

impl ScoredHit {
    pub fn into_identified(self, local: LocalMod) -> IdentifiedMod {
        IdentifiedMod {
            local,
            slug: self.hit.slug,
            title: self.hit.title,
            score: Some(self.score),
            confidence: self.confidence,
        }
    }
}

/// Sequence-similarity component of [`string_affinity`], case-folded.
///
/// Floored at [`SUBSTRING_BASE`] when either string contains the other.
pub fn sequence_affinity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let score = sequence::ratio(&a, &b);
    if a.contains(&b) || b.contains(&a) {
        score.max(SUBSTRING_BASE)
    } else {
        score
    }
}

/// Share of whitespace-separated tokens the two strings have in common, case-folded.
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let a_tokens: HashSet<&str> = a.split_whitespace().collect();
    let b_tokens: HashSet<&str> = b.split_whitespace().collect();

    let shared = a_tokens.intersection(&b_tokens).count();
    let union = a_tokens.union(&b_tokens).count();
    shared as f64 / union.max(1) as f64
}

/// String affinity in `[0, 1]`: blended sequence similarity and token overlap.
pub fn string_affinity(a: &str, b: &str) -> f64 {
    sequence_affinity(a, b) * SEQ_MATCH_WEIGHT + token_overlap(a, b) * TOK_OVERLAP_WEIGHT
}

/// Weighted affinity between a local mod and one search hit
pub fn candidate_affinity(local: &LocalMod, hit: &SearchHit, weights: &MatchingConfig) -> f64 {
    let mut affinity = string_affinity(&local.name, &hit.title) * weights.name_weight;
    if !local.license.is_empty() {
        affinity += string_affinity(&local.license, &hit.license) * weights.license_weight;
    }
    if local.has_author(&hit.author) {
        affinity += weights.author_weight;
    }
    affinity
}

/// Picks the hit with the highest affinity; the first one wins ties.
///
/// Returns `None` when there are no hits.
pub fn select_best(
    local: &LocalMod,
    hits: Vec<SearchHit>,
    matching: &MatchingConfig,
) -> Option<ScoredHit> {
    let mut best: Option<(SearchHit, f64)> = None;
    for hit in hits {
        let score = candidate_affinity(local, &hit, matching);
        match &best {
            Some((_, best_score)) if score <= *best_score => {}
            _ => best = Some((hit, score)),
        }
    }

    best.map(|(hit, score)| ScoredHit {
        hit,
        score,
        confidence: if score < matching.uncertain_below {
            Confidence::Uncertain
        } else {
            Confidence::Confident
        },
    })
}
