//! Backend-agnostic filter expression.
//!
//! A closed set of clauses that each store adapter renders into its own
//! native query form. Clauses are ANDed together.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Chunk;

/// A single constraint on candidate chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterClause {
    /// Chunk's document id is any of the set (OR semantics).
    DocumentIdIn(BTreeSet<String>),
    /// Backend relevance score is at least the threshold.
    ScoreAtLeast(f64),
}

/// Conjunction of filter clauses. The empty set matches everything.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
}

impl FilterSet {
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        Self { clauses }
    }

    /// Filter that admits every chunk.
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// The allowed document ids, if the set restricts them.
    ///
    /// An empty `DocumentIdIn` set is treated as "no restriction".
    pub fn doc_ids(&self) -> Option<&BTreeSet<String>> {
        self.clauses.iter().find_map(|c| match c {
            FilterClause::DocumentIdIn(ids) if !ids.is_empty() => Some(ids),
            _ => None,
        })
    }

    /// The highest score threshold present, if any.
    pub fn min_score(&self) -> Option<f64> {
        self.clauses
            .iter()
            .filter_map(|c| match c {
                FilterClause::ScoreAtLeast(s) => Some(*s),
                _ => None,
            })
            .reduce(f64::max)
    }

    /// Whether a chunk's document passes the document clause.
    pub fn admits_doc(&self, doc_id: &str) -> bool {
        self.doc_ids().is_none_or(|ids| ids.contains(doc_id))
    }

    /// Whether a scored chunk passes every clause.
    pub fn admits(&self, chunk: &Chunk, score: f64) -> bool {
        self.admits_doc(&chunk.doc_id) && self.min_score().is_none_or(|min| score >= min)
    }
}
