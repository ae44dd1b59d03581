//! Request constraints to a backend-agnostic [`FilterSet`].

use std::collections::BTreeSet;

use groundwork_core::errors::{GroundError, GroundResult};
use groundwork_core::models::{FilterClause, FilterSet};

/// Build the filter for a request.
///
/// An absent or empty id set adds no document clause. The score threshold is
/// always present so every backend applies the same cut-off.
pub fn translate(doc_ids: Option<&BTreeSet<String>>, min_score: f64) -> GroundResult<FilterSet> {
    if !min_score.is_finite() || min_score < 0.0 {
        return Err(GroundError::invalid_request(format!(
            "min_score must be a non-negative number, got {min_score}"
        )));
    }

    let mut clauses = Vec::with_capacity(2);
    if let Some(ids) = doc_ids.filter(|ids| !ids.is_empty()) {
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(GroundError::invalid_request("doc_ids must not contain blank ids"));
        }
        clauses.push(FilterClause::DocumentIdIn(ids.clone()));
    }
    clauses.push(FilterClause::ScoreAtLeast(min_score));

    Ok(FilterSet::new(clauses))
}
