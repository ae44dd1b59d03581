//! Primary attempt, then at most one secondary attempt.
//!
//! Only a backend outage (unreachable, timeout, bad status, malformed
//! payload) moves on to the secondary store. Any other error is a defect
//! and fails the request without touching the secondary store.
//! Attempts never run concurrently.

use chrono::Utc;
use groundwork_core::errors::{GroundError, GroundResult};
use groundwork_core::models::{FallbackEvent, FilterSet, RetrieverType, ScoredChunk, StoreTag};
use groundwork_core::traits::IRetriever;
use tracing::{debug, warn};

use crate::factory::{FallbackRoute, RetrievalPlan};

/// Candidates plus the store that produced them. Neighbor lookups must go
/// to the same store.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    pub chunks: Vec<ScoredChunk>,
    pub store: StoreTag,
}

#[derive(Debug, Clone)]
pub struct Execution {
    pub candidates: CandidateSet,
    /// Set when the secondary store answered.
    pub fallback: Option<FallbackEvent>,
}

enum AttemptOutcome {
    Answered(Vec<ScoredChunk>),
    BackendUnavailable(GroundError),
    Failed(GroundError),
}

fn attempt(retriever: &dyn IRetriever, query: &str, filter: &FilterSet, k: usize) -> AttemptOutcome {
    match retriever.retrieve(query, filter, k) {
        Ok(chunks) => AttemptOutcome::Answered(chunks),
        Err(e) if e.is_backend_unavailable() => AttemptOutcome::BackendUnavailable(e),
        Err(e) => AttemptOutcome::Failed(e),
    }
}

fn failed_backend(err: &GroundError) -> &str {
    match err {
        GroundError::Backend(e) => e.backend(),
        _ => "unknown",
    }
}

fn failed(
    strategy: RetrieverType,
    store: StoreTag,
    primary_cause: Option<String>,
    cause: GroundError,
) -> GroundError {
    GroundError::RetrievalFailed {
        strategy,
        store,
        primary_cause,
        cause: Box::new(cause),
    }
}

/// Run a plan for one query, fetching `k` candidates per backend search.
pub fn execute(plan: &RetrievalPlan, query: &str, filter: &FilterSet, k: usize) -> GroundResult<Execution> {
    let strategy = plan.strategy;

    let primary_error = match attempt(plan.primary.as_ref(), query, filter, k) {
        AttemptOutcome::Answered(chunks) => {
            debug!(%strategy, candidates = chunks.len(), "primary store answered");
            return Ok(Execution {
                candidates: CandidateSet {
                    chunks,
                    store: StoreTag::Primary,
                },
                fallback: None,
            });
        }
        AttemptOutcome::Failed(e) => {
            return Err(failed(strategy, StoreTag::Primary, None, e));
        }
        AttemptOutcome::BackendUnavailable(e) => e,
    };

    let secondary = match &plan.fallback {
        FallbackRoute::Secondary(retriever) => retriever,
        FallbackRoute::Unavailable => {
            warn!(%strategy, error = %primary_error, "retrieval failed, strategy has no fallback");
            return Err(failed(strategy, StoreTag::Primary, None, primary_error));
        }
    };

    warn!(
        %strategy,
        retriever = plan.primary.name(),
        backend = failed_backend(&primary_error),
        error = %primary_error,
        "primary store unavailable, trying secondary"
    );

    match attempt(secondary.as_ref(), query, filter, k) {
        AttemptOutcome::Answered(chunks) => {
            let event = FallbackEvent {
                strategy,
                failed_store: StoreTag::Primary,
                failure: primary_error.to_string(),
                fallback_used: StoreTag::Secondary,
                timestamp: Utc::now(),
            };
            debug!(%strategy, candidates = chunks.len(), "secondary store answered");
            Ok(Execution {
                candidates: CandidateSet {
                    chunks,
                    store: StoreTag::Secondary,
                },
                fallback: Some(event),
            })
        }
        AttemptOutcome::BackendUnavailable(e) | AttemptOutcome::Failed(e) => {
            warn!(%strategy, backend = failed_backend(&e), error = %e, "secondary store failed as well");
            Err(failed(
                strategy,
                StoreTag::Secondary,
                Some(primary_error.to_string()),
                e,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use groundwork_core::models::KnowledgeBaseId;
    use test_fixtures::{scored, Failure, MockChunkStore, MockEmbedder, MockSparseEncoder, MockSparseIndex};

    use super::*;
    use crate::context::BackendContext;
    use crate::factory::RetrieverFactory;

    struct Harness {
        primary: Arc<MockChunkStore>,
        secondary: Arc<MockChunkStore>,
        ctx: BackendContext,
    }

    fn harness(primary: MockChunkStore, secondary: MockChunkStore) -> Harness {
        let primary = Arc::new(primary);
        let secondary = Arc::new(secondary);
        let ctx = BackendContext::new(
            Arc::new(MockEmbedder::default()),
            Arc::new(MockSparseEncoder::new()),
            Arc::new(MockSparseIndex::new(vec![scored("s", 0, 3.0)])),
            primary.clone(),
            secondary.clone(),
        );
        Harness {
            primary,
            secondary,
            ctx,
        }
    }

    fn run(h: &Harness, strategy: RetrieverType) -> GroundResult<Execution> {
        let kb = KnowledgeBaseId::new("kb").unwrap();
        let plan = RetrieverFactory::new(&h.ctx, 60).build(&kb).select(strategy);
        execute(&plan, "q", &FilterSet::match_all(), 4)
    }

    #[test]
    fn primary_success_skips_secondary() {
        let h = harness(
            MockChunkStore::new("primary").with_hits(vec![scored("a", 0, 0.9)]),
            MockChunkStore::new("secondary"),
        );
        let exec = run(&h, RetrieverType::Dense).unwrap();
        assert_eq!(exec.candidates.store, StoreTag::Primary);
        assert!(exec.fallback.is_none());
        assert_eq!(h.secondary.search_calls(), 0);
    }

    #[test]
    fn outage_falls_back_exactly_once() {
        let h = harness(
            MockChunkStore::new("primary").failing_search(Failure::Timeout),
            MockChunkStore::new("secondary").with_hits(vec![scored("b", 0, 0.8)]),
        );
        let exec = run(&h, RetrieverType::Dense).unwrap();
        assert_eq!(exec.candidates.store, StoreTag::Secondary);
        assert_eq!(h.primary.search_calls(), 1);
        assert_eq!(h.secondary.search_calls(), 1);
        let event = exec.fallback.unwrap();
        assert_eq!(event.failed_store, StoreTag::Primary);
        assert!(event.failure.contains("timed out"));
    }

    #[test]
    fn defect_does_not_fall_back() {
        let h = harness(
            MockChunkStore::new("primary").failing_search(Failure::Internal),
            MockChunkStore::new("secondary").with_hits(vec![scored("b", 0, 0.8)]),
        );
        let err = run(&h, RetrieverType::Ensemble).unwrap_err();
        assert!(matches!(
            err,
            GroundError::RetrievalFailed { store: StoreTag::Primary, .. }
        ));
        assert_eq!(h.secondary.search_calls(), 0);
    }

    #[test]
    fn both_down_reports_both_causes() {
        let h = harness(
            MockChunkStore::new("primary").failing_search(Failure::Unreachable),
            MockChunkStore::new("secondary").failing_search(Failure::Malformed),
        );
        match run(&h, RetrieverType::Dense).unwrap_err() {
            GroundError::RetrievalFailed {
                strategy,
                store,
                primary_cause,
                cause,
            } => {
                assert_eq!(strategy, RetrieverType::Dense);
                assert_eq!(store, StoreTag::Secondary);
                assert!(primary_cause.unwrap().contains("primary unreachable"));
                assert!(cause.to_string().contains("secondary"));
            }
            other => panic!("expected RetrievalFailed, got {other:?}"),
        }
        assert_eq!(h.secondary.search_calls(), 1);
    }
}
