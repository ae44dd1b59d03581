//! RetrievalEngine: validated request in, enriched results out.

use std::sync::Arc;

use groundwork_core::config::{GroundworkConfig, RetrievalConfig};
use groundwork_core::errors::GroundResult;
use groundwork_core::models::{EnrichedResult, FallbackEvent, RetrievalRequest, StoreTag};
use tracing::{info, info_span};

use crate::context::BackendContext;
use crate::factory::RetrieverFactory;
use crate::{assembler, executor, filter, neighbors, reorder};

/// Result of one retrieval.
#[derive(Debug, Clone)]
pub struct RetrievalOutcome {
    /// At most `limit` results in long-context order.
    pub results: Vec<EnrichedResult>,
    /// Store that answered; every neighbor lookup went to the same store.
    pub store: StoreTag,
    pub fallback: Option<FallbackEvent>,
}

pub struct RetrievalEngine {
    context: Arc<BackendContext>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    pub fn new(context: Arc<BackendContext>, config: RetrievalConfig) -> Self {
        Self { context, config }
    }

    /// Build backends from configuration and wrap them in an engine.
    pub fn from_config(config: &GroundworkConfig) -> GroundResult<Self> {
        let context = BackendContext::from_config(config)?;
        Ok(Self::new(Arc::new(context), config.retrieval.clone()))
    }

    pub fn context(&self) -> &BackendContext {
        &self.context
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Run the full pipeline for one request.
    ///
    /// Invalid requests are rejected before any backend is contacted.
    pub fn retrieve(&self, request: &RetrievalRequest) -> GroundResult<RetrievalOutcome> {
        request.validate()?;
        let filter = filter::translate(request.doc_ids.as_ref(), request.min_score)?;

        let span = info_span!(
            "retrieve",
            kb = %request.knowledge_base_id,
            strategy = %request.retriever_type,
            limit = request.limit
        );
        let _guard = span.enter();

        let k = request.limit.saturating_add(self.config.candidate_pad);
        let plan = RetrieverFactory::new(&self.context, self.config.rrf_c)
            .build(&request.knowledge_base_id)
            .select(request.retriever_type);
        let execution = executor::execute(&plan, &request.text, &filter, k)?;
        let store = execution.candidates.store;
        let candidates = execution.candidates.chunks.len();

        let mut ordered = reorder::long_context_reorder(execution.candidates.chunks);
        ordered.truncate(request.limit);

        let enriched = neighbors::resolve(
            self.context.store(store).as_ref(),
            &request.knowledge_base_id,
            ordered,
            request.prev_next_chunks,
        );
        let results = assembler::cap(enriched, request.limit);

        let degraded = results.iter().filter(|r| r.neighbors_degraded).count();
        info!(%store, candidates, results = results.len(), degraded, "retrieval complete");

        Ok(RetrievalOutcome {
            results,
            store,
            fallback: execution.fallback,
        })
    }
}
