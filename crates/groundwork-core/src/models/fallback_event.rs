use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RetrieverType, StoreTag};

/// Recorded when the primary store failed and the secondary answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackEvent {
    pub strategy: RetrieverType,
    pub failed_store: StoreTag,
    pub failure: String,
    pub fallback_used: StoreTag,
    pub timestamp: DateTime<Utc>,
}
