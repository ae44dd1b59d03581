use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Retrieval strategy requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrieverType {
    Dense,
    Sparse,
    #[default]
    Ensemble,
}

impl RetrieverType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
            Self::Ensemble => "ensemble",
        }
    }
}

impl fmt::Display for RetrieverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrieverType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            "sparse" => Ok(Self::Sparse),
            "ensemble" => Ok(Self::Ensemble),
            other => Err(format!(
                "invalid retriever type: {other:?}, expected 'dense', 'sparse', or 'ensemble'"
            )),
        }
    }
}
