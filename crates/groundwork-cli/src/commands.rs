use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use groundwork_core::errors::GroundError;
use groundwork_core::models::{KnowledgeBaseId, RetrievalRequest, RetrieverType};
use groundwork_core::GroundworkConfig;
use groundwork_retrieval::{assembler, search_documents, RetrievalEngine};

use crate::cli::{RequestArgs, SearchArgs};

/// File plus environment, unvalidated. `config` shows incomplete setups too.
pub fn resolve_config(path: Option<&Path>) -> anyhow::Result<GroundworkConfig> {
    let mut config = match path {
        Some(path) => GroundworkConfig::from_file(path)?,
        None => GroundworkConfig::default(),
    };
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

pub fn build_engine(config: &GroundworkConfig) -> anyhow::Result<RetrievalEngine> {
    config.validate()?;
    RetrievalEngine::from_config(config).context("failed to initialize backends")
}

pub fn show_config(config: &GroundworkConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "configuration is incomplete");
    }
    Ok(())
}

pub fn search(engine: &RetrievalEngine, args: &SearchArgs) -> anyhow::Result<()> {
    let request = search_request(args)?;
    let outcome = engine.retrieve(&request)?;
    tracing::debug!(store = %outcome.store, fell_back = outcome.fallback.is_some(), "search answered");
    let response = assembler::to_response(outcome.results);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub fn request(engine: &RetrievalEngine, args: &RequestArgs) -> anyhow::Result<()> {
    let body = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };
    println!("{}", search_documents(engine, &body)?);
    Ok(())
}

fn search_request(args: &SearchArgs) -> Result<RetrievalRequest, GroundError> {
    let kb = KnowledgeBaseId::new(args.kb.as_str())
        .ok_or_else(|| GroundError::invalid_request("knowledge base id must not be blank"))?;
    let retriever = RetrieverType::from_str(&args.retriever).map_err(GroundError::invalid_request)?;

    let mut request = RetrievalRequest::new(args.text.as_str(), kb)
        .with_limit(args.limit)
        .with_window(args.window)
        .with_min_score(args.min_score)
        .with_retriever(retriever);
    if !args.doc_ids.is_empty() {
        request = request.with_doc_ids(args.doc_ids.iter().map(String::as_str));
    }
    request.validate()?;
    Ok(request)
}
