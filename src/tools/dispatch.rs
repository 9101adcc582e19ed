//! Dispatcher — routes a tool call through validation, building and response.
//!
//! Every call ends in exactly one [`ToolResponse`]. Unknown tools, validation
//! failures, synthesis failures and fetch failures all become error envelopes;
//! nothing escapes as an `Err`. The dispatcher holds no per-call state, so one
//! instance can serve any number of concurrent calls.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

use crate::tools::catalog::{ToolAction, ToolCatalog};
use crate::tools::response::ToolResponse;
use crate::tools::tags::{self, HttpTagSource, TagSource};
use crate::types::{Config, Error, FetchConfig, Result};

/// Stateless tool-call router over an immutable catalog.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<ToolCatalog>,
    tags: Arc<dyn TagSource>,
    fetch: FetchConfig,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tools", &self.catalog.len())
            .field("fetch", &self.fetch)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(catalog: Arc<ToolCatalog>, tags: Arc<dyn TagSource>, fetch: FetchConfig) -> Self {
        Self {
            catalog,
            tags,
            fetch,
        }
    }

    /// Built-in catalog with the GitHub tag source.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = Arc::new(ToolCatalog::builtin()?);
        let tags = Arc::new(HttpTagSource::new(&config.fetch)?);
        Ok(Self::new(catalog, tags, config.fetch.clone()))
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Handle one tool call.
    pub async fn call(&self, name: &str, args: &Value) -> ToolResponse {
        let span = tracing::info_span!("tool_call", tool = %name);
        async {
            match self.execute(name, args).await {
                Ok(response) => response,
                Err(err) => {
                    if err.is_tool_failure() {
                        tracing::warn!(error = %err, "tool call failed");
                    } else {
                        tracing::error!(error = %err, "tool call failed");
                    }
                    ToolResponse::from_error(&err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, name: &str, args: &Value) -> Result<ToolResponse> {
        let entry = self
            .catalog
            .get(name)
            .ok_or_else(|| Error::unknown_tool(name))?;

        tracing::debug!("validating arguments");
        let params = entry.validate(args)?;

        tracing::debug!(params = params.len(), "building");
        match &entry.action {
            ToolAction::Command(spec) => {
                let synthesized = spec.synthesize(&params)?;
                tracing::info!(command = %synthesized.command, "synthesized command");
                Ok(ToolResponse::command(
                    &spec.title,
                    &synthesized.command,
                    &spec.notes,
                ))
            }
            ToolAction::FetchTags => {
                tags::fetch_and_render(self.tags.as_ref(), &self.fetch, &params).await
            }
        }
    }
}
