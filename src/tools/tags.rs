//! Remote tag list — the one tool that performs real network I/O.
//!
//! Tags come from the GitHub REST API (`GET /repos/{owner}/{repo}/tags`),
//! which answers with a JSON array of `{name, ...}` objects, at most 100 per
//! page, and links further pages through the `Link: <...>; rel="next"`
//! header. Network, HTTP and parse failures all become [`Error::Fetch`] and
//! are reported as text.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::tools::catalog::ToolEntry;
use crate::tools::response::ToolResponse;
use crate::tools::schema::{ParamDef, ParamType, ValidatedParams};
use crate::types::{Error, FetchConfig, Result};

/// Largest page size the GitHub API accepts.
pub const MAX_PER_PAGE: usize = 100;

/// Source of remote tag names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Fetch up to `max` tag names of `repository` (`owner/name`), in API order.
    async fn fetch_tags(&self, repository: &str, max: usize) -> Result<Vec<String>>;
}

/// `github-tags` registration.
pub(crate) fn entry() -> ToolEntry {
    ToolEntry::fetch_tags(
        "github-tags",
        "List release tags of a GitHub repository (defaults to the nuclei templates)",
        vec![
            ParamDef::optional(
                "repository",
                ParamType::String,
                "Repository as owner/name (e.g. projectdiscovery/nuclei-templates)",
            ),
            ParamDef::optional("limit", ParamType::int_range(1, 1000), "Maximum tags to list"),
            ParamDef::optional("filter", ParamType::String, "Only list tags containing this text"),
        ],
    )
}

/// Reject anything that is not `owner/name`.
pub fn check_repository(repository: &str) -> Result<()> {
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    match repository.split_once('/') {
        Some((owner, name)) if valid_part(owner) && valid_part(name) => Ok(()),
        _ => Err(Error::synthesis(format!(
            "repository must look like owner/name, got '{}'",
            repository
        ))),
    }
}

/// Extract tag names from the API response body.
pub fn parse_tags(body: &Value) -> Result<Vec<String>> {
    let items = body
        .as_array()
        .ok_or_else(|| Error::fetch("expected a JSON array of tags"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .or_else(|| item.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .ok_or_else(|| Error::fetch(format!("unexpected tag entry at index {}", i)))
        })
        .collect()
}

/// URL of the `rel="next"` entry of a `Link` header, if any.
pub fn next_link(header: &str) -> Option<&str> {
    header.split(',').find_map(|entry| {
        let (target, params) = entry.trim().split_once(';')?;
        let is_next = params
            .split(';')
            .any(|p| matches!(p.trim(), "rel=\"next\"" | "rel=next"));
        if !is_next {
            return None;
        }
        target.trim().strip_prefix('<')?.strip_suffix('>')
    })
}

/// Run the `github-tags` tool against `source`.
pub async fn fetch_and_render(
    source: &dyn TagSource,
    config: &FetchConfig,
    params: &ValidatedParams,
) -> Result<ToolResponse> {
    let repository = params
        .str("repository")
        .unwrap_or(config.default_repository.as_str());
    check_repository(repository)?;

    let limit = params
        .int("limit")
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(config.max_tags)
        .min(config.max_tags);
    let filter = params.str("filter");

    // Without a filter the first `limit` tags are the answer
    let max = match filter {
        Some(_) => config.max_scanned_tags.max(limit),
        None => limit,
    };
    let tags = source.fetch_tags(repository, max).await?;
    let scanned = tags.len();
    let shown: Vec<String> = tags
        .into_iter()
        .filter(|tag| filter.map_or(true, |f| tag.contains(f)))
        .take(limit)
        .collect();
    tracing::debug!(repository, scanned, shown = shown.len(), "fetched tags");

    if shown.is_empty() {
        return Ok(ToolResponse::text(format!("No tags found for {}.", repository)));
    }
    let mut text = format!("Tags for {} ({} listed):", repository, shown.len());
    for tag in &shown {
        text.push_str("\n- ");
        text.push_str(tag);
    }
    Ok(ToolResponse::text(text))
}

/// GitHub-backed [`TagSource`].
#[derive(Debug, Clone)]
pub struct HttpTagSource {
    client: Client,
    api_base: String,
}

impl HttpTagSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TagSource for HttpTagSource {
    async fn fetch_tags(&self, repository: &str, max: usize) -> Result<Vec<String>> {
        let mut url = Url::parse(&format!("{}/repos/{}/tags", self.api_base, repository))
            .map_err(|e| Error::fetch(format!("invalid tags URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("per_page", &max.clamp(1, MAX_PER_PAGE).to_string());

        let mut tags = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next.take() {
            tracing::info!(%url, "fetching tag list");
            let response = self
                .client
                .get(url)
                .header(ACCEPT, "application/vnd.github+json")
                .send()
                .await?
                .error_for_status()?;

            next = match response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_link)
            {
                Some(link) => Some(
                    Url::parse(link)
                        .map_err(|e| Error::fetch(format!("invalid next page link: {}", e)))?,
                ),
                None => None,
            };

            let body: Value = response.json().await?;
            let page = parse_tags(&body)?;
            if page.is_empty() {
                break;
            }
            tags.extend(page);
            if tags.len() >= max {
                break;
            }
        }
        tags.truncate(max);
        Ok(tags)
    }
}
