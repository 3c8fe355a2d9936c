pub mod error;
pub mod pagination;
pub mod types;

pub use error::{ArenaError, Result};
pub use pagination::fetch_all_pages;
pub use types::{
    Block, BlockSearchResponse, BlockSource, Channel, ChannelContentsResponse,
    ChannelListResponse, Page,
};

use std::time::Duration;

use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.are.na/v2";

/// Page size requested for channel contents.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Read-only client for the public Are.na v2 API. No authentication.
pub struct ArenaClient {
    client: reqwest::Client,
    base_url: String,
    per_page: u32,
}

impl ArenaClient {
    pub fn new(base_url: &str, per_page: u32, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page,
        })
    }

    /// One page of `GET /search/blocks?q=...`. The query is URL-encoded.
    pub async fn search_blocks_page(&self, query: &str, page: u32) -> Result<Page<Block>> {
        let url = format!("{}/search/blocks", self.base_url);
        let resp: BlockSearchResponse = self
            .get_json(&url, &[("q", query.to_string()), ("page", page.to_string())])
            .await?;
        Ok(resp.into())
    }

    /// One page of `GET /blocks/{id}/channels`.
    pub async fn block_channels_page(&self, block_id: u64, page: u32) -> Result<Page<Channel>> {
        let url = format!("{}/blocks/{}/channels", self.base_url, block_id);
        let resp: ChannelListResponse = self.get_json(&url, &[("page", page.to_string())]).await?;
        Ok(resp.into())
    }

    /// One page of `GET /channels/{slug}/contents`.
    pub async fn channel_contents_page(&self, slug: &str, page: u32) -> Result<Page<Block>> {
        let url = format!("{}/channels/{}/contents", self.base_url, slug);
        let resp: ChannelContentsResponse = self
            .get_json(
                &url,
                &[("page", page.to_string()), ("per", self.per_page.to_string())],
            )
            .await?;
        Ok(resp.into())
    }

    /// GET a JSON resource. The body is read as text first so schema
    /// mismatches surface as `Parse` rather than `Network`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(url, ?query, "GET");
        let resp = self.client.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ArenaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
