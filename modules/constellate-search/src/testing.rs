// Test mocks for the search pipeline.
//
// MockArena (ArenaSource) serves registered pages from memory and records
// every request. Unregistered resources return an error, same as a 404.
//
// Plus helpers for constructing blocks and channels.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use arena_client::{ArenaError, Block, BlockSource, Channel, Page, Result};
use async_trait::async_trait;

use crate::traits::ArenaSource;

// ---------------------------------------------------------------------------
// MockArena
// ---------------------------------------------------------------------------

/// In-memory Are.na. Each registered resource is a list of pages; the page
/// count is reported as `total_pages`.
/// Builder pattern: `.on_search()`, `.on_block_channels()`, `.on_channel_contents()`.
#[derive(Default)]
pub struct MockArena {
    searches: HashMap<String, Vec<Vec<Block>>>,
    block_channels: HashMap<u64, Vec<Vec<Channel>>>,
    channel_contents: HashMap<String, Vec<Vec<Block>>>,
    failing_contents: HashSet<String>,
    undecodable_contents: HashSet<String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl MockArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, query: &str, pages: Vec<Vec<Block>>) -> Self {
        self.searches.insert(query.to_string(), pages);
        self
    }

    pub fn on_block_channels(mut self, block_id: u64, pages: Vec<Vec<Channel>>) -> Self {
        self.block_channels.insert(block_id, pages);
        self
    }

    pub fn on_channel_contents(mut self, slug: &str, pages: Vec<Vec<Block>>) -> Self {
        self.channel_contents.insert(slug.to_string(), pages);
        self
    }

    /// Contents requests for this channel fail at the transport level.
    pub fn failing_contents(mut self, slug: &str) -> Self {
        self.failing_contents.insert(slug.to_string());
        self
    }

    /// Contents requests for this channel return a body that does not decode.
    pub fn undecodable_contents(mut self, slug: &str) -> Self {
        self.undecodable_contents.insert(slug.to_string());
        self
    }

    /// Sleep before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every request served so far, as `"search:q:p"`, `"channels:id:p"`, `"contents:slug:p"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    async fn record(&self, request: String) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.requests.lock().unwrap().push(request);
    }
}

fn serve<T: Clone>(pages: Option<&Vec<Vec<T>>>, page: u32, what: &str) -> Result<Page<T>> {
    let pages = pages.ok_or_else(|| ArenaError::Api {
        status: 404,
        message: format!("MockArena: no {what} registered"),
    })?;
    let items = pages
        .get((page as usize).saturating_sub(1))
        .cloned()
        .unwrap_or_default();
    Ok(Page::new(items, pages.len() as u32))
}

#[async_trait]
impl ArenaSource for MockArena {
    async fn search_blocks_page(&self, query: &str, page: u32) -> Result<Page<Block>> {
        self.record(format!("search:{query}:{page}")).await;
        serve(self.searches.get(query), page, &format!("search for {query}"))
    }

    async fn block_channels_page(&self, block_id: u64, page: u32) -> Result<Page<Channel>> {
        self.record(format!("channels:{block_id}:{page}")).await;
        serve(
            self.block_channels.get(&block_id),
            page,
            &format!("channels for block {block_id}"),
        )
    }

    async fn channel_contents_page(&self, slug: &str, page: u32) -> Result<Page<Block>> {
        self.record(format!("contents:{slug}:{page}")).await;
        if self.failing_contents.contains(slug) {
            return Err(ArenaError::Network(format!(
                "MockArena: connection reset fetching {slug}"
            )));
        }
        if self.undecodable_contents.contains(slug) {
            return Err(ArenaError::Parse(
                "missing field `contents` at line 1 column 2".to_string(),
            ));
        }
        serve(
            self.channel_contents.get(slug),
            page,
            &format!("contents for {slug}"),
        )
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A block with a source URL and no class.
pub fn block(id: u64, source_url: &str) -> Block {
    Block {
        id,
        title: Some(format!("Block {id}")),
        source: Some(BlockSource {
            url: Some(source_url.to_string()),
        }),
        block_class: None,
    }
}

/// A block with no source at all (text, image, ...).
pub fn sourceless_block(id: u64) -> Block {
    Block {
        id,
        title: None,
        source: None,
        block_class: Some("Text".to_string()),
    }
}

/// A `Link` block pointing at `url`.
pub fn link_block(id: u64, url: &str) -> Block {
    Block {
        block_class: Some("Link".to_string()),
        ..block(id, url)
    }
}

pub fn channel(id: u64, slug: &str) -> Channel {
    Channel {
        id,
        slug: slug.to_string(),
        owner_slug: Some("curator".to_string()),
        title: Some(slug.to_uppercase()),
        username: Some("curator".to_string()),
        block_count: None,
        connection_count: None,
        thumbnail_urls: None,
    }
}
