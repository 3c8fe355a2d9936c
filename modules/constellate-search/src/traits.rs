// Source seam for the search pipeline.
//
// ArenaSource covers the three paged resources the pipeline reads. The real
// implementation is ArenaClient; tests use testing::MockArena so every stage
// runs without network.

use arena_client::{ArenaClient, Block, Channel, Page, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ArenaSource: Send + Sync {
    /// One page of blocks matching a free-text query.
    async fn search_blocks_page(&self, query: &str, page: u32) -> Result<Page<Block>>;

    /// One page of channels that contain the block.
    async fn block_channels_page(&self, block_id: u64, page: u32) -> Result<Page<Channel>>;

    /// One page of a channel's contents.
    async fn channel_contents_page(&self, slug: &str, page: u32) -> Result<Page<Block>>;
}

#[async_trait]
impl ArenaSource for ArenaClient {
    async fn search_blocks_page(&self, query: &str, page: u32) -> Result<Page<Block>> {
        self.search_blocks_page(query, page).await
    }

    async fn block_channels_page(&self, block_id: u64, page: u32) -> Result<Page<Channel>> {
        self.block_channels_page(block_id, page).await
    }

    async fn channel_contents_page(&self, slug: &str, page: u32) -> Result<Page<Block>> {
        self.channel_contents_page(slug, page).await
    }
}
