use std::collections::HashSet;

use arena_client::{fetch_all_pages, Block, Channel};
use tracing::info;

use constellate_common::{ConstellateError, SearchStage};

use crate::pipeline::worklist::try_run_ordered;
use crate::traits::ArenaSource;

/// Fetch the channels of every block and deduplicate them by slug.
/// Order follows block order, then page order within a block. Any failure is fatal.
pub async fn discover_channels<S: ArenaSource + ?Sized>(
    source: &S,
    blocks: &[Block],
    concurrency: usize,
) -> Result<Vec<Channel>, ConstellateError> {
    let ids: Vec<u64> = blocks.iter().map(|b| b.id).collect();
    let per_block = try_run_ordered(ids, concurrency, move |block_id| {
        fetch_all_pages(move |page| source.block_channels_page(block_id, page))
    })
    .await
    .map_err(|e| ConstellateError::from_arena(SearchStage::ChannelDiscovery, e))?;

    let fetched: usize = per_block.iter().map(Vec::len).sum();
    let channels = dedup_by_slug(per_block.into_iter().flatten());
    info!(fetched, unique = channels.len(), "Discovered channels");

    Ok(channels)
}

/// First occurrence of each slug wins; order is preserved.
pub fn dedup_by_slug(channels: impl IntoIterator<Item = Channel>) -> Vec<Channel> {
    let mut seen = HashSet::new();
    channels
        .into_iter()
        .filter(|channel| seen.insert(channel.slug.clone()))
        .collect()
}
