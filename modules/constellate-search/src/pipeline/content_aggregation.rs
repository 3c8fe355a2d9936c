use std::collections::HashMap;

use arena_client::{fetch_all_pages, Block, Channel};
use tracing::{debug, info, warn};

use constellate_common::{ConstellateError, SearchStage};

use crate::pipeline::worklist::run_ordered;
use crate::traits::ArenaSource;

/// Source URL → number of link blocks pointing at it, across channels.
pub type UrlFrequency = HashMap<String, u32>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlTally {
    pub frequency: UrlFrequency,
    pub link_blocks: u32,
    pub channels_skipped: u32,
}

/// Count link URLs across the contents of every channel.
///
/// A channel whose contents cannot be fetched or decoded is logged and
/// skipped; it never aborts the aggregation.
pub async fn aggregate_urls<S: ArenaSource + ?Sized>(
    source: &S,
    channels: &[Channel],
    concurrency: usize,
) -> UrlTally {
    let outcomes = run_ordered(0..channels.len(), concurrency, move |i: usize| {
        let channel = &channels[i];
        async move {
            let contents =
                fetch_all_pages(|page| source.channel_contents_page(&channel.slug, page)).await;
            (channel, contents)
        }
    })
    .await;

    let mut tally = UrlTally::default();
    for (channel, contents) in outcomes {
        match contents {
            Ok(blocks) => {
                let urls: Vec<&str> = link_urls(&blocks).collect();
                debug!(
                    slug = channel.slug.as_str(),
                    links = urls.len(),
                    "Counted channel links"
                );
                for url in urls {
                    *tally.frequency.entry(url.to_string()).or_insert(0) += 1;
                    tally.link_blocks += 1;
                }
            }
            Err(e) => {
                let err = ConstellateError::from_arena(SearchStage::ContentAggregation, e);
                warn!(slug = channel.slug.as_str(), error = %err, "Skipping channel");
                tally.channels_skipped += 1;
            }
        }
    }

    info!(
        channels = channels.len(),
        skipped = tally.channels_skipped,
        unique_urls = tally.frequency.len(),
        "Aggregated channel contents"
    );
    tally
}

/// Source URLs of `Link` blocks; other classes and URL-less links are ignored.
fn link_urls(blocks: &[Block]) -> impl Iterator<Item = &str> {
    blocks
        .iter()
        .filter(|block| block.is_link())
        .filter_map(Block::source_url)
}
