use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use constellate_common::{ConstellateError, PipelineResult, SearchStage, SearchStats};

use crate::pipeline::{aggregate_urls, discover_channels, rank_urls, search_blocks};
use crate::traits::ArenaSource;
use crate::url_match::domain_token;

/// Runs one search end to end: validate → block search → channel discovery →
/// content aggregation → ranking. Holds no state between runs.
pub struct SearchPipeline<S: ?Sized> {
    source: Arc<S>,
    concurrency: usize,
}

impl<S: ArenaSource + ?Sized> SearchPipeline<S> {
    pub fn new(source: Arc<S>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn run(&self, candidate: &str) -> Result<PipelineResult, ConstellateError> {
        self.run_with_progress(candidate, |_| {}).await
    }

    /// Run the pipeline, calling `on_stage` as each stage begins.
    /// Invalid input fails before any request is made.
    pub async fn run_with_progress(
        &self,
        candidate: &str,
        mut on_stage: impl FnMut(SearchStage) + Send,
    ) -> Result<PipelineResult, ConstellateError> {
        let token = domain_token(candidate)?;
        let source = self.source.as_ref();
        info!(candidate, token = token.as_str(), "Searching for domain");

        on_stage(SearchStage::BlockSearch);
        let search = search_blocks(source, &token, candidate).await?;

        on_stage(SearchStage::ChannelDiscovery);
        let channels = discover_channels(source, &search.blocks, self.concurrency).await?;

        on_stage(SearchStage::ContentAggregation);
        let tally = aggregate_urls(source, &channels, self.concurrency).await;

        on_stage(SearchStage::Ranking);
        let discovered_urls = rank_urls(&tally.frequency);

        let stats = SearchStats {
            blocks_fetched: search.blocks.len() as u32,
            blocks_matched: search.matches.classified_blocks.len() as u32,
            channels_found: channels.len() as u32,
            channels_skipped: tally.channels_skipped,
            link_blocks_counted: tally.link_blocks,
            unique_urls: discovered_urls.len() as u32,
        };
        info!(
            exact = search.matches.exact,
            inexact = search.matches.inexact,
            channels = stats.channels_found,
            urls = stats.unique_urls,
            "Search complete"
        );

        Ok(PipelineResult {
            exact_count: search.matches.exact,
            inexact_count: search.matches.inexact,
            channels,
            classified_blocks: search.matches.classified_blocks,
            discovered_urls,
            stats,
            searched_at: Some(Utc::now()),
        })
    }
}
