use std::fmt;

use arena_client::{Block, Channel};
use chrono::{DateTime, Utc};
use serde::Serialize;

// --- Pipeline stages ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStage {
    BlockSearch,
    ChannelDiscovery,
    ContentAggregation,
    Ranking,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchStage::BlockSearch => "block search",
            SearchStage::ChannelDiscovery => "channel discovery",
            SearchStage::ContentAggregation => "content aggregation",
            SearchStage::Ranking => "ranking",
        };
        f.write_str(name)
    }
}

// --- Stage outputs ---

/// A fetched block whose source URL matched the candidate URL.
/// The underlying block always has a source URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedBlock {
    pub block: Block,
    pub is_exact: bool,
}

/// A URL seen across the discovered channels, with how many link blocks pointed at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredUrl {
    pub url: String,
    pub count: u32,
    pub is_top_result: bool,
}

// --- Run stats ---

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStats {
    pub blocks_fetched: u32,
    pub blocks_matched: u32,
    pub channels_found: u32,
    pub channels_skipped: u32,
    pub link_blocks_counted: u32,
    pub unique_urls: u32,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Blocks fetched:     {}", self.blocks_fetched)?;
        writeln!(f, "Blocks matched:     {}", self.blocks_matched)?;
        writeln!(f, "Channels found:     {}", self.channels_found)?;
        if self.channels_skipped > 0 {
            writeln!(f, "Channels skipped:   {}", self.channels_skipped)?;
        }
        writeln!(f, "Link blocks:        {}", self.link_blocks_counted)?;
        write!(f, "Unique URLs:        {}", self.unique_urls)
    }
}

// --- Pipeline result ---

/// Everything one search produces. A new search builds a fresh result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineResult {
    pub exact_count: u32,
    pub inexact_count: u32,
    pub channels: Vec<Channel>,
    pub classified_blocks: Vec<ClassifiedBlock>,
    pub discovered_urls: Vec<DiscoveredUrl>,
    pub stats: SearchStats,
    pub searched_at: Option<DateTime<Utc>>,
}

impl PipelineResult {
    pub fn exact_blocks(&self) -> impl Iterator<Item = &ClassifiedBlock> {
        self.classified_blocks.iter().filter(|b| b.is_exact)
    }

    pub fn inexact_blocks(&self) -> impl Iterator<Item = &ClassifiedBlock> {
        self.classified_blocks.iter().filter(|b| !b.is_exact)
    }

    pub fn top_results(&self) -> impl Iterator<Item = &DiscoveredUrl> {
        self.discovered_urls.iter().filter(|u| u.is_top_result)
    }

    /// True for the reset state: no counts, no lists.
    pub fn is_empty(&self) -> bool {
        self.exact_count == 0
            && self.inexact_count == 0
            && self.channels.is_empty()
            && self.classified_blocks.is_empty()
            && self.discovered_urls.is_empty()
    }
}
