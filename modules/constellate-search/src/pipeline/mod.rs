pub mod block_search;
pub mod channel_discovery;
pub mod content_aggregation;
pub mod ranking;
pub mod worklist;

pub use block_search::{classify_blocks, search_blocks, BlockSearch, MatchResult};
pub use channel_discovery::{dedup_by_slug, discover_channels};
pub use content_aggregation::{aggregate_urls, UrlFrequency, UrlTally};
pub use ranking::rank_urls;
