use arena_client::{fetch_all_pages, Block};
use tracing::info;

use constellate_common::{ClassifiedBlock, ConstellateError, SearchStage};

use crate::traits::ArenaSource;
use crate::url_match::classify_match;

/// Blocks whose source URL matched the candidate, with exact/inexact tallies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    pub exact: u32,
    pub inexact: u32,
    pub classified_blocks: Vec<ClassifiedBlock>,
}

/// Output of the block search stage. `blocks` is the full, unfiltered fetch;
/// channel discovery runs over all of it, not only the matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockSearch {
    pub blocks: Vec<Block>,
    pub matches: MatchResult,
}

/// Fetch every block the search endpoint returns for `token`, then classify
/// them against the candidate URL as given. Any page failure is fatal.
pub async fn search_blocks<S: ArenaSource + ?Sized>(
    source: &S,
    token: &str,
    candidate: &str,
) -> Result<BlockSearch, ConstellateError> {
    let blocks = fetch_all_pages(|page| source.search_blocks_page(token, page))
        .await
        .map_err(|e| ConstellateError::from_arena(SearchStage::BlockSearch, e))?;
    info!(token, count = blocks.len(), "Fetched blocks");

    let matches = classify_blocks(&blocks, candidate);
    info!(
        exact = matches.exact,
        inexact = matches.inexact,
        "Classified blocks"
    );

    Ok(BlockSearch { blocks, matches })
}

/// Keep blocks whose source URL matches `candidate`. Blocks without a source
/// URL and non-matching blocks are dropped.
pub fn classify_blocks(blocks: &[Block], candidate: &str) -> MatchResult {
    let mut result = MatchResult::default();

    for block in blocks {
        let Some(source_url) = block.source_url() else {
            continue;
        };
        let m = classify_match(candidate, source_url);
        if !m.matches {
            continue;
        }
        if m.is_exact {
            result.exact += 1;
        } else {
            result.inexact += 1;
        }
        result.classified_blocks.push(ClassifiedBlock {
            block: block.clone(),
            is_exact: m.is_exact,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{block, sourceless_block, MockArena};

    const CANDIDATE: &str = "https://www.example.com/post/1";

    #[test]
    fn exact_and_inexact_are_tallied() {
        let blocks = vec![
            block(1, "https://example.com/post/1"),
            block(2, "https://example.com/post/2"),
            block(3, "https://example.org"),
        ];
        let result = classify_blocks(&blocks, CANDIDATE);
        assert_eq!(result.exact, 2);
        assert_eq!(result.inexact, 1);
        let flags: Vec<(u64, bool)> = result
            .classified_blocks
            .iter()
            .map(|c| (c.block.id, c.is_exact))
            .collect();
        assert_eq!(flags, vec![(1, true), (2, false), (3, true)]);
    }

    #[test]
    fn sourceless_and_foreign_blocks_are_dropped() {
        let blocks = vec![sourceless_block(1), block(2, "https://other.com/post/1")];
        let result = classify_blocks(&blocks, CANDIDATE);
        assert_eq!(result, MatchResult::default());
    }

    #[test]
    fn every_classified_block_has_a_source_url() {
        let blocks = vec![sourceless_block(1), block(2, "https://example.com/x")];
        let result = classify_blocks(&blocks, CANDIDATE);
        assert!(result
            .classified_blocks
            .iter()
            .all(|c| c.block.source_url().is_some()));
    }

    #[tokio::test]
    async fn fetches_all_pages_and_keeps_unmatched_blocks() {
        let arena = MockArena::new().on_search(
            "example",
            vec![
                vec![block(1, "https://example.com/post/1"), sourceless_block(2)],
                vec![block(3, "https://other.com")],
            ],
        );

        let search = search_blocks(&arena, "example", CANDIDATE).await.unwrap();

        let ids: Vec<u64> = search.blocks.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(search.matches.exact, 1);
        assert_eq!(search.matches.classified_blocks.len(), 1);
        assert_eq!(arena.requests(), vec!["search:example:1", "search:example:2"]);
    }

    #[tokio::test]
    async fn search_failure_is_fatal() {
        let arena = MockArena::new();
        let err = search_blocks(&arena, "example", CANDIDATE).await.unwrap_err();
        assert!(matches!(
            err,
            ConstellateError::NetworkFailure {
                stage: SearchStage::BlockSearch,
                ..
            }
        ));
    }
}
