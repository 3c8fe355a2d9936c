use std::collections::HashMap;

use constellate_common::DiscoveredUrl;

/// Sort URLs by count (descending, ties by URL ascending) and flag top results.
///
/// Every URL whose count equals the maximum is a top result, but only when the
/// maximum is above 1: if nothing repeats, nothing is flagged.
pub fn rank_urls(frequency: &HashMap<String, u32>) -> Vec<DiscoveredUrl> {
    let mut entries: Vec<(&String, u32)> = frequency
        .iter()
        .map(|(url, &count)| (url, count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let max_count = entries.first().map_or(0, |&(_, count)| count);

    entries
        .into_iter()
        .map(|(url, count)| DiscoveredUrl {
            url: url.clone(),
            count,
            is_top_result: count == max_count && max_count > 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs.iter().map(|(u, c)| (u.to_string(), *c)).collect()
    }

    fn flags(ranked: &[DiscoveredUrl]) -> Vec<(&str, u32, bool)> {
        ranked
            .iter()
            .map(|d| (d.url.as_str(), d.count, d.is_top_result))
            .collect()
    }

    #[test]
    fn ties_at_max_are_all_top_results() {
        let ranked = rank_urls(&freq(&[("u3", 1), ("u2", 3), ("u1", 3)]));
        assert_eq!(
            flags(&ranked),
            vec![("u1", 3, true), ("u2", 3, true), ("u3", 1, false)]
        );
    }

    #[test]
    fn single_occurrence_is_never_top() {
        let ranked = rank_urls(&freq(&[("u1", 1)]));
        assert_eq!(flags(&ranked), vec![("u1", 1, false)]);
    }

    #[test]
    fn all_ones_flags_nothing() {
        let ranked = rank_urls(&freq(&[("a", 1), ("b", 1), ("c", 1)]));
        assert!(ranked.iter().all(|d| !d.is_top_result));
        let urls: Vec<&str> = ranked.iter().map(|d| d.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
    }

    #[test]
    fn unique_max_is_the_only_top() {
        let ranked = rank_urls(&freq(&[("a", 2), ("b", 5), ("c", 4)]));
        assert_eq!(
            flags(&ranked),
            vec![("b", 5, true), ("c", 4, false), ("a", 2, false)]
        );
    }

    #[test]
    fn empty_table_ranks_nothing() {
        assert!(rank_urls(&HashMap::new()).is_empty());
    }
}
