use std::fmt::Write;

use constellate_common::{ClassifiedBlock, PipelineResult};

/// Plain-text rendering of a search result for the terminal.
pub fn render(candidate: &str, result: &PipelineResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Results for {candidate}");
    let _ = writeln!(
        out,
        "Exact matches: {}  Inexact matches: {}",
        result.exact_count, result.inexact_count
    );

    let _ = writeln!(out, "\nBlocks ({})", result.classified_blocks.len());
    let exact: Vec<&ClassifiedBlock> = result.exact_blocks().collect();
    let inexact: Vec<&ClassifiedBlock> = result.inexact_blocks().collect();
    render_blocks(&mut out, "Exact", &exact);
    render_blocks(&mut out, "Inexact", &inexact);

    let _ = writeln!(out, "\nChannels ({})", result.channels.len());
    for channel in &result.channels {
        let _ = write!(out, "  {} [{}]", channel.display_title(), channel.slug);
        if let Some(username) = &channel.username {
            let _ = write!(out, " by {username}");
        }
        let _ = writeln!(out, "\n    {}", channel.web_url());
    }

    let top: Vec<&str> = result.top_results().map(|d| d.url.as_str()).collect();
    if !top.is_empty() {
        let _ = writeln!(out, "\nMost linked: {}", top.join(", "));
    }

    let _ = writeln!(out, "\nOther websites ({})", result.discovered_urls.len());
    for discovered in &result.discovered_urls {
        let marker = if discovered.is_top_result { "*" } else { " " };
        let _ = write!(out, "  {marker} {}", discovered.url);
        if discovered.count > 1 {
            let _ = write!(out, " ({})", discovered.count);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "\n{}", result.stats);
    out
}

fn render_blocks(out: &mut String, label: &str, blocks: &[&ClassifiedBlock]) {
    if blocks.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {label} ({})", blocks.len());
    for classified in blocks {
        let block = &classified.block;
        let _ = writeln!(out, "    {}  {}", block.display_title(), block.web_url());
        if let Some(url) = block.source_url() {
            let _ = writeln!(out, "      {url}");
        }
    }
}
