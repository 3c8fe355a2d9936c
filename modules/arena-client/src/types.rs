use serde::{Deserialize, Serialize};

const WEB_BASE: &str = "https://are.na";

// --- Blocks ---

/// A single block (content item) as returned by the Are.na API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u64,
    pub title: Option<String>,
    pub source: Option<BlockSource>,
    /// Class discriminator ("Link", "Image", "Text", ...).
    #[serde(rename = "class")]
    pub block_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSource {
    pub url: Option<String>,
}

impl Block {
    /// The source URL, if the block has one.
    pub fn source_url(&self) -> Option<&str> {
        self.source.as_ref()?.url.as_deref()
    }

    /// Link blocks carry a navigable URL.
    pub fn is_link(&self) -> bool {
        self.block_class.as_deref() == Some("Link")
    }

    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Block #{}", self.id),
        }
    }

    pub fn web_url(&self) -> String {
        format!("{WEB_BASE}/block/{}", self.id)
    }
}

// --- Channels ---

/// A channel (curated collection of blocks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    pub slug: String,
    pub owner_slug: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "user_slug")]
    pub username: Option<String>,
    #[serde(rename = "length")]
    pub block_count: Option<u64>,
    pub connection_count: Option<u64>,
    pub thumbnail_urls: Option<Vec<String>>,
}

impl Channel {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }

    pub fn web_url(&self) -> String {
        format!(
            "{WEB_BASE}/{}/{}",
            self.owner_slug.as_deref().unwrap_or("user"),
            self.slug
        )
    }
}

// --- Pagination ---

/// One page of a paged collection resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }
}

// --- Response envelopes ---

/// Response of `GET /search/blocks`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSearchResponse {
    pub blocks: Vec<Block>,
    pub total_pages: u32,
}

impl From<BlockSearchResponse> for Page<Block> {
    fn from(resp: BlockSearchResponse) -> Self {
        Page::new(resp.blocks, resp.total_pages)
    }
}

/// Response of `GET /blocks/{id}/channels`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    pub channels: Vec<Channel>,
    pub total_pages: u32,
}

impl From<ChannelListResponse> for Page<Channel> {
    fn from(resp: ChannelListResponse) -> Self {
        Page::new(resp.channels, resp.total_pages)
    }
}

/// Response of `GET /channels/{slug}/contents`. The endpoint reports the
/// channel length and page size instead of a page count.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelContentsResponse {
    pub contents: Vec<Block>,
    pub length: Option<u32>,
    pub page: Option<u32>,
    pub per: Option<u32>,
}

impl ChannelContentsResponse {
    pub fn total_pages(&self) -> u32 {
        match (self.length, self.per) {
            (Some(length), Some(per)) if per > 0 => length.div_ceil(per),
            _ => 1,
        }
    }
}

impl From<ChannelContentsResponse> for Page<Block> {
    fn from(resp: ChannelContentsResponse) -> Self {
        let total_pages = resp.total_pages();
        Page::new(resp.contents, total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_absent_fields_decode_to_none() {
        let block: Block = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(block.id, 7);
        assert!(block.title.is_none());
        assert!(block.source.is_none());
        assert!(block.block_class.is_none());
        assert!(block.source_url().is_none());
    }

    #[test]
    fn block_class_key_maps_to_block_class() {
        let block: Block = serde_json::from_str(
            r#"{"id": 1, "title": "A", "class": "Link", "source": {"url": "https://a.com/x"}}"#,
        )
        .unwrap();
        assert!(block.is_link());
        assert_eq!(block.source_url(), Some("https://a.com/x"));
    }

    #[test]
    fn source_without_url_has_no_source_url() {
        let block: Block = serde_json::from_str(r#"{"id": 1, "source": {}}"#).unwrap();
        assert!(block.source.is_some());
        assert!(block.source_url().is_none());
    }

    #[test]
    fn display_title_falls_back_to_id() {
        let block: Block = serde_json::from_str(r#"{"id": 42, "title": ""}"#).unwrap();
        assert_eq!(block.display_title(), "Block #42");
        assert_eq!(block.web_url(), "https://are.na/block/42");
    }

    #[test]
    fn channel_counts_distinguish_absent_from_zero() {
        let absent: Channel = serde_json::from_str(r#"{"id": 1, "slug": "a"}"#).unwrap();
        let zero: Channel =
            serde_json::from_str(r#"{"id": 1, "slug": "a", "length": 0, "connection_count": 0}"#)
                .unwrap();
        assert_eq!(absent.block_count, None);
        assert_eq!(zero.block_count, Some(0));
        assert_eq!(zero.connection_count, Some(0));
    }

    #[test]
    fn channel_wire_names() {
        let channel: Channel = serde_json::from_str(
            r#"{"id": 3, "slug": "links", "owner_slug": "kris", "user_slug": "kris-a",
                "length": 12, "thumbnail_urls": ["https://img/1"]}"#,
        )
        .unwrap();
        assert_eq!(channel.username.as_deref(), Some("kris-a"));
        assert_eq!(channel.block_count, Some(12));
        assert_eq!(channel.web_url(), "https://are.na/kris/links");
        assert_eq!(channel.display_title(), "links");
    }

    #[test]
    fn channel_without_owner_links_under_user() {
        let channel: Channel = serde_json::from_str(r#"{"id": 3, "slug": "s"}"#).unwrap();
        assert_eq!(channel.web_url(), "https://are.na/user/s");
    }

    #[test]
    fn channel_requires_slug() {
        let result: std::result::Result<Channel, _> = serde_json::from_str(r#"{"id": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn search_response_decodes_into_page() {
        let resp: BlockSearchResponse = serde_json::from_str(
            r#"{
                "term": "example",
                "total_pages": 2,
                "current_page": 1,
                "blocks": [
                    {"id": 11, "title": "Post", "class": "Link",
                     "source": {"url": "https://example.com/post", "title": "Post"}},
                    {"id": 12, "title": null, "class": "Text", "source": null}
                ]
            }"#,
        )
        .unwrap();

        let page: Page<Block> = resp.into();

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].source_url(), Some("https://example.com/post"));
        assert!(page.items[1].source.is_none());
    }

    #[test]
    fn channel_list_response_decodes_into_page() {
        let resp: ChannelListResponse = serde_json::from_str(
            r#"{
                "total_pages": 1,
                "channels": [
                    {"id": 5, "slug": "web-reading", "title": "Web reading",
                     "owner_slug": "kris", "user_slug": "kris", "length": 40},
                    {"id": 6, "slug": "links"}
                ]
            }"#,
        )
        .unwrap();

        let page: Page<Channel> = resp.into();

        assert_eq!(page.total_pages, 1);
        let slugs: Vec<&str> = page.items.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["web-reading", "links"]);
        assert_eq!(page.items[0].block_count, Some(40));
    }

    #[test]
    fn search_response_requires_total_pages() {
        let result: serde_json::Result<BlockSearchResponse> =
            serde_json::from_str(r#"{"blocks": []}"#);
        let err: crate::ArenaError = result.unwrap_err().into();
        assert!(err.is_decode());
    }

    #[test]
    fn channel_list_response_requires_channels_key() {
        let result: serde_json::Result<ChannelListResponse> =
            serde_json::from_str(r#"{"total_pages": 1}"#);
        let err: crate::ArenaError = result.unwrap_err().into();
        assert!(err.is_decode());
    }

    #[test]
    fn contents_total_pages_from_length_and_per() {
        let resp: ChannelContentsResponse =
            serde_json::from_str(r#"{"contents": [], "length": 101, "page": 1, "per": 50}"#)
                .unwrap();
        assert_eq!(resp.total_pages(), 3);
    }

    #[test]
    fn contents_without_length_is_single_page() {
        let resp: ChannelContentsResponse =
            serde_json::from_str(r#"{"contents": [{"id": 1}]}"#).unwrap();
        assert_eq!(resp.total_pages(), 1);
        let page: Page<Block> = resp.into();
        assert_eq!(page.items.len(), 1);
    }
}
