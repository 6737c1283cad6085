//! Shared text patterns.
//!
//! Item-name keywords for lockbox detection and the chat hyperlink format
//! used by manual roll requests.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ports::ItemLinkParser;

lazy_static! {
    /// Container names that denote a lockbox (case-insensitive).
    pub static ref LOCKBOX_PATTERN: Regex = Regex::new(
        r"(?i)lockbox|strongbox|chest"
    ).unwrap();

    /// Item hyperlink, e.g. `|cff0070dd|Hitem:40395:0:0:0:0:0:0:0:80|h[Torch of Holy Fire]|h|r`.
    pub static ref ITEM_LINK_PATTERN: Regex = Regex::new(
        r"\|Hitem:(\d+)"
    ).unwrap();
}

/// Check if an item name carries a lockbox keyword.
pub fn has_lockbox_keyword(name: &str) -> bool {
    LOCKBOX_PATTERN.is_match(name)
}

/// Extract item ids from every item hyperlink in `text`, in order.
pub fn item_ids_in_links(text: &str) -> Vec<u32> {
    ITEM_LINK_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// [`ItemLinkParser`] over the game's `|Hitem:` hyperlink format.
#[derive(Debug, Clone, Copy, Default)]
pub struct HyperlinkParser;

impl ItemLinkParser for HyperlinkParser {
    fn parse_items(&self, text: &str) -> Vec<u32> {
        item_ids_in_links(text)
    }
}
