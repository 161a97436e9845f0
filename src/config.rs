use url::Url;

use crate::{error::Result, rank::MAX_ITEMS};

/// File name of the feed inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "peps.rss";

/// Glob patterns for proposal documents, in discovery order.
pub const DOCUMENT_PATTERNS: &[&str] = &["pep-*.txt", "pep-*.rst"];

/// Fixed feed-level metadata and selection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub title: String,
    /// Channel link; item links are resolved against it.
    pub link: String,
    pub description: String,
    pub max_items: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            title: "Newest Python PEPs".to_string(),
            link: "https://www.python.org/dev/peps/".to_string(),
            description: [
                "Newest Python Enhancement Proposals (PEPs) - Information on new",
                "language features, and some meta-information like release",
                "procedure and schedules",
            ]
            .join("\n"),
            max_items: MAX_ITEMS,
        }
    }
}

impl FeedConfig {
    /// Canonical page of proposal `number`, e.g. `.../pep-0008/`.
    pub fn item_link(&self, number: u32) -> Result<Url> {
        Ok(Url::parse(&self.link)?.join(&format!("pep-{number:04}/"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_link_pads_to_four_digits() {
        let config = FeedConfig::default();
        assert_eq!(
            config.item_link(8).unwrap().as_str(),
            "https://www.python.org/dev/peps/pep-0008/"
        );
        assert_eq!(
            config.item_link(3333).unwrap().as_str(),
            "https://www.python.org/dev/peps/pep-3333/"
        );
    }

    #[test]
    fn bad_base_link_is_an_error() {
        let config = FeedConfig {
            link: "not a url".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(config.item_link(1), Err(crate::Error::Link(_))));
    }
}
