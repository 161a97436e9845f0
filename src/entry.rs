use chrono::NaiveDateTime;
use tracing::warn;
use url::Url;

use crate::{config::FeedConfig, document::Document, error::Result};

/// One feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub link: Url,
    pub description: Option<String>,
    pub author: Option<String>,
    /// Always the link; it is a permalink.
    pub guid: String,
    pub pub_date: NaiveDateTime,
}

impl Entry {
    pub fn build(config: &FeedConfig, created: NaiveDateTime, doc: &Document) -> Result<Self> {
        let number = doc.number()?;
        let link = config.item_link(number)?;
        Ok(Entry {
            // Matches what deployed feeds show for documents without a title.
            title: format!("PEP {number}: {}", doc.title().unwrap_or("None")),
            guid: link.to_string(),
            link,
            description: doc.abstract_text(),
            author: doc.author().map(str::to_string),
            pub_date: created,
        })
    }
}

/// Build entries in ranking order. Documents without a usable numeric identifier are skipped.
pub fn build_entries(
    config: &FeedConfig,
    selected: &[(NaiveDateTime, Document)],
) -> Result<(Vec<Entry>, usize)> {
    let mut entries = Vec::with_capacity(selected.len());
    let mut skipped = 0;
    for (created, doc) in selected {
        match Entry::build(config, *created, doc) {
            Ok(entry) => entries.push(entry),
            Err(crate::Error::MissingNumber { path }) => {
                warn!(path = %path.display(), "skipping document without a numeric identifier");
                skipped += 1;
            }
            Err(e @ crate::Error::NumberOutOfRange { .. }) => {
                warn!(error = %e, "skipping document");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok((entries, skipped))
}
