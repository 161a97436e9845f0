use chrono::NaiveDateTime;
use tracing::debug;

use crate::{document::Document, error::Result};

/// How many documents make it into the feed.
pub const MAX_ITEMS: usize = 10;

/// Pair every document with its creation date, newest first, keeping at most `limit`.
///
/// The sort is stable: documents created on the same day keep their discovery order.
pub fn select_recent(
    documents: Vec<Document>,
    limit: usize,
) -> Result<Vec<(NaiveDateTime, Document)>> {
    let mut dated = documents
        .into_iter()
        .map(|doc| -> Result<_> { Ok((doc.created()?, doc)) })
        .collect::<Result<Vec<_>>>()?;
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));
    dated.truncate(limit);
    for (created, doc) in &dated {
        debug!(path = %doc.path.display(), %created, "selected");
    }
    Ok(dated)
}
