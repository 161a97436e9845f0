//! Build an RSS feed of the newest proposal documents (PEPs) in a directory.
//!
//! The pipeline reads `pep-*.txt` / `pep-*.rst` files, pulls `Title:`, `Author:` and `Created:`
//! out of their headers and the first paragraph of their `Abstract` section out of the body,
//! ranks them by creation date and writes the ten newest as `peps.rss`.

pub mod config;
pub mod created;
pub mod document;
pub mod entry;
pub mod error;
pub mod extract;
pub mod feed;
pub mod pipeline;
pub mod rank;
pub mod rst;

pub use config::FeedConfig;
pub use document::Document;
pub use entry::Entry;
pub use error::{Error, Result};
pub use feed::Feed;
pub use pipeline::{Report, run};
