use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    config::{DOCUMENT_PATTERNS, FeedConfig, OUTPUT_FILE_NAME},
    document::Document,
    entry::build_entries,
    error::{Error, Result},
    feed::Feed,
    rank::select_recent,
};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: PathBuf,
    pub discovered: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Find proposal documents in `source`: all `.txt` ones, then all `.rst` ones, each sorted.
pub fn discover(source: &Path) -> Result<Vec<PathBuf>> {
    let base = glob::Pattern::escape(&source.to_string_lossy());
    let mut paths = Vec::new();
    for pattern in DOCUMENT_PATTERNS {
        let pattern = Path::new(&base).join(pattern);
        for path in glob::glob(&pattern.to_string_lossy())? {
            let path = path.map_err(|e| {
                let path = e.path().to_path_buf();
                Error::io(path, e.into())
            })?;
            if path.is_file() {
                paths.push(path);
            }
        }
    }
    Ok(paths)
}

/// Scan `source`, rank, and write the feed into `output_dir`.
pub fn run(config: &FeedConfig, source: &Path, output_dir: &Path) -> Result<Report> {
    let paths = discover(source)?;
    info!(count = paths.len(), source = %source.display(), "discovered documents");

    let documents = paths
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "reading");
            Document::load(path)
        })
        .collect::<Result<Vec<_>>>()?;
    let discovered = documents.len();

    let selected = select_recent(documents, config.max_items)?;
    let (entries, skipped) = build_entries(config, &selected)?;
    let written = entries.len();

    let output = output_dir.join(OUTPUT_FILE_NAME);
    Feed::new(config, entries, Utc::now()).write_to(&output)?;
    info!(path = %output.display(), written, skipped, "feed written");

    Ok(Report {
        output,
        discovered,
        written,
        skipped,
    })
}
